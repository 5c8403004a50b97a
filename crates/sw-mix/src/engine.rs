use anyhow::{Context, Result};
use rand::Rng;
use sw_core::ClipBuffer;

use crate::plan::{MixResult, MixStyle};
use crate::selector::Selection;

/// Fade-in and fade-out applied to every input clip, in milliseconds.
pub const FADE_MS: u32 = 300;
/// Crossfade overlap for sequential joins, in milliseconds.
pub const CROSSFADE_MS: u32 = 1000;
/// Echo tail window, in milliseconds.
pub const ECHO_TAIL_MS: u32 = 1000;
/// Echo tail amplitude factor.
pub const ECHO_TAIL_GAIN: f32 = 0.6;
/// Per-clip gain jitter, in dB.
pub const GAIN_JITTER_DB: std::ops::RangeInclusive<f32> = -5.0..=2.0;

/// Combine three clips under a style.
///
/// Every input first receives the shared pre-processing: resampling to the
/// highest input rate, a 300 ms fade-in, a 300 ms fade-out, and a gain drawn
/// uniformly from [-5, +2] dB — once per clip, from the explicit `rng`.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use sw_core::ClipBuffer;
/// use sw_mix::{MixStyle, mix};
///
/// let clip = || ClipBuffer::new(vec![0.5; 8000], 8000);
/// let mut rng = StdRng::seed_from_u64(1);
/// let combined = mix(MixStyle::Overlay, [clip(), clip(), clip()], &mut rng);
/// assert_eq!(combined.len(), 8000);
/// ```
#[must_use]
pub fn mix<R: Rng + ?Sized>(style: MixStyle, clips: [ClipBuffer; 3], rng: &mut R) -> ClipBuffer {
    let target_rate = clips
        .iter()
        .map(ClipBuffer::sample_rate)
        .max()
        .unwrap_or(44100);

    let prepped: Vec<ClipBuffer> = clips
        .iter()
        .map(|clip| {
            let gain_db = rng.random_range(GAIN_JITTER_DB);
            clip.resampled(target_rate)
                .fade_in(FADE_MS)
                .fade_out(FADE_MS)
                .with_gain_db(gain_db)
        })
        .collect();

    log::debug!(
        "Mixing 3 clips @ {target_rate}Hz with style '{style}' ({:.2}s / {:.2}s / {:.2}s)",
        prepped[0].duration_secs(),
        prepped[1].duration_secs(),
        prepped[2].duration_secs(),
    );

    match style {
        MixStyle::Sequential => sequential(&prepped),
        MixStyle::Overlay => overlay(&prepped),
        MixStyle::Reversed => reversed(&prepped),
        MixStyle::Looped => looped(&prepped),
        MixStyle::Echo => echo(&prepped),
    }
}

/// Concatenate in order, blending 1 s of tail and head at each join.
fn sequential(clips: &[ClipBuffer]) -> ClipBuffer {
    clips[1..].iter().fold(clips[0].clone(), |combined, clip| {
        combined.append_crossfade(clip, CROSSFADE_MS)
    })
}

/// Sum all clips from offset zero; shorter inputs fall silent past their end.
fn overlay(clips: &[ClipBuffer]) -> ClipBuffer {
    clips[1..]
        .iter()
        .fold(clips[0].clone(), |combined, clip| combined.overlay(clip))
}

/// Each clip reversed in full, plain concatenation between segments.
fn reversed(clips: &[ClipBuffer]) -> ClipBuffer {
    clips[1..].iter().fold(clips[0].reversed(), |combined, clip| {
        combined.append(&clip.reversed())
    })
}

/// Traverse the clip list twice with plain concatenation.
fn looped(clips: &[ClipBuffer]) -> ClipBuffer {
    clips
        .iter()
        .chain(clips.iter())
        .skip(1)
        .fold(clips[0].clone(), |combined, clip| combined.append(clip))
}

/// First clip as-is; each later clip carries its own final 1 s at 60 %
/// amplitude appended to itself before joining.
fn echo(clips: &[ClipBuffer]) -> ClipBuffer {
    clips[1..].iter().fold(clips[0].clone(), |combined, clip| {
        let tail = clip.tail(ECHO_TAIL_MS).scaled(ECHO_TAIL_GAIN);
        combined.append(&clip.append(&tail))
    })
}

/// Resolve a selection's filenames to clips and run the engine.
///
/// `resolve` maps a filename to a fully decoded clip (the collaborator
/// contract — typically a decode from the sounds directory).
///
/// # Errors
/// Returns an error when a clip cannot be resolved. Selection and mixing
/// failures are never silently downgraded.
pub fn execute<R: Rng + ?Sized>(
    selection: &Selection,
    mut resolve: impl FnMut(&str) -> Result<ClipBuffer>,
    rng: &mut R,
) -> Result<MixResult> {
    let mut clips = Vec::with_capacity(3);
    for filename in &selection.plan.filenames {
        let clip = resolve(filename).with_context(|| format!("Cannot resolve clip {filename}"))?;
        clips.push(clip);
    }
    let Ok(clips) = <[ClipBuffer; 3]>::try_from(clips) else {
        anyhow::bail!("A mix plan names exactly 3 clips");
    };

    Ok(MixResult {
        combined: mix(selection.plan.style, clips, rng),
        title: selection.title.clone(),
        used: selection.used.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RATE: u32 = 1000;

    fn secs(s: f64) -> ClipBuffer {
        ClipBuffer::new(vec![0.5; (s * f64::from(RATE)) as usize], RATE)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn overlay_is_as_long_as_the_longest_input() {
        let combined = mix(MixStyle::Overlay, [secs(5.0), secs(3.0), secs(4.0)], &mut rng());
        assert_eq!(combined.len(), 5000);
    }

    #[test]
    fn looped_doubles_the_total_length() {
        let combined = mix(MixStyle::Looped, [secs(2.0), secs(1.5), secs(1.0)], &mut rng());
        assert_eq!(combined.len(), 2 * (2000 + 1500 + 1000));
    }

    #[test]
    fn sequential_loses_one_crossfade_per_join() {
        let combined = mix(
            MixStyle::Sequential,
            [secs(5.0), secs(3.0), secs(4.0)],
            &mut rng(),
        );
        assert_eq!(combined.len(), 5000 + 3000 + 4000 - 2 * 1000);
    }

    #[test]
    fn reversed_keeps_the_total_length() {
        let combined = mix(
            MixStyle::Reversed,
            [secs(2.0), secs(3.0), secs(1.0)],
            &mut rng(),
        );
        assert_eq!(combined.len(), 2000 + 3000 + 1000);
    }

    #[test]
    fn echo_first_clip_has_no_tail() {
        // Two echo tails (c1, c2), none for c0: sum + 2 x 1 s exactly
        let combined = mix(MixStyle::Echo, [secs(2.0), secs(2.0), secs(2.0)], &mut rng());
        assert_eq!(combined.len(), 6000 + 2 * 1000);
    }

    #[test]
    fn mixed_sample_rates_are_normalized_to_the_highest() {
        let a = ClipBuffer::new(vec![0.5; 2000], 2000); // 1 s @ 2 kHz
        let b = ClipBuffer::new(vec![0.5; 1000], 1000); // 1 s @ 1 kHz
        let c = ClipBuffer::new(vec![0.5; 500], 1000); // 0.5 s @ 1 kHz
        let combined = mix(MixStyle::Overlay, [a, b, c], &mut rng());
        assert_eq!(combined.sample_rate(), 2000);
        assert_eq!(combined.len(), 2000);
    }

    #[test]
    fn identical_seeds_give_identical_output() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        let first = mix(MixStyle::Echo, [secs(2.0), secs(1.0), secs(1.5)], &mut a);
        let second = mix(MixStyle::Echo, [secs(2.0), secs(1.0), secs(1.5)], &mut b);
        assert_eq!(first.samples(), second.samples());
    }

    #[test]
    fn gain_jitter_differs_across_clips() {
        // Overlay of three identical constant clips: if gains were shared the
        // plateau would be 3x one clip's level. With per-clip draws this is
        // overwhelmingly unlikely under a fixed seed.
        let combined = mix(MixStyle::Overlay, [secs(2.0), secs(2.0), secs(2.0)], &mut rng());
        let mid = combined.samples()[1000];
        let one = mix(
            MixStyle::Overlay,
            [secs(2.0), ClipBuffer::new(vec![], RATE), ClipBuffer::new(vec![], RATE)],
            &mut rng(),
        );
        assert!((mid - 3.0 * one.samples()[1000]).abs() > 1e-4);
    }

    #[test]
    fn execute_resolves_and_reports_the_selection() {
        use crate::plan::MixPlan;
        use sw_core::{ClipType, LabelRecord, Mood};

        let selection = Selection {
            plan: MixPlan {
                mood: "calm".into(),
                style: MixStyle::Overlay,
                filenames: ["a.wav".into(), "b.wav".into(), "c.wav".into()],
            },
            title: "Calm Mix: Quad with ambience".into(),
            used: vec![LabelRecord::classified("a.wav", Mood::Calm, ClipType::Ambience)],
        };
        let result = execute(&selection, |_| Ok(secs(1.0)), &mut rng());
        let result = match result {
            Ok(r) => r,
            Err(e) => panic!("execute failed: {e}"),
        };
        assert_eq!(result.combined.len(), 1000);
        assert_eq!(result.title, "Calm Mix: Quad with ambience");
        assert_eq!(result.used.len(), 1);
    }

    #[test]
    fn execute_surfaces_resolver_failures() {
        use crate::plan::MixPlan;

        let selection = Selection {
            plan: MixPlan {
                mood: "calm".into(),
                style: MixStyle::Echo,
                filenames: ["a.wav".into(), "b.wav".into(), "c.wav".into()],
            },
            title: String::new(),
            used: Vec::new(),
        };
        let result = execute(&selection, |name| anyhow::bail!("no such clip {name}"), &mut rng());
        assert!(result.is_err());
    }
}

use sw_core::{ClipBuffer, FeatureVector};

use crate::tempo::TempoEstimator;

/// Analysis window for framed feature extraction.
pub const FRAME_SIZE: usize = 2048;
/// Hop between consecutive analysis frames.
pub const HOP_SIZE: usize = 512;

/// Extract tempo, mean RMS energy, and mean zero-crossing rate from a clip.
///
/// Returns `None` for an empty buffer or when any feature comes out
/// non-finite — the unclassifiable sentinel. Extraction never fails any
/// other way; the classification path maps `None` to (`unknown`, `unknown`).
///
/// # Example
/// ```
/// use sw_audio::extract_features;
/// use sw_core::ClipBuffer;
///
/// let silence = ClipBuffer::new(vec![0.0; 44100], 44100);
/// let features = extract_features(&silence).unwrap();
/// assert!(features.energy < 0.01);
///
/// assert!(extract_features(&ClipBuffer::new(vec![], 44100)).is_none());
/// ```
#[must_use]
pub fn extract_features(clip: &ClipBuffer) -> Option<FeatureVector> {
    if clip.is_empty() {
        log::debug!("Empty buffer, skipping feature extraction");
        return None;
    }

    let samples = clip.samples();
    let mut rms_sum = 0.0f64;
    let mut zcr_sum = 0.0f64;
    let mut frames = 0u32;

    for start in (0..samples.len()).step_by(HOP_SIZE) {
        let end = (start + FRAME_SIZE).min(samples.len());
        let frame = &samples[start..end];

        let sq: f32 = frame.iter().map(|s| s * s).sum();
        rms_sum += f64::from((sq / frame.len() as f32).sqrt());

        if frame.len() > 1 {
            let crossings = frame
                .windows(2)
                .filter(|pair| (pair[0] < 0.0) != (pair[1] < 0.0))
                .count();
            zcr_sum += crossings as f64 / (frame.len() - 1) as f64;
        }

        frames += 1;
    }

    let energy = (rms_sum / f64::from(frames)) as f32;
    let zero_crossing_rate = (zcr_sum / f64::from(frames)) as f32;
    let tempo = TempoEstimator::new().estimate(samples, clip.sample_rate());

    let features = FeatureVector {
        tempo,
        energy,
        zero_crossing_rate,
    };
    if !(tempo.is_finite() && energy.is_finite() && zero_crossing_rate.is_finite()) {
        log::warn!("Non-finite features {features:?}, treating clip as unclassifiable");
        return None;
    }
    Some(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_unclassifiable() {
        assert!(extract_features(&ClipBuffer::new(Vec::new(), 44100)).is_none());
    }

    #[test]
    fn silence_has_zero_energy_and_zcr() {
        let clip = ClipBuffer::new(vec![0.0; 22050], 22050);
        let features = match extract_features(&clip) {
            Some(f) => f,
            None => panic!("silence should still classify"),
        };
        assert!(features.energy < f32::EPSILON);
        assert!(features.zero_crossing_rate < f32::EPSILON);
    }

    #[test]
    fn alternating_signal_has_high_zcr() {
        let clip = ClipBuffer::new(
            (0..22050)
                .map(|i| if i % 2 == 0 { 0.5 } else { -0.5 })
                .collect(),
            22050,
        );
        let features = match extract_features(&clip) {
            Some(f) => f,
            None => panic!("clip should classify"),
        };
        assert!(features.zero_crossing_rate > 0.9);
    }

    #[test]
    fn full_scale_square_wave_has_high_energy() {
        let clip = ClipBuffer::new(
            (0..44100)
                .map(|i| if (i / 100) % 2 == 0 { 0.8 } else { -0.8 })
                .collect(),
            44100,
        );
        let features = match extract_features(&clip) {
            Some(f) => f,
            None => panic!("clip should classify"),
        };
        assert!((features.energy - 0.8).abs() < 0.05);
    }
}

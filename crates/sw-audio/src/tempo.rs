use crate::features::{FRAME_SIZE, HOP_SIZE};
use crate::fft::SpectrumPipeline;

/// Offline beat-rate estimation via spectral-flux onset tracking.
///
/// Walks the buffer in hop-sized frames, rectifies the frame-to-frame
/// spectral flux (bass bins weighted double), marks onsets against an
/// adaptive EMA threshold with a ~130 ms cooldown, and derives BPM from the
/// mean onset interval.
///
/// # Example
/// ```
/// use sw_audio::tempo::TempoEstimator;
/// let mut estimator = TempoEstimator::new();
/// assert!(estimator.estimate(&[0.0f32; 44100], 44100).abs() < f32::EPSILON);
/// ```
pub struct TempoEstimator {
    fft: SpectrumPipeline,
}

impl TempoEstimator {
    /// Create an estimator with the standard analysis framing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fft: SpectrumPipeline::new(FRAME_SIZE),
        }
    }

    /// Estimate the dominant beat rate in BPM, clamped to [30, 300].
    ///
    /// Returns 0.0 when the buffer yields fewer than four plausible onset
    /// intervals (silence, drones, very short clips).
    pub fn estimate(&mut self, samples: &[f32], sample_rate: u32) -> f32 {
        if samples.is_empty() || sample_rate == 0 {
            return 0.0;
        }

        let fps = sample_rate as f32 / HOP_SIZE as f32;
        let cooldown_frames = (fps * 0.13).max(2.0) as u64;
        // Plausible beat intervals: 300 BPM down to 30 BPM
        let min_interval = (fps * 0.2) as u64;
        let max_interval = (fps * 2.0) as u64;

        let mut prev_spectrum: Vec<f32> = Vec::new();
        let mut flux_avg = 0.0f32;
        let mut last_onset_frame = 0u64;
        let mut intervals: Vec<u64> = Vec::new();

        for (frame_idx, start) in (0..samples.len()).step_by(HOP_SIZE).enumerate() {
            let frame_count = frame_idx as u64 + 1;
            let end = (start + FRAME_SIZE).min(samples.len());
            let spectrum = self.fft.magnitudes(&samples[start..end]);

            let flux: f32 = if prev_spectrum.len() == spectrum.len() {
                let bass_cutoff = spectrum.len() / 4;
                spectrum
                    .iter()
                    .zip(prev_spectrum.iter())
                    .enumerate()
                    .map(|(i, (&cur, &prev))| {
                        let diff = (cur - prev).max(0.0);
                        if i < bass_cutoff { diff * 2.0 } else { diff }
                    })
                    .sum()
            } else {
                0.0
            };

            flux_avg = flux_avg * 0.93 + flux * 0.07;
            let threshold = flux_avg * 1.5 + 0.01;

            let frames_since = frame_count - last_onset_frame;
            // Skip the first frames to avoid false positives while the
            // threshold warms up
            let warmup_complete = frame_count > 10;
            if warmup_complete && flux > threshold && frames_since > cooldown_frames {
                if frames_since >= min_interval && frames_since <= max_interval {
                    intervals.push(frames_since);
                }
                last_onset_frame = frame_count;
            }

            prev_spectrum = spectrum;
        }

        if intervals.len() < 4 {
            return 0.0;
        }

        let avg_interval =
            intervals.iter().map(|&i| i as f64).sum::<f64>() / intervals.len() as f64;
        let bpm = (60.0 * f64::from(fps) / avg_interval) as f32;
        bpm.clamp(30.0, 300.0)
    }
}

impl Default for TempoEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8 s click track: one short burst every `period` seconds.
    fn click_track(bpm: f32, rate: u32, secs: f32) -> Vec<f32> {
        let period = (60.0 / bpm * rate as f32) as usize;
        let mut samples = vec![0.0f32; (secs * rate as f32) as usize];
        let mut pos = 0;
        while pos < samples.len() {
            for s in samples.iter_mut().skip(pos).take(16) {
                *s = 0.9;
            }
            pos += period;
        }
        samples
    }

    #[test]
    fn click_track_at_120_bpm() {
        let samples = click_track(120.0, 44100, 8.0);
        let bpm = TempoEstimator::new().estimate(&samples, 44100);
        assert!((100.0..=140.0).contains(&bpm), "estimated {bpm} BPM");
    }

    #[test]
    fn silence_has_no_tempo() {
        let samples = vec![0.0f32; 88200];
        let bpm = TempoEstimator::new().estimate(&samples, 44100);
        assert!(bpm.abs() < f32::EPSILON);
    }

    #[test]
    fn empty_input_has_no_tempo() {
        assert!(TempoEstimator::new().estimate(&[], 44100).abs() < f32::EPSILON);
    }
}

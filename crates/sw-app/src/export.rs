use std::path::Path;

use anyhow::{Context, Result};
use sw_core::ClipBuffer;

/// Extension used for finished mixes.
pub const OUTPUT_EXT: &str = "wav";

/// Write a clip as 16-bit mono PCM WAV.
///
/// Samples are clamped to [-1, 1] — overlay mixes can sum past full scale.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_wav(path: &Path, clip: &ClipBuffer) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for &sample in clip.samples() {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(value)?;
    }
    writer
        .finalize()
        .with_context(|| format!("Cannot finalize {}", path.display()))?;

    log::info!(
        "Wrote {:.2}s of audio to {}",
        clip.duration_secs(),
        path.display()
    );
    Ok(())
}

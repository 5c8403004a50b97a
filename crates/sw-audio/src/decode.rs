use std::fs::File;
use std::path::Path;

use sw_core::ClipBuffer;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AudioError;

/// Decode an audio file into a mono [`ClipBuffer`] at its native rate.
///
/// Supports WAV, MP3, M4A (AAC), FLAC, and OGG via symphonia. Multi-channel
/// sources are downmixed by averaging.
///
/// # Errors
/// Returns [`AudioError::Unreadable`] when the file cannot be opened, probed,
/// or decoded, and [`AudioError::Empty`] when decoding yields zero samples.
///
/// # Example
/// ```no_run
/// use sw_audio::decode::decode_file;
/// let clip = decode_file("sounds/rain.wav").unwrap();
/// ```
pub fn decode_file(path: impl AsRef<Path>) -> Result<ClipBuffer, AudioError> {
    decode_inner(path.as_ref(), None)
}

/// Decode at most the first `max_secs` seconds of an audio file.
///
/// The classification path is bounded to short prefixes; mixing decodes the
/// full clip with [`decode_file`].
///
/// # Errors
/// Same conditions as [`decode_file`].
pub fn decode_file_capped(path: impl AsRef<Path>, max_secs: f32) -> Result<ClipBuffer, AudioError> {
    decode_inner(path.as_ref(), Some(max_secs))
}

fn unreadable(path: &Path, reason: impl std::fmt::Display) -> AudioError {
    AudioError::Unreadable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Channel count used as the downmix divisor, clamped to at least one.
///
/// Codec parameters may carry no channel map, or an empty one; both would
/// otherwise produce a zero-width chunk walk over the sample buffer.
fn channel_count(params: &symphonia::core::codecs::CodecParameters) -> usize {
    params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count)
        .max(1)
}

fn decode_inner(path: &Path, max_secs: Option<f32>) -> Result<ClipBuffer, AudioError> {
    let file = File::open(path).map_err(|e| unreadable(path, e))?;
    let mss = MediaSourceStream::new(
        Box::new(file),
        symphonia::core::io::MediaSourceStreamOptions::default(),
    );

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| unreadable(path, e))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| unreadable(path, "no default audio track"))?;

    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let channels = channel_count(&track.codec_params);

    let max_samples = max_secs.map(|secs| (secs * sample_rate as f32) as usize);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| unreadable(path, e))?;

    let track_id = track.id;
    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut max_sample_frames: usize = 0;

    'packets: loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                log::warn!("Audio decode packet error: {e}");
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Audio decode frame error: {e}");
                continue;
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.capacity();
        // Reuse the SampleBuffer, reallocating only for a larger packet
        if sample_buf.is_none() || num_frames > max_sample_frames {
            sample_buf = Some(SampleBuffer::<f32>::new(num_frames as u64, spec));
            max_sample_frames = num_frames;
        }
        let Some(buf) = sample_buf.as_mut() else {
            continue;
        };
        buf.copy_interleaved_ref(decoded);

        // Downmix interleaved frames to mono
        for chunk in buf.samples().chunks(channels) {
            samples.push(chunk.iter().sum::<f32>() / channels as f32);
            if let Some(cap) = max_samples
                && samples.len() >= cap
            {
                break 'packets;
            }
        }
    }

    if samples.is_empty() {
        return Err(AudioError::Empty {
            path: path.display().to_string(),
        });
    }

    log::info!(
        "Decoded {} samples @ {sample_rate}Hz from {}",
        samples.len(),
        path.display()
    );

    Ok(ClipBuffer::new(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::audio::Channels;
    use symphonia::core::codecs::CodecParameters;

    #[test]
    fn missing_channel_map_downmixes_as_mono() {
        let params = CodecParameters::new();
        assert_eq!(channel_count(&params), 1);
    }

    #[test]
    fn empty_channel_map_downmixes_as_mono() {
        let mut params = CodecParameters::new();
        params.with_channels(Channels::empty());
        assert_eq!(channel_count(&params), 1);
    }

    #[test]
    fn stereo_channel_map_is_respected() {
        let mut params = CodecParameters::new();
        params.with_channels(Channels::FRONT_LEFT | Channels::FRONT_RIGHT);
        assert_eq!(channel_count(&params), 2);
    }
}

use std::path::Path;

use sw_core::{ClipType, FeatureVector, Mood};

use crate::decode::decode_file_capped;
use crate::features::extract_features;

/// Classification listens to at most this many seconds of a clip.
pub const MAX_ANALYSIS_SECS: f32 = 10.0;

type MoodPredicate = fn(&FeatureVector) -> bool;

/// Mood rules in strict priority order; the first match wins and the order
/// is part of the documented behavior.
const MOOD_RULES: &[(MoodPredicate, Mood)] = &[
    (|f| f.energy < 0.01, Mood::Quiet),
    (|f| f.tempo > 110.0 && f.energy > 0.05, Mood::Energetic),
    (|f| f.tempo < 90.0 && f.energy < 0.04, Mood::Calm),
];

/// Map extracted features plus a filename hint to a (mood, type) pair.
///
/// `None` features (the unclassifiable sentinel) force
/// (`unknown`, `unknown`) and bypass every rule.
///
/// # Example
/// ```
/// use sw_audio::classify;
/// use sw_core::{ClipType, FeatureVector, Mood};
///
/// let features = FeatureVector { tempo: 120.0, energy: 0.06, zero_crossing_rate: 0.2 };
/// assert_eq!(classify(Some(&features), "street_band.mp3"), (Mood::Energetic, ClipType::Music));
/// assert_eq!(classify(None, "broken.mp3"), (Mood::Unknown, ClipType::Unknown));
/// ```
#[must_use]
pub fn classify(features: Option<&FeatureVector>, filename: &str) -> (Mood, ClipType) {
    let Some(features) = features else {
        return (Mood::Unknown, ClipType::Unknown);
    };
    (mood_of(features), type_of(features, filename))
}

fn mood_of(features: &FeatureVector) -> Mood {
    MOOD_RULES
        .iter()
        .find(|(applies, _)| applies(features))
        .map_or(Mood::Neutral, |&(_, mood)| mood)
}

fn type_of(features: &FeatureVector, filename: &str) -> ClipType {
    let name = filename.to_lowercase();
    // The zero-crossing clause overlaps the final fallback; the precedence
    // is part of the documented behavior and is kept as-is.
    if name.contains("ambience") || name.contains("classroom") || features.zero_crossing_rate < 0.05
    {
        ClipType::Ambience
    } else if features.energy > 0.05 {
        ClipType::Music
    } else {
        ClipType::Ambience
    }
}

/// Classify an audio file from disk: decode the first
/// [`MAX_ANALYSIS_SECS`] seconds, extract features, apply the rules.
///
/// Never fails: decode errors and empty buffers are logged and degrade to
/// (`unknown`, `unknown`).
pub fn classify_file(path: impl AsRef<Path>) -> (Mood, ClipType) {
    let path = path.as_ref();
    let features = match decode_file_capped(path, MAX_ANALYSIS_SECS) {
        Ok(clip) => extract_features(&clip),
        Err(e) => {
            log::warn!("Classification fallback: {e}");
            None
        }
    };
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    classify(features.as_ref(), name)
}

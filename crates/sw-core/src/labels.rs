use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse perceptual mood of a clip.
///
/// Serialized as the lowercase name; parsing trims whitespace and ignores
/// case, and any unrecognized value maps to [`Mood::Unknown`] so a record is
/// never absent just because its label is unreadable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    Quiet,
    Energetic,
    Calm,
    Neutral,
    #[default]
    Unknown,
}

impl Mood {
    /// Lowercase canonical name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Energetic => "energetic",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a label leniently: trimmed, case-insensitive, unrecognized →
    /// [`Mood::Unknown`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Self::Quiet,
            "energetic" => Self::Energetic,
            "calm" => Self::Calm,
            "neutral" => Self::Neutral,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Mood {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<Mood> for String {
    fn from(value: Mood) -> Self {
        value.as_str().to_owned()
    }
}

/// Coarse acoustic type of a clip (same parsing rules as [`Mood`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClipType {
    Ambience,
    Music,
    #[default]
    Unknown,
}

impl ClipType {
    /// Lowercase canonical name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ambience => "ambience",
            Self::Music => "music",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a label leniently: trimmed, case-insensitive, unrecognized →
    /// [`ClipType::Unknown`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ambience" => Self::Ambience,
            "music" => Self::Music,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ClipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ClipType {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<ClipType> for String {
    fn from(value: ClipType) -> Self {
        value.as_str().to_owned()
    }
}

/// Signal features derived once per clip, never mutated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeatureVector {
    /// Estimated dominant beat rate in BPM (≥ 0, 0.0 when no beat is found).
    pub tempo: f32,
    /// Mean framed RMS amplitude (≥ 0).
    pub energy: f32,
    /// Mean fraction of adjacent-sample sign changes, in [0, 1].
    pub zero_crossing_rate: f32,
}

/// One labeled clip, keyed by filename.
///
/// Field renames match the metadata table header exactly
/// (`Filename,Location,Time,Mood,Type`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Mood")]
    pub mood: Mood,
    #[serde(rename = "Type")]
    pub kind: ClipType,
}

impl LabelRecord {
    /// Build a freshly classified record with the default free-text fields.
    #[must_use]
    pub fn classified(filename: impl Into<String>, mood: Mood, kind: ClipType) -> Self {
        Self {
            filename: filename.into(),
            location: "Unknown".to_owned(),
            time: "Unknown".to_owned(),
            mood,
            kind,
        }
    }
}

use std::fmt;
use std::str::FromStr;

use sw_core::{ClipBuffer, LabelRecord};

use crate::error::MixError;

/// The closed set of mixing strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MixStyle {
    /// Concatenation with a 1 s crossfade at each join.
    Sequential,
    /// Sample-wise sum of all three clips from offset zero.
    Overlay,
    /// Each clip reversed, plainly concatenated.
    Reversed,
    /// The three clips traversed twice, plainly concatenated.
    Looped,
    /// Each clip after the first followed by its own attenuated 1 s tail.
    Echo,
}

impl MixStyle {
    /// All styles, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Sequential,
        Self::Overlay,
        Self::Reversed,
        Self::Looped,
        Self::Echo,
    ];

    /// Lowercase canonical name (also the accepted spelling).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Overlay => "overlay",
            Self::Reversed => "reversed",
            Self::Looped => "looped",
            Self::Echo => "echo",
        }
    }
}

impl fmt::Display for MixStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MixStyle {
    type Err = MixError;

    /// Case-sensitive exact match against the five style names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| MixError::UnrecognizedStyle(s.to_owned()))
    }
}

/// One remix request: mood, style, and exactly three distinct filenames in
/// selection order. Ephemeral, built per request by the selector.
#[derive(Clone, Debug)]
pub struct MixPlan {
    /// Requested mood, normalized to trimmed lowercase.
    pub mood: String,
    /// Chosen strategy.
    pub style: MixStyle,
    /// The three selected filenames.
    pub filenames: [String; 3],
}

impl MixPlan {
    /// Output filename for this plan: `<mood>_remix_<style>.<ext>`.
    ///
    /// # Example
    /// ```
    /// use sw_mix::{MixPlan, MixStyle};
    /// let plan = MixPlan {
    ///     mood: "calm".into(),
    ///     style: MixStyle::Echo,
    ///     filenames: ["a.wav".into(), "b.wav".into(), "c.wav".into()],
    /// };
    /// assert_eq!(plan.output_name("wav"), "calm_remix_echo.wav");
    /// ```
    #[must_use]
    pub fn output_name(&self, ext: &str) -> String {
        format!("{}_remix_{}.{ext}", self.mood, self.style)
    }
}

/// The product of a successful mix request.
#[derive(Clone, Debug)]
pub struct MixResult {
    /// The combined waveform.
    pub combined: ClipBuffer,
    /// Human-readable title derived from the full mood pool.
    pub title: String,
    /// The three records actually mixed, in selection order.
    pub used: Vec<LabelRecord>,
}

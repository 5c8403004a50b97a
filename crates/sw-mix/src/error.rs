use thiserror::Error;

/// Errors originating from clip selection and mixing.
#[derive(Error, Debug)]
pub enum MixError {
    /// Fewer than three clips carry the requested mood. Recoverable: the
    /// caller surfaces it as a warning, no mix output is produced.
    #[error("Not enough clips for mood '{mood}': found {found}, need 3")]
    InsufficientPool {
        /// The requested mood.
        mood: String,
        /// Matching clip count.
        found: usize,
    },

    /// A style value outside the closed set reached the engine boundary.
    /// A configuration error, fatal to the current request only.
    #[error("Unrecognized mix style '{0}'")]
    UnrecognizedStyle(String),
}

use thiserror::Error;

/// Errors originating from the audio module.
#[derive(Error, Debug)]
pub enum AudioError {
    /// The file could not be opened, probed, or decoded.
    #[error("Unreadable audio {path}: {reason}")]
    Unreadable {
        /// Path of the offending file.
        path: String,
        /// Human-readable decoder diagnostic.
        reason: String,
    },

    /// Decoding succeeded but produced zero samples.
    #[error("Empty audio buffer: {path}")]
    Empty {
        /// Path of the offending file.
        path: String,
    },
}

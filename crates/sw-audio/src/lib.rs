// Audio decoding, feature extraction, and classification for soundweave.

pub mod classify;
pub mod decode;
pub mod error;
pub mod features;
pub mod fft;
pub mod tempo;

pub use classify::{classify, classify_file};
pub use error::AudioError;
pub use features::extract_features;

// Shared types and configuration for soundweave: the clip buffer, label
// enums, feature vector, and config logic used across the workspace.

pub mod clip;
pub mod config;
pub mod labels;

pub use clip::ClipBuffer;
pub use config::AppConfig;
pub use labels::{ClipType, FeatureVector, LabelRecord, Mood};

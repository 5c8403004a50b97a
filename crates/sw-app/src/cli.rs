use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// soundweave — mood-based sound clip classifier and remix engine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file. Missing file falls back to defaults.
    #[arg(short, long, default_value = "soundweave.toml")]
    pub config: PathBuf,

    /// Metadata table path (overrides the config).
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Directory holding the source clips (overrides the config).
    #[arg(long)]
    pub sounds_dir: Option<PathBuf>,

    /// Directory for finished mixes (overrides the config).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Seed for the random source (clip sampling, gain jitter).
    /// Unseeded runs are not reproducible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify audio files and upsert their records into the metadata table.
    Classify {
        /// Files to classify (mp3, wav, m4a, ...).
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Build a three-clip remix for a mood and write it as WAV.
    Remix {
        /// Target mood (case-insensitive): quiet, energetic, calm, neutral.
        #[arg(long)]
        mood: String,

        /// Mixing style: sequential, overlay, reversed, looped, echo.
        #[arg(long, default_value = "sequential")]
        style: String,
    },
}

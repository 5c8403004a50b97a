use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sw_core::AppConfig;

pub mod classify;
pub mod cli;
pub mod export;
pub mod remix;

fn main() -> Result<()> {
    // 1. Parse CLI
    let args = cli::Cli::parse();

    // 2. Initialize logging
    env_logger::Builder::new()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Resolve config and apply CLI overrides
    let mut config = AppConfig::load_or_default(&args.config)?;
    if let Some(metadata) = args.metadata {
        config.metadata_path = metadata;
    }
    if let Some(sounds_dir) = args.sounds_dir {
        config.sounds_dir = sounds_dir;
    }
    if let Some(out_dir) = args.out_dir {
        config.output_dir = out_dir;
    }

    // 4. Build the random source (seeded for reproducible runs)
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // 5. Dispatch
    match args.command {
        cli::Command::Classify { files } => classify::run(&config, &files),
        cli::Command::Remix { mood, style } => remix::run(&config, &mood, &style, &mut rng),
    }
}

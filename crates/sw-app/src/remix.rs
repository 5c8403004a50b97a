use std::str::FromStr;

use anyhow::{Context, Result};
use rand::Rng;
use sw_audio::decode::decode_file;
use sw_mix::{MixError, MixStyle, execute, select_for_mood};
use sw_store::MetadataStore;

use crate::export;

/// Build a three-clip remix for `mood` under `style` and write it as WAV.
///
/// An insufficient pool is reported as a warning and produces no output;
/// every other failure propagates.
pub fn run<R: Rng + ?Sized>(
    config: &sw_core::AppConfig,
    mood: &str,
    style: &str,
    rng: &mut R,
) -> Result<()> {
    let style = MixStyle::from_str(style)?;
    let store = MetadataStore::open(&config.metadata_path)
        .with_context(|| format!("Cannot open {}", config.metadata_path.display()))?;

    let selection = match select_for_mood(store.records(), mood, style, rng) {
        Ok(selection) => selection,
        Err(e @ MixError::InsufficientPool { .. }) => {
            log::warn!("{e}");
            eprintln!("{e}");
            let moods: Vec<&str> = store
                .distinct_moods()
                .into_iter()
                .map(sw_core::Mood::as_str)
                .collect();
            eprintln!("Available moods: {}", moods.join(", "));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let result = execute(
        &selection,
        |filename| Ok(decode_file(config.sounds_dir.join(filename))?),
        rng,
    )?;

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Cannot create {}", config.output_dir.display()))?;
    let out_path = config
        .output_dir
        .join(selection.plan.output_name(export::OUTPUT_EXT));
    export::write_wav(&out_path, &result.combined)?;

    println!("Mix created: {}", out_path.display());
    println!("Title: {}", result.title);
    println!("Sounds used in this mix:");
    for record in &result.used {
        println!(
            "  {} ({} / {}) from {}",
            record.filename, record.mood, record.kind, record.location
        );
    }
    Ok(())
}

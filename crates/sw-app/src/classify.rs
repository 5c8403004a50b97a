use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use sw_core::LabelRecord;
use sw_store::MetadataStore;

/// Classify each file and upsert its record into the metadata table.
///
/// Files are independent, so classification fans out across a thread pool;
/// the table writes stay sequential (the store is single-writer).
pub fn run(config: &sw_core::AppConfig, files: &[PathBuf]) -> Result<()> {
    let mut store = MetadataStore::open(&config.metadata_path)
        .with_context(|| format!("Cannot open {}", config.metadata_path.display()))?;

    let labeled: Vec<LabelRecord> = files
        .par_iter()
        .map(|path| {
            let (mood, kind) = sw_audio::classify_file(path);
            LabelRecord::classified(display_name(path), mood, kind)
        })
        .collect();

    for record in labeled {
        println!(
            "{} -> mood: {}, type: {}",
            record.filename, record.mood, record.kind
        );
        store.upsert(record)?;
    }

    log::info!("Classified {} file(s)", files.len());
    Ok(())
}

/// The bare filename used as the record key (falls back to the full path
/// for degenerate inputs).
fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| path.display().to_string(), ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::Mood;

    #[test]
    fn unreadable_files_still_get_records() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = sw_core::AppConfig {
            metadata_path: dir.path().join("metadata.csv"),
            sounds_dir: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
        };

        run(&config, &[dir.path().join("missing.mp3")])?;

        let store = MetadataStore::open(&config.metadata_path)?;
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].filename, "missing.mp3");
        assert_eq!(store.records()[0].mood, Mood::Unknown);
        Ok(())
    }

    #[test]
    fn reclassification_replaces_the_record() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = sw_core::AppConfig {
            metadata_path: dir.path().join("metadata.csv"),
            sounds_dir: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
        };

        let file = dir.path().join("missing.mp3");
        run(&config, &[file.clone()])?;
        run(&config, &[file])?;

        let store = MetadataStore::open(&config.metadata_path)?;
        assert_eq!(store.len(), 1);
        Ok(())
    }
}

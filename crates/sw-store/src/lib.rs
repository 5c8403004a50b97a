// Tabular clip metadata persistence for soundweave.

pub mod error;

use std::path::{Path, PathBuf};

use sw_core::{LabelRecord, Mood};

pub use error::StoreError;

/// The clip metadata table, persisted as CSV
/// (`Filename,Location,Time,Mood,Type`, header row present).
///
/// Upserts are keyed by filename and rewrite the whole table. The store
/// assumes a single writer; concurrent writers are out of contract.
///
/// # Example
/// ```no_run
/// use sw_core::{ClipType, LabelRecord, Mood};
/// use sw_store::MetadataStore;
///
/// let mut store = MetadataStore::open("metadata.csv").unwrap();
/// store
///     .upsert(LabelRecord::classified("rain.wav", Mood::Calm, ClipType::Ambience))
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct MetadataStore {
    path: PathBuf,
    records: Vec<LabelRecord>,
}

impl MetadataStore {
    /// Open a store, loading the table if the file exists.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first upsert.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            Self::read_table(&path)?
        } else {
            log::info!("No metadata table at {}, starting empty", path.display());
            Vec::new()
        };
        Ok(Self { path, records })
    }

    fn read_table(path: &Path) -> Result<Vec<LabelRecord>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(|e| StoreError::table(path, e))?;
        let records = reader
            .deserialize()
            .collect::<Result<Vec<LabelRecord>, _>>()
            .map_err(|e| StoreError::table(path, e))?;
        log::debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// All records, in table order.
    #[must_use]
    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose mood matches `mood` (trimmed, case-insensitive).
    ///
    /// Matching compares the normalized request against each record's label
    /// string, so an unrecognized mood matches nothing rather than falling
    /// back to unknown-labeled records.
    #[must_use]
    pub fn for_mood(&self, mood: &str) -> Vec<&LabelRecord> {
        let target = mood.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| r.mood.as_str() == target)
            .collect()
    }

    /// Distinct moods present in the table, in first-appearance order.
    #[must_use]
    pub fn distinct_moods(&self) -> Vec<Mood> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.mood) {
                seen.push(record.mood);
            }
        }
        seen
    }

    /// Insert or replace the record with the same filename, then persist
    /// the whole table.
    ///
    /// # Errors
    /// Returns an error if the table cannot be written.
    pub fn upsert(&mut self, record: LabelRecord) -> Result<(), StoreError> {
        self.records.retain(|r| r.filename != record.filename);
        log::info!(
            "(Re)Added: {} -> mood {}, type {}",
            record.filename,
            record.mood,
            record.kind
        );
        self.records.push(record);
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let mut writer =
            csv::Writer::from_path(&self.path).map_err(|e| StoreError::table(&self.path, e))?;
        for record in &self.records {
            writer
                .serialize(record)
                .map_err(|e| StoreError::table(&self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

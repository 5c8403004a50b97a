use std::path::Path;

use thiserror::Error;

/// Errors originating from the metadata store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The table could not be read, parsed, or serialized.
    #[error("Metadata table error at {path}: {source}")]
    Table {
        /// Path of the table.
        path: String,
        /// Underlying CSV diagnostic.
        #[source]
        source: csv::Error,
    },

    /// Plain I/O failure on the table file.
    #[error("Metadata I/O error at {path}: {source}")]
    Io {
        /// Path of the table.
        path: String,
        /// Underlying I/O diagnostic.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wrap a CSV error with the table path.
    #[must_use]
    pub fn table(path: impl AsRef<Path>, source: csv::Error) -> Self {
        Self::Table {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Wrap an I/O error with the table path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

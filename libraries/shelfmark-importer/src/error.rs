//! Error types for the importer

use shelfmark_core::ShelfmarkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export is missing a recognizable {0} column")]
    MissingColumn(&'static str),

    #[error("Invalid match configuration: {0}")]
    InvalidConfig(String),
}

impl From<ImportError> for ShelfmarkError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Io(e) => ShelfmarkError::Io(e),
            ImportError::InvalidConfig(msg) => ShelfmarkError::Config(msg),
            other => ShelfmarkError::Parse(other.to_string()),
        }
    }
}

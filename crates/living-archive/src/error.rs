//! Error types for archive operations.
//!
//! [`ArchiveError`] wraps everything that can go wrong between reading a
//! dataset and writing a rendered lineage. Layout computation itself cannot
//! fail; relation names that match no record are modeled as unknown nodes.

use std::io;

use thiserror::Error;

use living_archive_dataset::DatasetError;

/// The main error type for archive operations.
///
/// # Diagnostic Variants
///
/// The `Dataset` variant keeps the structured dataset issues, including byte
/// offsets into the source text for syntax errors, so front ends can point at
/// the offending record.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("No entity named `{0}` in the archive")]
    EntityNotFound(String),

    #[error("No image prompt for `{0}`")]
    MissingPrompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for ArchiveError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

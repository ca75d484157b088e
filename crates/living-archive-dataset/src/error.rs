//! Errors raised while reading or writing the dataset.
//!
//! Syntax and shape problems carry the byte offset of the offending location
//! in the source text, so front ends can point at it.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// A single problem found in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    message: String,
    offset: Option<usize>,
    record: Option<usize>,
    help: Option<String>,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
            record: None,
            help: None,
        }
    }

    /// Attaches the byte offset in the source text.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attaches the index of the record in the dataset array.
    pub fn with_record(mut self, record: usize) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn record(&self) -> Option<usize> {
        self.record
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(record) => write!(f, "record #{record}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Errors for dataset loading and saving.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write dataset `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Malformed JSON, or JSON that does not have the shape of an entity list.
    #[error("{issue}")]
    Syntax { issue: Issue, src: String },

    /// Well-formed records that break a dataset rule.
    #[error("{} invalid record(s) in dataset", issues.len())]
    Invalid { issues: Vec<Issue> },

    #[error("failed to serialize dataset: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl DatasetError {
    /// Returns the issues carried by this error, if any.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Syntax { issue, .. } => std::slice::from_ref(issue),
            Self::Invalid { issues } => issues,
            _ => &[],
        }
    }

    /// Returns the source text a syntax error refers to.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Self::Syntax { src, .. } => Some(src),
            _ => None,
        }
    }
}

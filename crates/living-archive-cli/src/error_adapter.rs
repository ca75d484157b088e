//! Error adapter for converting ArchiveError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A dataset that fails validation carries one [`Issue`] per offending
//! record; each issue is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use living_archive::ArchiveError;
use living_archive_dataset::{DatasetError, Issue};

/// Adapter for a single dataset issue.
///
/// Syntax issues come with the dataset source text, so the offending
/// location is shown as a labeled snippet.
pub struct IssueAdapter<'a> {
    issue: &'a Issue,
    /// Source text, present for syntax errors
    src: Option<&'a str>,
}

impl<'a> IssueAdapter<'a> {
    pub fn new(issue: &'a Issue, src: Option<&'a str>) -> Self {
        Self { issue, src }
    }
}

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueAdapter")
            .field("issue", &self.issue)
            .finish()
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.issue, f)
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = if self.src.is_some() {
            "living_archive::dataset::syntax"
        } else {
            "living_archive::dataset::invalid"
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.issue
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src
            .as_ref()
            .map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let src = self.src?;
        let offset = self.issue.offset()?.min(src.len());
        // Highlight the character at the offset, nothing past the end
        let len = src
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        let span = SourceSpan::new(offset.into(), len);
        let label = LabeledSpan::new_primary_with_span(Some(self.issue.message().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`ArchiveError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a ArchiveError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArchiveError::Io(_) => "living_archive::io",
            ArchiveError::Dataset(_) => "living_archive::dataset",
            ArchiveError::EntityNotFound(_) => "living_archive::not_found",
            ArchiveError::MissingPrompt(_) => "living_archive::missing_prompt",
            ArchiveError::Config(_) => "living_archive::config",
            ArchiveError::Export(_) => "living_archive::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ArchiveError::EntityNotFound(_) => Some(Box::new(
                "names match ignoring case; try `archive search <word>` to find one",
            )),
            ArchiveError::MissingPrompt(_) => Some(Box::new(
                "fill `appearance.image_generation_prompt` of the record in the dataset",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A dataset issue, with a source snippet for syntax errors.
    Issue(IssueAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Issue(i) => i.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Issue(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`ArchiveError`] into a list of reportable errors.
///
/// Dataset syntax and validation errors yield one [`Reportable`] per issue.
/// Every other error yields a single [`Reportable`].
pub fn to_reportables(err: &ArchiveError) -> Vec<Reportable<'_>> {
    match err {
        ArchiveError::Dataset(
            dataset_err @ (DatasetError::Syntax { .. } | DatasetError::Invalid { .. }),
        ) => dataset_err
            .issues()
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter::new(issue, dataset_err.source_text())))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_points_at_offset() {
        let err = ArchiveError::Dataset(DatasetError::Syntax {
            issue: Issue::new("trailing comma")
                .with_offset(3)
                .with_help("remove the comma"),
            src: "[{},]".to_string(),
        });

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "trailing comma");
        assert!(reportables[0].source_code().is_some());
        assert_eq!(reportables[0].help().unwrap().to_string(), "remove the comma");

        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 3);
        assert_eq!(labels[0].len(), 1);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_offset_at_end_of_source() {
        let issue = Issue::new("unexpected end of input").with_offset(99);
        let adapter = IssueAdapter::new(&issue, Some("[{"));

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 2);
        assert_eq!(labels[0].len(), 0);
    }

    #[test]
    fn test_each_invalid_record_is_separate() {
        let err = ArchiveError::Dataset(DatasetError::Invalid {
            issues: vec![
                Issue::new("empty name").with_record(0),
                Issue::new("duplicate name `Anansi`").with_record(4),
            ],
        });

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "record #0: empty name");
        assert_eq!(reportables[1].to_string(), "record #4: duplicate name `Anansi`");
        assert!(reportables[1].source_code().is_none());
        assert!(reportables[1].labels().is_none());
        assert_eq!(
            reportables[1].code().unwrap().to_string(),
            "living_archive::dataset::invalid"
        );
    }

    #[test]
    fn test_plain_error() {
        let err = ArchiveError::EntityNotFound("Aso".to_string());

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "No entity named `Aso` in the archive");
                assert_eq!(e.code().unwrap().to_string(), "living_archive::not_found");
                assert!(e.help().is_some());
            }
            Reportable::Issue(_) => panic!("Expected Error"),
        }
    }
}

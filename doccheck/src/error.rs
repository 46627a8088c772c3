//! Error types for documentation validation.

use std::path::PathBuf;

use serde::Serialize;

/// The kind of defect a rule detected.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required path is absent, or is not a regular file.
    MissingFile,
    /// The document does not open with a `---` block, the block is unclosed,
    /// or a required field is absent or empty.
    MalformedFrontmatter,
    /// A required literal substring does not occur in the document.
    MissingContent,
    /// The file exists but could not be read (permissions, encoding, size limit).
    IoError,
}

impl ErrorKind {
    /// Short tag used in human-readable output.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::MissingFile => "missing file",
            Self::MalformedFrontmatter => "malformed frontmatter",
            Self::MissingContent => "missing content",
            Self::IoError => "io error",
        }
    }
}

/// A single defect found while evaluating a rule.
///
/// Defects are data, not control flow: a failing rule records one of these
/// per missing file, field or substring and validation carries on.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationError {
    /// Path of the offending file, relative to the validation root.
    pub file: PathBuf,
    /// The kind of defect.
    pub kind: ErrorKind,
    /// The missing substring, the missing frontmatter field, or the missing
    /// delimiter. `None` for missing files and I/O failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Human-readable description of the defect.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn missing_file(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind: ErrorKind::MissingFile,
            expected: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn malformed_frontmatter(
        file: impl Into<PathBuf>,
        expected: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            kind: ErrorKind::MalformedFrontmatter,
            expected: Some(expected.to_owned()),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn missing_content(file: impl Into<PathBuf>, substring: &str) -> Self {
        Self {
            file: file.into(),
            kind: ErrorKind::MissingContent,
            expected: Some(substring.to_owned()),
            message: "Required text not found".to_owned(),
        }
    }

    #[must_use]
    pub fn io(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind: ErrorKind::IoError,
            expected: None,
            message: message.into(),
        }
    }

    /// Format the error for human-readable output.
    ///
    /// `{file}: [{kind}] {message} [{expected}]`, the bracketed expectation
    /// omitted when there is none.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match &self.expected {
            Some(expected) => format!(
                "{}: [{}] {} [{}]",
                self.file.display(),
                self.kind.tag(),
                self.message,
                expected
            ),
            None => format!(
                "{}: [{}] {}",
                self.file.display(),
                self.kind.tag(),
                self.message
            ),
        }
    }
}

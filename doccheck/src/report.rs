//! Validation report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{ErrorKind, ValidationError};

/// Which check produced an outcome.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CheckKind {
    /// A path listed in `required_files`.
    RequiredFile,
    /// A Markdown document found under a frontmatter root.
    Frontmatter,
    /// A content rule.
    Content,
}

/// Pass/fail result of one rule instance.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct RuleOutcome {
    pub check: CheckKind,
    /// File (or frontmatter root) the rule targets, relative to the validation root.
    pub target: PathBuf,
    /// Optional rule label from the ruleset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub passed: bool,
    /// Every defect found; empty iff `passed`.
    pub errors: Vec<ValidationError>,
}

impl RuleOutcome {
    #[must_use]
    pub fn new(
        check: CheckKind,
        target: impl Into<PathBuf>,
        name: Option<String>,
        errors: Vec<ValidationError>,
    ) -> Self {
        Self {
            check,
            target: target.into(),
            name,
            passed: errors.is_empty(),
            errors,
        }
    }
}

/// Result of a validation run.
///
/// `ok` is true iff every outcome passed. Outcomes are ordered: required
/// files, then content rules (both in ruleset order), then frontmatter
/// outcomes sorted by path.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// The directory the ruleset was evaluated against.
    pub root: PathBuf,
    /// Number of Markdown documents discovered under frontmatter roots.
    pub scanned_files: usize,
    pub ok: bool,
    pub outcomes: Vec<RuleOutcome>,
}

impl ValidationReport {
    #[must_use]
    pub fn new(root: PathBuf, scanned_files: usize, outcomes: Vec<RuleOutcome>) -> Self {
        let ok = outcomes.iter().all(|o| o.passed);
        Self {
            root,
            scanned_files,
            ok,
            outcomes,
        }
    }

    /// Number of rule instances evaluated.
    #[must_use]
    pub fn rules_checked(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of rule instances that failed.
    #[must_use]
    pub fn rules_failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    /// All defects across all outcomes, in outcome order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.outcomes.iter().flat_map(|o| o.errors.iter())
    }

    /// Number of defects found.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of defects of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors().filter(|e| e.kind == kind).count()
    }
}

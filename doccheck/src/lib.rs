//! # doccheck
//!
//! Content contract validator for Markdown documentation trees.
//!
//! A [`Ruleset`] declares which files must exist, which directories hold
//! documents that must open with `id`/`title` frontmatter, and which literal
//! substrings specific files must contain. [`validate`] evaluates every rule
//! against a directory and returns one outcome per rule instance; it never
//! stops at the first defect.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use doccheck::{validate, ContentRule, Ruleset};
//!
//! let mut ruleset = Ruleset::default();
//! ruleset.required_files = vec!["docs/api/errors.md".to_owned()];
//! ruleset.content_rules = vec![ContentRule::new(
//!     "docs/api/collection/status.md",
//!     ["GET", "/status/", "COMPLETED", "PENDING", "FAILED"],
//! )];
//!
//! let report = validate(Path::new("."), &ruleset).unwrap();
//! println!("Rules checked: {}", report.rules_checked());
//! println!("Errors: {}", report.errors_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
mod format;
pub mod output;
mod report;
pub mod ruleset;
mod strategy;
mod validator;

use std::path::Path;

use anyhow::Context;

pub use config::FsSourceConfig;
pub use error::{ErrorKind, ValidationError};
pub use report::{CheckKind, RuleOutcome, ValidationReport};
pub use ruleset::{ContentRule, FrontmatterRule, Ruleset, RulesetError};

use strategy::fs::compile_excludes;
use validator::{check_content_rule, check_frontmatter_roots, check_required_file};

/// Validate a documentation tree against a ruleset with default filesystem options.
///
/// # Errors
///
/// See [`validate_with`].
pub fn validate(root: &Path, ruleset: &Ruleset) -> anyhow::Result<ValidationReport> {
    validate_with(root, ruleset, &FsSourceConfig::default())
}

/// Validate a documentation tree against a ruleset.
///
/// Rule failures are reported in the returned [`ValidationReport`], never as
/// `Err`. Reads are read-only and each file is read at most once per rule.
///
/// # Errors
///
/// Returns an error only when the run cannot start: `root` does not exist or
/// is not a directory, the ruleset fails [`Ruleset::check`], or an exclude
/// pattern does not parse.
pub fn validate_with(
    root: &Path,
    ruleset: &Ruleset,
    fs_config: &FsSourceConfig,
) -> anyhow::Result<ValidationReport> {
    if !root.exists() {
        anyhow::bail!("Root does not exist: {}", root.display());
    }
    if !root.is_dir() {
        anyhow::bail!("Root is not a directory: {}", root.display());
    }
    ruleset.check()?;
    let exclude_patterns = compile_excludes(&fs_config.exclude)?;

    let canonical_root = root
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize root {}", root.display()))?;
    tracing::debug!(root = %canonical_root.display(), "validating documentation tree");

    let mut outcomes =
        Vec::with_capacity(ruleset.required_files.len() + ruleset.content_rules.len());

    for rel in &ruleset.required_files {
        outcomes.push(check_required_file(&canonical_root, rel));
    }

    for rule in &ruleset.content_rules {
        outcomes.push(check_content_rule(&canonical_root, rule, fs_config));
    }

    let mut scanned_files = 0;
    if let Some(frontmatter) = &ruleset.frontmatter {
        let (frontmatter_outcomes, discovered) =
            check_frontmatter_roots(&canonical_root, frontmatter, fs_config, &exclude_patterns);
        outcomes.extend(frontmatter_outcomes);
        scanned_files = discovered;
    }

    for failed in outcomes.iter().filter(|o| !o.passed) {
        tracing::debug!(
            target_path = %failed.target.display(),
            errors = failed.errors.len(),
            "rule failed"
        );
    }

    let report = ValidationReport::new(root.to_path_buf(), scanned_files, outcomes);
    tracing::info!(
        rules = report.rules_checked(),
        failed = report.rules_failed(),
        documents = report.scanned_files,
        "validation finished"
    );
    Ok(report)
}

//! Per-rule checks.
//!
//! Each function evaluates one rule instance and returns its outcome. None of
//! them short-circuits the run: every defect becomes a `ValidationError`.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::config::FsSourceConfig;
use crate::error::ValidationError;
use crate::format::frontmatter::check_frontmatter;
use crate::report::{CheckKind, RuleOutcome};
use crate::ruleset::{ContentRule, FrontmatterRule};
use crate::strategy::fs::{find_markdown_files, read_file_bounded, resolve_file};

/// Substrings of `required` that do not occur verbatim in `content`.
pub fn missing_substrings<'a>(
    content: &str,
    required: &'a [String],
) -> impl Iterator<Item = &'a str> {
    required
        .iter()
        .map(String::as_str)
        .filter(move |needle| !content.contains(needle))
}

pub fn check_required_file(root: &Path, rel: &str) -> RuleOutcome {
    // Existing is not enough: the file must also be readable.
    let errors = match resolve_file(root, rel).and_then(|path| {
        std::fs::File::open(path)
            .map(drop)
            .map_err(|e| ValidationError::io(rel, format!("Failed to open file: {e}")))
    }) {
        Ok(()) => Vec::new(),
        Err(e) => vec![e],
    };
    RuleOutcome::new(CheckKind::RequiredFile, rel, None, errors)
}

pub fn check_content_rule(
    root: &Path,
    rule: &ContentRule,
    config: &FsSourceConfig,
) -> RuleOutcome {
    let outcome = |errors: Vec<ValidationError>| {
        RuleOutcome::new(CheckKind::Content, &rule.path, rule.name.clone(), errors)
    };

    let path = match resolve_file(root, &rule.path) {
        Ok(p) => p,
        Err(e) => return outcome(vec![e]),
    };

    let content = match read_file_bounded(&path, Path::new(&rule.path), config.max_file_size) {
        Ok(c) => c,
        Err(e) => return outcome(vec![e]),
    };

    let errors = missing_substrings(&content, &rule.contains)
        .map(|needle| ValidationError::missing_content(&rule.path, needle))
        .collect();
    outcome(errors)
}

/// Frontmatter outcomes for every document under the rule's roots, plus the
/// number of documents discovered.
pub fn check_frontmatter_roots(
    root: &Path,
    rule: &FrontmatterRule,
    config: &FsSourceConfig,
    exclude_patterns: &[Pattern],
) -> (Vec<RuleOutcome>, usize) {
    let mut outcomes = Vec::new();
    let mut documents: Vec<(PathBuf, PathBuf)> = Vec::new();

    for scan_root in &rule.roots {
        let abs = root.join(scan_root);
        if !abs.exists() {
            outcomes.push(RuleOutcome::new(
                CheckKind::Frontmatter,
                scan_root,
                None,
                vec![ValidationError::missing_file(
                    scan_root,
                    "Frontmatter root does not exist",
                )],
            ));
            continue;
        }

        let discovery = find_markdown_files(root, &abs, config, exclude_patterns);
        outcomes.extend(discovery.errors.into_iter().map(|e| {
            let target = e.file.clone();
            RuleOutcome::new(CheckKind::Frontmatter, target, None, vec![e])
        }));
        documents.extend(discovery.files);
    }

    // Overlapping roots ("docs" and "docs/api") must not check a document twice.
    documents.sort();
    documents.dedup();

    for (abs, rel) in &documents {
        tracing::trace!(path = %rel.display(), "checking frontmatter");
        let errors = match read_file_bounded(abs, rel, config.max_file_size) {
            Ok(content) => check_frontmatter(&content, rel, &rule.fields),
            Err(e) => vec![e],
        };
        outcomes.push(RuleOutcome::new(CheckKind::Frontmatter, rel, None, errors));
    }

    (outcomes, documents.len())
}

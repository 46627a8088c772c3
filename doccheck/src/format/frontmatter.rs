//! Frontmatter extraction for Markdown documents.
//!
//! Only the subset needed for validation is understood: a leading `---`
//! line, top-level `key: value` lines, and a closing `---` line. Nested YAML
//! is ignored rather than parsed.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Frontmatter block delimiter.
pub const DELIMITER: &str = "---";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Top-level `key: value` line. Indented lines belong to nested values.
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)[ \t]*:(.*)$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid frontmatter field regex: {err}"),
    }
});

/// Why a document's frontmatter could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockDefect {
    /// Trimmed content does not start with `---`.
    MissingDelimiter,
    /// No closing `---` line.
    Unclosed,
}

/// Fields of a frontmatter block, in document order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> Frontmatter<'a> {
    /// Value of the first occurrence of `key`, quotes stripped.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// Extract the frontmatter block from document content.
///
/// Surrounding whitespace and a byte-order mark are ignored.
pub fn extract(content: &'_ str) -> Result<Frontmatter<'_>, BlockDefect> {
    let mut lines = content
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .lines();

    match lines.next() {
        Some(first) if first.starts_with(DELIMITER) => {}
        _ => return Err(BlockDefect::MissingDelimiter),
    }

    let mut frontmatter = Frontmatter::default();
    for line in lines {
        if line.trim() == DELIMITER {
            return Ok(frontmatter);
        }
        if let Some(caps) = FIELD_LINE.captures(line)
            && let (Some(key), Some(value)) = (caps.get(1), caps.get(2))
        {
            frontmatter
                .fields
                .push((key.as_str(), unquote(value.as_str().trim())));
        }
    }

    Err(BlockDefect::Unclosed)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    value
}

/// Check a document's frontmatter against the required fields.
///
/// A block-level defect yields a single error. Otherwise one error is
/// reported per required field that is absent or empty.
pub fn check_frontmatter(
    content: &str,
    path: &Path,
    required_fields: &[String],
) -> Vec<ValidationError> {
    let frontmatter = match extract(content) {
        Ok(f) => f,
        Err(BlockDefect::MissingDelimiter) => {
            return vec![ValidationError::malformed_frontmatter(
                path,
                DELIMITER,
                "Document does not start with a frontmatter block",
            )];
        }
        Err(BlockDefect::Unclosed) => {
            return vec![ValidationError::malformed_frontmatter(
                path,
                DELIMITER,
                "Frontmatter block is not closed",
            )];
        }
    };

    required_fields
        .iter()
        .filter_map(|field| match frontmatter.get(field) {
            None => Some(ValidationError::malformed_frontmatter(
                path,
                field,
                "Frontmatter field is missing",
            )),
            Some("") => Some(ValidationError::malformed_frontmatter(
                path,
                field,
                "Frontmatter field is empty",
            )),
            Some(_) => None,
        })
        .collect()
}

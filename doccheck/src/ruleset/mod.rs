//! Declarative content contracts.
//!
//! A [`Ruleset`] is plain data: which files must exist, which directories
//! hold documents that need frontmatter, and which literal substrings each
//! targeted file must contain. It can be built in code, loaded from a YAML or
//! JSON file, or taken from the built-in contract in [`builtin`].

pub mod builtin;

use std::path::{Component, Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frontmatter fields required when a ruleset does not name its own.
pub const DEFAULT_FRONTMATTER_FIELDS: &[&str] = &["id", "title"];

/// Reasons a ruleset is rejected before any file is read.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesetError {
    #[error("Ruleset is empty: no required files, frontmatter roots or content rules")]
    Empty,

    #[error("Ruleset path is empty")]
    EmptyPath,

    #[error("Ruleset path '{path}' must be relative to the validation root")]
    AbsolutePath { path: String },

    #[error("Ruleset path '{path}' must not contain '..'")]
    ParentTraversal { path: String },

    #[error("Content rule for '{path}' lists no required text")]
    EmptyContentRule { path: String },

    #[error("Content rule for '{path}' contains an empty substring")]
    EmptySubstring { path: String },

    #[error("Frontmatter rule lists no required fields")]
    NoFrontmatterFields,

    #[error("Unsupported ruleset format '{path}': expected .yaml, .yml or .json")]
    UnsupportedFormat { path: String },
}

/// Every Markdown document under `roots` must open with a frontmatter block
/// holding non-empty values for each of `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct FrontmatterRule {
    pub roots: Vec<String>,
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

fn default_fields() -> Vec<String> {
    DEFAULT_FRONTMATTER_FIELDS
        .iter()
        .map(|f| (*f).to_owned())
        .collect()
}

impl FrontmatterRule {
    /// Rule over `roots` requiring the default `id` and `title` fields.
    #[must_use]
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            fields: default_fields(),
        }
    }

    /// Replace the required fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// The file at `path` must contain every string in `contains`, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct ContentRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
    pub contains: Vec<String>,
}

impl ContentRule {
    #[must_use]
    pub fn new<I, S>(path: impl Into<String>, contains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            path: path.into(),
            contains: contains.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a label shown in reports.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The full content contract for a documentation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Ruleset {
    #[serde(default)]
    pub required_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<FrontmatterRule>,
    #[serde(default)]
    pub content_rules: Vec<ContentRule>,
}

impl Ruleset {
    /// Built-in contract for the payments API documentation site.
    #[must_use]
    pub fn payments_portal() -> Self {
        builtin::payments_portal()
    }

    /// Parse a ruleset from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML, does not match the
    /// ruleset shape, or fails [`Ruleset::check`].
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let ruleset: Self = serde_saphyr::from_str(content)
            .map_err(|e| anyhow::anyhow!("Invalid YAML ruleset: {e}"))?;
        ruleset.check()?;
        Ok(ruleset)
    }

    /// Parse a ruleset from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON, does not match the
    /// ruleset shape, or fails [`Ruleset::check`].
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let ruleset: Self = serde_json::from_str(content).context("Invalid JSON ruleset")?;
        ruleset.check()?;
        Ok(ruleset)
    }

    /// Load a ruleset file, picking the parser from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not `.yaml`, `.yml` or `.json`,
    /// if the file cannot be read, or if parsing fails.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = path.extension().and_then(|e| e.to_str());
        if !matches!(format, Some("yaml" | "yml" | "json")) {
            return Err(RulesetError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ruleset {}", path.display()))?;

        let ruleset = if format == Some("json") {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        ruleset.with_context(|| format!("Failed to load ruleset {}", path.display()))
    }

    /// Whether the ruleset has nothing to check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required_files.is_empty()
            && self.content_rules.is_empty()
            && self.frontmatter.as_ref().is_none_or(|f| f.roots.is_empty())
    }

    /// Verify the ruleset is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first [`RulesetError`] found: an empty ruleset, a path that
    /// is empty, absolute or escapes the root, a content rule without
    /// substrings or with an empty one, or a frontmatter rule without fields.
    pub fn check(&self) -> Result<(), RulesetError> {
        if self.is_empty() {
            return Err(RulesetError::Empty);
        }

        for path in &self.required_files {
            check_relative(path)?;
        }

        if let Some(frontmatter) = &self.frontmatter {
            for root in &frontmatter.roots {
                check_relative(root)?;
            }
            if frontmatter.fields.is_empty() {
                return Err(RulesetError::NoFrontmatterFields);
            }
        }

        for rule in &self.content_rules {
            check_relative(&rule.path)?;
            if rule.contains.is_empty() {
                return Err(RulesetError::EmptyContentRule {
                    path: rule.path.clone(),
                });
            }
            if rule.contains.iter().any(String::is_empty) {
                return Err(RulesetError::EmptySubstring {
                    path: rule.path.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_relative(path: &str) -> Result<(), RulesetError> {
    if path.trim().is_empty() {
        return Err(RulesetError::EmptyPath);
    }
    for component in Path::new(path).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(RulesetError::AbsolutePath {
                    path: path.to_owned(),
                });
            }
            Component::ParentDir => {
                return Err(RulesetError::ParentTraversal {
                    path: path.to_owned(),
                });
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

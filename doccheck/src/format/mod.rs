//! Document format helpers.
//!
//! - `frontmatter`: leading `---` metadata block of Markdown documents

pub mod frontmatter;

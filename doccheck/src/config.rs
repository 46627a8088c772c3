//! Filesystem options for a validation run.
//!
//! What a documentation tree must contain lives in the [`Ruleset`](crate::Ruleset);
//! this struct only controls how files are discovered and read.

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Exclude patterns (glob format), matched against the path relative to
    /// the validation root and against the bare file name.
    pub exclude: Vec<String>,
    /// Extensions (without the dot) treated as Markdown during discovery.
    pub extensions: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    /// Larger files are reported as I/O errors instead of being read.
    pub max_file_size: u64,
    /// Maximum directory traversal depth below a frontmatter root (default: 64).
    /// Directories holding deeper entries are reported as I/O errors.
    pub max_depth: usize,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            extensions: vec!["md".to_owned(), "mdx".to_owned()],
            max_file_size: 10_485_760,
            max_depth: 64,
        }
    }
}

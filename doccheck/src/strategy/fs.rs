//! Filesystem validation source.
//!
//! Resolves ruleset paths under the validation root, discovers Markdown
//! documents, and reads them for the validation pipeline.
//! Properties enforced here:
//! - Symlinks found during discovery are skipped, never followed
//! - Resolved required paths are checked to remain within the root
//! - Device files, pipes and sockets are skipped
//! - Maximum directory depth is enforced and cut-off directories are reported
//! - Bounded reads cap memory use per file

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::ValidationError;

/// Compile exclude globs.
///
/// # Errors
///
/// Returns an error naming the first pattern that does not parse.
pub fn compile_excludes(exclude: &[String]) -> anyhow::Result<Vec<Pattern>> {
    exclude
        .iter()
        .map(|pat_str| {
            Pattern::new(pat_str)
                .map_err(|e| anyhow::anyhow!("Invalid exclude glob pattern '{pat_str}': {e}"))
        })
        .collect()
}

/// Check if a relative path matches any of the exclude patterns
fn matches_exclude(rel_path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = rel_path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || rel_path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Check if the file has one of the configured Markdown extensions.
pub fn is_markdown(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// Resolve a ruleset path to a regular file under `root`.
///
/// `root` must already be canonical. Absent paths and directories are
/// `MissingFile`; paths that resolve outside the root are I/O errors.
pub fn resolve_file(root: &Path, rel: &str) -> Result<PathBuf, ValidationError> {
    let candidate = root.join(rel);

    let canonical = match candidate.canonicalize() {
        Ok(p) => p,
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
            ) =>
        {
            return Err(ValidationError::missing_file(
                rel,
                "Required file does not exist",
            ));
        }
        Err(e) => {
            return Err(ValidationError::io(
                rel,
                format!("Failed to resolve path: {e}"),
            ));
        }
    };

    if !canonical.starts_with(root) {
        return Err(ValidationError::io(
            rel,
            format!(
                "Path resolves outside the validation root: {}",
                canonical.display()
            ),
        ));
    }

    match canonical.metadata() {
        Ok(meta) if meta.is_file() => Ok(canonical),
        Ok(meta) if meta.is_dir() => Err(ValidationError::missing_file(
            rel,
            "Required path is a directory, not a file",
        )),
        Ok(_) => Err(ValidationError::missing_file(
            rel,
            "Required path is not a regular file",
        )),
        Err(e) => Err(ValidationError::io(
            rel,
            format!("Failed to stat file: {e}"),
        )),
    }
}

/// Markdown documents found under one frontmatter root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// `(absolute path, path relative to the validation root)`, sorted.
    pub files: Vec<(PathBuf, PathBuf)>,
    /// Walk errors such as permission denied, plus one error per directory
    /// whose contents lie below `max_depth`.
    pub errors: Vec<ValidationError>,
}

/// Find every Markdown document under `scan_root`.
///
/// `root` is the canonical validation root; reported paths are relative to
/// it. Walk errors are returned, never discarded. Every subdirectory is
/// visited; only `exclude_patterns` opt documents out.
pub fn find_markdown_files(
    root: &Path,
    scan_root: &Path,
    config: &FsSourceConfig,
    exclude_patterns: &[Pattern],
) -> Discovery {
    let mut discovery = Discovery::default();
    let mut truncated: BTreeSet<PathBuf> = BTreeSet::new();

    // One level past the limit is walked so that cut-off entries are seen.
    for entry_result in WalkDir::new(scan_root)
        .follow_links(false)
        .max_depth(config.max_depth.saturating_add(1))
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| scan_root.to_path_buf(), Path::to_path_buf);
                let rel = path.strip_prefix(root).map_or_else(|_| path.clone(), Path::to_path_buf);
                discovery.errors.push(ValidationError::io(
                    rel,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };

        if entry.depth() > config.max_depth {
            if let Some(parent) = entry.path().parent() {
                truncated.insert(
                    parent
                        .strip_prefix(root)
                        .map_or_else(|_| parent.to_path_buf(), Path::to_path_buf),
                );
            }
            continue;
        }

        // Regular files only: symlinks, devices, pipes and sockets all fail this.
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        if !is_markdown(file_path, &config.extensions) {
            continue;
        }

        let rel = file_path
            .strip_prefix(root)
            .map_or_else(|_| file_path.to_path_buf(), Path::to_path_buf);
        if matches_exclude(&rel, exclude_patterns) {
            continue;
        }

        discovery.files.push((file_path.to_path_buf(), rel));
    }

    discovery.errors.extend(truncated.into_iter().map(|dir| {
        ValidationError::io(
            dir,
            format!(
                "Directory exceeds maximum traversal depth of {}; contents not scanned",
                config.max_depth
            ),
        )
    }));
    discovery.files.sort();
    discovery
}

/// Read a file using a bounded read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so an oversized file is detected
/// without loading it whole. Failures are reported against `rel`.
pub fn read_file_bounded(
    path: &Path,
    rel: &Path,
    max_file_size: u64,
) -> Result<String, ValidationError> {
    let file = std::fs::File::open(path)
        .map_err(|e| ValidationError::io(rel, format!("Failed to open file: {e}")))?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| ValidationError::io(rel, format!("Failed to read file: {e}")))?;

    if buffer.len() as u64 > max_file_size {
        return Err(ValidationError::io(
            rel,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer)
        .map_err(|_| ValidationError::io(rel, "File is not valid UTF-8"))
}

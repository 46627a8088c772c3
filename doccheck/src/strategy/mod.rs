//! Validation source strategies.
//!
//! Only the filesystem strategy exists. Rules are evaluated against files on
//! disk, so a source trait would have a single implementation.

pub mod fs;

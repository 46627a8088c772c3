//! Command-line front end for `doccheck`.
//!
//! The binary is a thin wrapper around [`cli::run`]; the modules are exposed
//! so the argument handling can be exercised from integration tests.

pub mod cli;
pub mod logging;
pub mod render;

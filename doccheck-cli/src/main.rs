// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: CLI tools are expected to print errors to stderr.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

/// Exit code when at least one rule failed.
const EXIT_RULES_FAILED: i32 = 1;
/// Exit code when the run could not start.
const EXIT_ERROR: i32 = 2;

fn main() {
    match doccheck_cli::cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_RULES_FAILED),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

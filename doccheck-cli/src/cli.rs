use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use doccheck::{FsSourceConfig, Ruleset, ValidationReport, output, validate_with};

use crate::logging;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Validate a Markdown documentation tree against a content contract.
#[derive(Debug, Parser)]
#[command(name = "doccheck", version, about)]
pub struct Cli {
    /// Root of the documentation site.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Ruleset file (.yaml, .yml or .json). Defaults to the built-in
    /// payments portal contract.
    #[arg(long)]
    pub ruleset: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Glob of documents to skip during discovery (repeatable).
    #[arg(short, long = "exclude")]
    pub exclude: Vec<String>,

    /// Largest file, in bytes, that will be read.
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Print the selected ruleset as JSON and exit.
    #[arg(long)]
    pub print_ruleset: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The ruleset named by `--ruleset`, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the ruleset file cannot be loaded.
    pub fn load_ruleset(&self) -> Result<Ruleset> {
        match &self.ruleset {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading ruleset");
                Ruleset::load(path)
            }
            None => Ok(Ruleset::payments_portal()),
        }
    }

    #[must_use]
    pub fn fs_config(&self) -> FsSourceConfig {
        let mut config = FsSourceConfig::default();
        config.exclude.clone_from(&self.exclude);
        if let Some(max) = self.max_file_size {
            config.max_file_size = max;
        }
        config
    }
}

/// Parse arguments from the process and run.
///
/// Returns `Ok(true)` when every rule passed.
///
/// # Errors
///
/// Returns an error if the run cannot start or output cannot be written.
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let color = !cli.no_color && std::io::stdout().is_terminal();
    execute(&cli, color, &mut std::io::stdout().lock())
}

/// Run a parsed command line, writing the report to `out`.
///
/// # Errors
///
/// Returns an error if the ruleset cannot be loaded, validation cannot
/// start, or writing fails.
pub fn execute(cli: &Cli, color: bool, out: &mut dyn Write) -> Result<bool> {
    let ruleset = cli.load_ruleset()?;

    if cli.print_ruleset {
        writeln!(out, "{}", serde_json::to_string_pretty(&ruleset)?)?;
        return Ok(true);
    }

    let report = validate_with(&cli.root, &ruleset, &cli.fs_config())?;
    write_report(&report, cli.format, color, out)?;
    Ok(report.ok)
}

fn write_report(
    report: &ValidationReport,
    format: OutputFormat,
    color: bool,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => output::write_json(report, out),
        OutputFormat::Human => {
            let mut buf = Vec::new();
            output::write_human(report, &mut buf)?;
            let text = String::from_utf8(buf)?;
            out.write_all(render::colorize(&text, color).as_bytes())?;
            Ok(())
        }
    }
}

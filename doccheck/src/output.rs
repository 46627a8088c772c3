//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.
//! Color/terminal formatting is excluded from this core module; that concern
//! belongs to the CLI layer.

use std::io::Write;

use crate::error::ErrorKind;
use crate::report::{CheckKind, ValidationReport};

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

fn check_label(check: CheckKind) -> &'static str {
    match check {
        CheckKind::RequiredFile => "required file",
        CheckKind::Frontmatter => "frontmatter",
        CheckKind::Content => "content",
    }
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// Every failing rule is listed with each of its defects so a document can
/// be fixed straight from the output.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  DOCUMENTATION CONTENT VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Root:              {}", report.root.display())?;
    writeln!(writer, "  Rules checked:     {}", report.rules_checked())?;
    writeln!(writer, "  Rules failed:      {}", report.rules_failed())?;
    writeln!(writer, "  Documents scanned: {}", report.scanned_files)?;
    writeln!(writer, "  Errors found:      {}", report.errors_count())?;
    writeln!(writer)?;

    let failed: Vec<_> = report.outcomes.iter().filter(|o| !o.passed).collect();
    if !failed.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  FAILED RULES")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for (idx, outcome) in failed.iter().enumerate() {
            match &outcome.name {
                Some(name) => writeln!(
                    writer,
                    "{}. [{}] {} ({})",
                    idx + 1,
                    check_label(outcome.check),
                    outcome.target.display(),
                    name
                )?,
                None => writeln!(
                    writer,
                    "{}. [{}] {}",
                    idx + 1,
                    check_label(outcome.check),
                    outcome.target.display()
                )?,
            }
            for error in &outcome.errors {
                writeln!(writer, "     {}", error.format_human_readable())?;
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} rules passed",
            report.rules_checked()
        )?;
    } else {
        writeln!(
            writer,
            "\u{2717} {} of {} rules failed with {} error(s)",
            report.rules_failed(),
            report.rules_checked(),
            report.errors_count()
        )?;
        writeln!(writer)?;
        writeln!(writer, "  To fix:")?;

        if report.count_of(ErrorKind::MissingFile) > 0 {
            writeln!(writer, "    - Create the missing files at the listed paths")?;
        }
        if report.count_of(ErrorKind::MalformedFrontmatter) > 0 {
            writeln!(
                writer,
                "    - Start each document with a '---' block holding non-empty id: and title: fields"
            )?;
        }
        if report.count_of(ErrorKind::MissingContent) > 0 {
            writeln!(
                writer,
                "    - Add the bracketed text verbatim (matching is case-sensitive)"
            )?;
        }
        if report.count_of(ErrorKind::IoError) > 0 {
            writeln!(
                writer,
                "    - Make the listed files readable UTF-8 within the size limit"
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

//! Terminal coloring for the plain-text report.

use colored::Colorize;

/// Colorize report lines: the final verdict green or red, failed-rule
/// headers yellow, defect lines dimmed. Returns `text` unchanged when
/// `enabled` is false.
#[must_use]
pub fn colorize(text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len() + 64);
    for line in text.lines() {
        let painted = if line.starts_with('\u{2713}') {
            line.green().bold().to_string()
        } else if line.starts_with('\u{2717}') {
            line.red().bold().to_string()
        } else if is_rule_header(line) {
            line.yellow().to_string()
        } else if line.starts_with("     ") && !line.trim().is_empty() {
            line.dimmed().to_string()
        } else {
            line.to_owned()
        };
        out.push_str(&painted);
        out.push('\n');
    }
    out
}

/// `"12. [content] docs/x.md"`
fn is_rule_header(line: &str) -> bool {
    line.split_once(". [")
        .is_some_and(|(num, _)| !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()))
}

//! Pure formatting functions for UI output.
//!
//! Status lines are built as strings first so they can be tested, then
//! printed by the `display_*` functions.

use console::style;

use crate::cli::orchestration::WorkflowResult;

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Format a success message with green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Format a status message with yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Summary line for a finished run.
pub fn format_summary(result: &WorkflowResult) -> String {
    let releases = if result.releases == 1 {
        "1 release".to_string()
    } else {
        format!("{} releases", result.releases)
    };

    format!(
        "Wrote {} ({}, {} commits read)",
        result.output.display(),
        releases,
        result.commits
    )
}

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a success message to stdout.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Print a status message to stdout.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Print the summary of a finished run.
pub fn display_summary(result: &WorkflowResult) {
    display_success(&format_summary(result));
}

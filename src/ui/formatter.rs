//! Pure formatting functions for UI output.
//!
//! Display/formatting logic lives here, separate from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::Change;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the changes about to be recorded.
///
/// Shows up to 10 entries; the remainder is summarized as a count.
pub fn display_changes(changes: &[Change], first: &str, last: &str) {
    println!(
        "\n{}",
        style(format!("Changes between '{}' and '{}'", first, last)).bold()
    );

    for change in changes.iter().take(10) {
        println!("  {}", change.to_line());
    }

    if changes.len() > 10 {
        println!("  ... and {} more changes", changes.len() - 10);
    }
}

/// Display the version transition for this release.
pub fn display_version_change(prior: &str, next: &str) {
    println!("\n{}", style("Release version:").bold());
    println!("  From: {}", style(prior).red());
    println!("  To:   {}", style(next).green());
}

/// Tell the operator the notes are written but still need a commit.
pub fn display_review_instruction(notes_file: &str) {
    println!(
        "\n{} {} updated with latest release notes. Please review and commit prior to final release.",
        style("→").yellow(),
        style(notes_file).cyan()
    );
}

//! Formatting functions for terminal output.
//!
//! Styling goes through `console`, which drops colors when the stream is not a terminal.

use console::style;

/// Format and print an error message in red on stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print the new tag on stdout, unstyled.
pub fn display_new_tag(tag: &str) {
    println!("{}", tag);
}

/// Describe the change from the previous tag (if any) to the new one.
pub fn format_proposed_tag(old_tag: Option<&str>, new_tag: &str) -> String {
    match old_tag {
        Some(old) => format!(
            "{} {} -> {}",
            style("Proposed tag:").bold(),
            style(old).red(),
            style(new_tag).green()
        ),
        None => format!(
            "{} {}",
            style("Initial tag:").bold(),
            style(new_tag).green()
        ),
    }
}

/// Print the proposed tag change on stderr.
///
/// # Arguments
/// * `old_tag` - Previous tag (None if this is the initial tag)
/// * `new_tag` - The new tag being proposed
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    eprintln!("{}", format_proposed_tag(old_tag, new_tag));
}

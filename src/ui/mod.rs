//! User-facing output.
//!
//! stdout carries only the new tag name so the binary can be used in scripts;
//! everything else goes to stderr.

pub mod formatter;

pub use formatter::{display_error, display_new_tag, display_proposed_tag, format_proposed_tag};

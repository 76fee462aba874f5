//! Console output helpers.
//!
//! Command summaries go to stdout with color; `--json` output is the bare
//! document. Warnings, build progress and errors always go to stderr.

use colored::Colorize;
use serde::Serialize;

/// Turn colors off globally (for `--no-color` / `NO_COLOR`).
pub fn configure(no_color: bool) {
    if no_color {
        colored::control::set_override(false);
    }
}

pub fn step(message: &str) {
    println!("{}", message.cyan().bold());
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn warn(message: &str) {
    eprintln!("{} {}", "!".yellow().bold(), message.yellow());
}

/// Like [`step`], on stderr.
pub fn progress(message: &str) {
    eprintln!("{}", message.cyan().bold());
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print a labelled value, indented under the last step.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", format!("{}:", label).bold(), value);
}

/// Print a list of paths, or `none` when empty.
pub fn list(label: &str, items: &[String]) {
    if items.is_empty() {
        field(label, "none");
        return;
    }

    field(label, items.len());
    for item in items {
        println!("    {} {}", "•".bold(), item);
    }
}

/// Print a result document as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> agent_core::AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Terminal output.
//!
//! Results go to stdout; progress, hints and problems go to stderr so
//! `--json` output stays machine-readable.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Non-fatal problem on stderr.
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Told when the client gives up on the stored session.
pub fn session_expired() {
    eprintln!(
        "{} Session expired. Run 'ecomap login' to sign in again.",
        "✗".red()
    );
}

/// Print `label: value` pairs with the values aligned.
pub fn fields(rows: &[(&str, &str)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("{:<width$}  {}", format!("{label}:").dimmed(), value, width = width + 1);
    }
}

/// Report an empty listing on stderr.
pub fn nothing_found(what: &str) {
    eprintln!("{}", format!("No {what} found.").dimmed());
}

/// Print a value as one line of JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

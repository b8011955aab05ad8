//! Output formatting for CLI commands
//!
//! Human output uses `colored` (respects NO_COLOR). JSON output is
//! pretty printed to stdout; logs and warnings go to stderr.

use crate::cli::OutputFormat;
use crate::core::types::LanguageSet;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for category bucket names
    pub fn bucket(s: &str) -> ColoredString {
        s.cyan()
    }

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Format milliseconds with color
pub fn format_millis_colored(ms: u64) -> String {
    format!("{}", colors::number(&format_duration(ms as f64 / 1000.0)))
}

/// Share of `count` in `total` as a percentage string
pub fn format_share(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

/// Print the language table, most frequent first
pub fn print_languages(languages: &LanguageSet) {
    let total = languages.total();
    let width = languages
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, count) in languages.ranked() {
        println!(
            "  {:<width$}  {:>6}  {}",
            name,
            colors::number(&count.to_string()),
            colors::dim(&format_share(count, total)),
        );
    }
}

/// Print output as JSON regardless of format
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Whether human progress lines should be written to stderr
pub fn show_progress(format: OutputFormat, quiet: bool) -> bool {
    !quiet && format == OutputFormat::Human
}

pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}

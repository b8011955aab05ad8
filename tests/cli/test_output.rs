//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Duration formatting (ms, s, m)
//! - Percentage shares for the language table
//! - Color helpers (respects NO_COLOR)
//! - Print helpers (print_success, print_warning, print_error)

use copacetic::cli::output::{
    colors, format_duration, format_millis_colored, format_share, print_error, print_header,
    print_json, print_languages, print_success, print_warning, show_progress,
};
use copacetic::cli::OutputFormat;
use copacetic::core::types::LanguageSet;
use serial_test::serial;

// =============================================================================
// format_duration tests
// =============================================================================

#[test]
fn test_format_duration_various_times() {
    // Milliseconds
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.001), "1ms");
    assert_eq!(format_duration(0.25), "250ms");

    // Seconds
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.99), "59.99s");

    // Minutes
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.5), "2m 5.5s");
}

#[test]
#[serial]
fn test_format_millis_colored_contains_duration() {
    colored::control::set_override(false);
    assert_eq!(format_millis_colored(1500), "1.50s");
    assert_eq!(format_millis_colored(20), "20ms");
    colored::control::unset_override();
}

// =============================================================================
// format_share tests
// =============================================================================

#[test]
fn test_format_share() {
    assert_eq!(format_share(0, 10), "0.0%");
    assert_eq!(format_share(1, 3), "33.3%");
    assert_eq!(format_share(10, 10), "100.0%");
    assert_eq!(format_share(5, 0), "0.0%");
}

// =============================================================================
// Color and print helpers
// =============================================================================

#[test]
#[serial]
fn test_colors_without_override_keep_text() {
    colored::control::set_override(false);
    assert_eq!(colors::label("Title").to_string(), "Title");
    assert_eq!(colors::bucket("source").to_string(), "source");
    assert_eq!(colors::file_path("src/lib.rs").to_string(), "src/lib.rs");
    assert_eq!(colors::number("42").to_string(), "42");
    colored::control::unset_override();
}

#[test]
fn test_print_helpers_do_not_panic() {
    print_header("Header");
    print_success("done");
    print_warning("careful");
    print_error("broken");

    let mut languages = LanguageSet::new();
    languages.record("Rust");
    languages.record("Rust");
    languages.record("Go");
    print_languages(&languages);
    print_languages(&LanguageSet::new());

    print_json(&languages).unwrap();
}

#[test]
fn test_show_progress() {
    assert!(show_progress(OutputFormat::Human, false));
    assert!(!show_progress(OutputFormat::Human, true));
    assert!(!show_progress(OutputFormat::Json, false));
}

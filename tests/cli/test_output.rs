//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Duration formatting (ms, s, m)
//! - List formatting
//! - Color helpers (respects NO_COLOR)
//! - Print helpers (print_success, print_warning, print_error)

use sextant::cli::output::{
    colors, format_duration, format_duration_colored, format_list, print_error, print_header,
    print_output, print_success, print_warning,
};
use sextant::cli::OutputFormat;
use serial_test::serial;

// =============================================================================
// format_duration tests
// =============================================================================

/// Test duration formatting for all ranges
#[test]
fn test_format_duration_ranges() {
    // Milliseconds (under 1 second)
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.001), "1ms");
    assert_eq!(format_duration(0.250), "250ms");

    // Seconds
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(12.5), "12.50s");

    // Minutes
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.5), "2m 5.5s");
}

/// Colored duration keeps the plain text
#[test]
#[serial]
fn test_format_duration_colored_contains_text() {
    colored::control::set_override(false);
    assert_eq!(format_duration_colored(0.5), "500ms");
    colored::control::unset_override();
}

// =============================================================================
// format_list tests
// =============================================================================

#[test]
fn test_format_list() {
    assert_eq!(format_list(&[]), "-");
    assert_eq!(format_list(&["order".to_string()]), "order");
    assert_eq!(
        format_list(&["a".to_string(), "b".to_string(), "c".to_string()]),
        "a, b, c"
    );
}

// =============================================================================
// Color helper tests
// =============================================================================

/// Color helpers wrap text without changing it once colors are off
#[test]
#[serial]
fn test_colors_plain_when_disabled() {
    colored::control::set_override(false);
    assert_eq!(colors::alias("order").to_string(), "order");
    assert_eq!(colors::path("order.total").to_string(), "order.total");
    assert_eq!(colors::kind("date").to_string(), "date");
    assert_eq!(colors::number("20").to_string(), "20");
    colored::control::unset_override();
}

// =============================================================================
// Print helper tests
// =============================================================================

/// Print helpers must not panic
#[test]
fn test_print_helpers() {
    print_success("built");
    print_warning("no aliases");
    print_error("failed");
    print_header("Aliases:");
    print_output(&vec!["a", "b"], OutputFormat::Json);
    print_output(&vec!["a", "b"], OutputFormat::Human);
}

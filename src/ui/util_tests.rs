#![allow(clippy::unwrap_used)]

use ratatui::style::Color;
use rust_decimal_macros::dec;

use super::theme::{balance_color, color_from_tag, ACCENT, GREEN, RED};
use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Rent", 10), "Rent");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Personal Needs", 9), "Personal…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Savings", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(2000)), "$2,000.00");
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_small() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(4.5)), "$4.50");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

// ── format_percentage ─────────────────────────────────────────

#[test]
fn test_format_percentage() {
    assert_eq!(format_percentage(dec!(45.000)), "45%");
    assert_eq!(format_percentage(dec!(12.346)), "12.35%");
    assert_eq!(format_percentage(dec!(0)), "0%");
    assert_eq!(format_percentage(dec!(33.3)), "33.3%");
}

// ── scrolling ─────────────────────────────────────────────────

fn cursor(index: usize, scroll: usize) -> ListCursor {
    ListCursor { index, scroll }
}

#[test]
fn test_cursor_down_moves_window() {
    let mut c = cursor(2, 0);
    c.down(10, 3);
    assert_eq!(c, cursor(3, 1));
}

#[test]
fn test_cursor_down_stops_at_end() {
    let mut c = cursor(4, 2);
    c.down(5, 3);
    assert_eq!(c, cursor(4, 2));
}

#[test]
fn test_cursor_up_and_bounds() {
    let mut c = cursor(3, 3);
    c.up();
    assert_eq!(c, cursor(2, 2));
    c.bottom(8, 3);
    assert_eq!(c, cursor(7, 5));
    c.top();
    assert_eq!(c, cursor(0, 0));
}

#[test]
fn test_cursor_clamp() {
    let mut c = cursor(4, 4);
    c.clamp(2);
    assert_eq!(c, cursor(1, 1));

    let mut c = cursor(0, 0);
    c.clamp(0);
    assert_eq!(c, cursor(0, 0));
}

#[test]
fn test_cursor_select() {
    let mut c = cursor(6, 5);
    c.select(2, 3);
    assert_eq!(c, cursor(2, 2));
    c.select(4, 3);
    assert_eq!(c, cursor(4, 2));
    c.select(9, 3);
    assert_eq!(c, cursor(9, 7));
}

// ── colors ────────────────────────────────────────────────────

#[test]
fn test_color_from_tag() {
    assert_eq!(color_from_tag("#007BFF"), Color::Rgb(0, 123, 255));
    assert_eq!(color_from_tag("#fadadd"), Color::Rgb(250, 218, 221));
    assert_eq!(color_from_tag("blue"), ACCENT);
    assert_eq!(color_from_tag("#zzzzzz"), ACCENT);
}

#[test]
fn test_balance_color() {
    assert_eq!(balance_color(dec!(0.01)), GREEN);
    assert_eq!(balance_color(dec!(0)), RED);
    assert_eq!(balance_color(dec!(-5)), RED);
}

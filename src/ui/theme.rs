use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

use super::app::InputMode;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn funds_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn spending_style() -> Style {
    Style::default().fg(RED)
}

/// Green while money is left, red once it has run out.
pub(crate) fn balance_color(amount: Decimal) -> Color {
    if amount > Decimal::ZERO {
        GREEN
    } else {
        RED
    }
}

/// Badge shown at the left of the status bar.
pub(crate) fn input_mode_style(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => ACCENT,
        InputMode::Command => GREEN,
        InputMode::Editing => YELLOW,
        InputMode::Confirm => RED,
    };
    Style::default()
        .fg(HEADER_BG)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

/// Turn a `#RRGGBB` category tag into a terminal color. Anything else falls
/// back to the accent color.
pub(crate) fn color_from_tag(tag: &str) -> Color {
    let hex = tag.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return ACCENT;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => ACCENT,
    }
}

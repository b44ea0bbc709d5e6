use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::format_amount;
use crate::session::Session;

pub(crate) fn render(f: &mut Frame, app: &App, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app, session);
    render_status_bar(f, chunks[2], app, session);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
    if let Some(msg) = &app.alert {
        render_alert(f, f.area(), msg);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, session: &Session) {
    match app.screen {
        Screen::Setup => super::screens::setup::render(f, area, app),
        Screen::Chart => super::screens::chart::render(f, area, app, session),
        Screen::Ledger => super::screens::ledger::render(f, area, app, session),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, session: &Session) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = theme::input_mode_style(app.input_mode);

    let info = match session.budget() {
        Some(budget) => format!(
            " {} | {} | {} left | {} entries",
            app.screen,
            budget.mode(),
            format_amount(budget.running_salary()),
            session.ledger().len()
        ),
        None => format!(" {} | {} | no budget", app.screen, app.form.mode),
    };

    let right = match app.screen {
        Screen::Setup => " Enter edit | m mode | s submit | ? help ",
        Screen::Chart => " j/k select | Enter spend | :add-funds | ? help ",
        Screen::Ledger => " D delete | C clear all | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::Editing => (
            Line::from(vec![
                Span::styled("edit> ", Style::default().fg(theme::GREEN)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(6 + app.command_input.len() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Key bindings listed in the help overlay, grouped by section.
const KEY_HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k, Up/Down", "Move cursor"),
            ("g/G", "Top/Bottom"),
            ("Ctrl-d/u", "Half page down/up"),
            ("1-3, Tab", "Switch screens"),
            ("Ctrl-q, Ctrl-c", "Quit"),
        ],
    ),
    (
        "Setup",
        &[
            ("Enter", "Edit field"),
            ("m", "Switch preset/personalized"),
            ("a / x", "Add/remove category"),
            ("s", "Build the chart"),
        ],
    ),
    (
        "Chart & Ledger",
        &[
            ("Enter, e", "Record spending in the selected category"),
            ("D", "Delete the selected entry"),
            ("C", "Clear all spending"),
        ],
    ),
];

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " AllocaTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    for (title, keys) in KEY_HELP {
        help_text.push(Line::from(""));
        help_text.push(section_title(title));
        for (key, action) in *keys {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {key:<16}"), Style::default().fg(theme::ACCENT)),
                Span::styled(*action, theme::normal_style()),
            ]));
        }
    }
    help_text.push(Line::from(""));
    help_text.push(section_title("Commands"));

    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<22} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup_area = centered_popup(area, 100, help_text.len() as u16 + 2);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}

fn render_alert(f: &mut Frame, area: Rect, msg: &str) {
    let text = vec![
        Line::from(Span::styled(
            " Error ",
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(format!(" {msg}"), theme::normal_style())),
        Line::from(""),
        Line::from(Span::styled(
            " Press any key to dismiss ",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    let width = (msg.chars().count() as u16 + 6).max(40);
    let popup_area = centered_popup(area, width, text.len() as u16 + 2);

    f.render_widget(Clear, popup_area);
    let alert = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::RED))
                .style(Style::default().bg(theme::HEADER_BG)),
        );
    f.render_widget(alert, popup_area);
}

/// Center a popup, clamped to the terminal size.
fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_height = height.min(area.height.saturating_sub(2));
    let popup_width = width.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(x, y, popup_width, popup_height)
}

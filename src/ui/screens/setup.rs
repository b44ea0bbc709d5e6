use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::{parse_percentage, parse_salary, AllocationMode};
use crate::ui::app::{App, InputMode};
use crate::ui::form::FormField;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percentage, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode header
            Constraint::Min(5),    // Fields
            Constraint::Length(3), // Allocation preview
        ])
        .split(area);

    render_mode_header(f, chunks[0], app);
    render_fields(f, chunks[1], app);
    render_preview(f, chunks[2], app);
}

fn render_mode_header(f: &mut Frame, area: Rect, app: &App) {
    let tab = |mode: AllocationMode| {
        if app.form.mode == mode {
            Span::styled(
                format!(" {mode} "),
                Style::default()
                    .fg(theme::HEADER_BG)
                    .bg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {mode} "), theme::dim_style())
        }
    };

    let line = Line::from(vec![
        Span::styled(" Allocation: ", theme::dim_style()),
        tab(AllocationMode::Preset),
        Span::raw(" "),
        tab(AllocationMode::Personalized),
        Span::styled("   (m to switch, discards unsaved input)", theme::dim_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_fields(f: &mut Frame, area: Rect, app: &App) {
    let fields = app.form.fields();

    let header_cells = ["Field", "Value"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = fields
        .iter()
        .enumerate()
        .skip(app.fields.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, field)| {
            let is_cursor = i == app.fields.index;
            let editing = app.input_mode == InputMode::Editing
                && app.editing_field == Some(*field);

            let value = if editing {
                format!("{}▏", app.command_input)
            } else {
                app.form.value(*field).to_string()
            };

            let value_cell = match field {
                FormField::Color(_) if !editing => Cell::from(Line::from(vec![
                    Span::styled(
                        "■ ",
                        Style::default().fg(theme::color_from_tag(&value)),
                    ),
                    Span::raw(value),
                ])),
                _ if value.is_empty() => Cell::from(Span::styled("(empty)", theme::dim_style())),
                _ => Cell::from(truncate(&value, 40)),
            };

            let style = if editing {
                Style::default().fg(theme::HEADER_BG).bg(theme::GREEN)
            } else if is_cursor {
                theme::selected_style()
            } else if matches!(
                field,
                FormField::Name(n) | FormField::Percentage(n) | FormField::Color(n) if *n % 2 == 1
            ) {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![Cell::from(field.label()), value_cell]).style(style)
        })
        .collect();

    let hint = match app.form.mode {
        AllocationMode::Preset => " Enter edit | s submit ",
        AllocationMode::Personalized => " Enter edit | a add | x remove | s submit ",
    };

    let widths = [Constraint::Length(24), Constraint::Min(20)];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" {} Setup ", app.form.mode),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Span::styled(hint, theme::dim_style())),
    );

    f.render_widget(table, area);

    if app.form.mode == AllocationMode::Personalized && app.form.categories.is_empty() {
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 3,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        if area.height > 4 {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "No categories yet. Press a or use :add-cat <name> <pct> [#color]",
                    theme::dim_style(),
                )),
                inner,
            );
        }
    }
}

/// What the form would allocate right now, ignoring anything that does
/// not parse yet.
fn render_preview(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let percentages: Vec<&str> = match form.mode {
        AllocationMode::Preset => vec![
            form.utilities.as_str(),
            form.savings.as_str(),
            form.personal_needs.as_str(),
        ],
        AllocationMode::Personalized => form
            .categories
            .iter()
            .map(|c| c.percentage.as_str())
            .collect(),
    };
    let total: Decimal = percentages
        .iter()
        .filter_map(|p| parse_percentage(p).ok())
        .sum();

    let mut spans = vec![
        Span::styled(" Total allocated: ", theme::dim_style()),
        Span::styled(
            format_percentage(total),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Ok(salary) = parse_salary(&form.salary) {
        let dollars = total / Decimal::ONE_HUNDRED * salary;
        spans.push(Span::styled(" of ", theme::dim_style()));
        spans.push(Span::styled(format_amount(salary), theme::funds_style()));
        spans.push(Span::styled(
            format!(" ({})", format_amount(dollars)),
            theme::dim_style(),
        ));
    }
    if total > Decimal::ONE_HUNDRED {
        spans.push(Span::styled("  over 100%", theme::spending_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

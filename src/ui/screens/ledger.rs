use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::session::Session;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, session: &Session) {
    let ledger = session.ledger();

    if ledger.is_empty() {
        let hint = if session.budget().is_some() {
            "Pick a category on the Chart screen (2) and press Enter, or use :spend"
        } else {
            "Build a budget on the Setup screen (1) first"
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No spending recorded", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Spending (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Reason", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = ledger
        .entries()
        .iter()
        .enumerate()
        .skip(app.entries.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, entry)| {
            let style = if i == app.entries.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let reason = if entry.reason.is_empty() {
                Cell::from(Span::styled("—", theme::dim_style()))
            } else {
                Cell::from(truncate(&entry.reason, 40))
            };

            Row::new(vec![
                Cell::from(format!("  {}", entry.date.format("%Y-%m-%d"))),
                reason,
                Cell::from(truncate(&entry.category_name, 18)),
                Cell::from(Span::styled(
                    format!("-{}", format_amount(entry.amount)),
                    theme::spending_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Spending ({}) total {} ",
                    ledger.len(),
                    format_amount(ledger.total_spent())
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Block, Borders, Cell, Paragraph, Row, Table,
    },
    Frame,
};
use crate::chart::DonutChart;
use crate::models::Budget;
use crate::session::Session;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percentage, truncate};

/// Inner radius as a share of the outer one.
const CUTOUT: f64 = 0.6;
const RADIUS: f64 = 1.0;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, session: &Session) {
    let Some(budget) = session.budget().filter(|_| session.chart().is_built()) else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Donut + legend
            Constraint::Length(1), // Tooltip
        ])
        .split(area);

    render_summary_cards(f, chunks[0], budget, session);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_donut(f, body[0], session.chart());
    render_legend(f, body[1], app, budget);
    render_tooltip(f, chunks[2], app, session.chart());
}

fn render_empty(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Budget Chart ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    let msg = vec![
        Line::from(""),
        Line::from(Span::styled("No budget chart yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the Setup screen (1) and press s, or use :submit",
            theme::dim_style(),
        )),
    ];
    f.render_widget(Paragraph::new(msg).centered().block(block), area);
}

fn render_summary_cards(f: &mut Frame, area: Rect, budget: &Budget, session: &Session) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let spent = session.ledger().total_spent();
    let entries = session.ledger().len();

    render_card(
        f,
        cards[0],
        "Monthly Salary",
        format_amount(budget.original_salary()),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[1],
        "Funds Available",
        format_amount(budget.running_salary()),
        theme::balance_color(budget.running_salary()),
    );
    render_card(
        f,
        cards[2],
        &format!("Spent ({entries})"),
        format_amount(spent),
        theme::RED,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

/// Ring of colored arcs, starting at twelve o'clock and running clockwise.
struct Donut {
    slices: Vec<(f64, Color)>,
}

impl Donut {
    fn color_at(&self, turn: f64) -> Option<Color> {
        let mut acc = 0.0;
        for (share, color) in &self.slices {
            acc += share;
            if turn < acc {
                return Some(*color);
            }
        }
        self.slices.last().map(|(_, c)| *c)
    }
}

impl Shape for Donut {
    fn draw(&self, painter: &mut Painter) {
        const RINGS: usize = 48;
        const STEPS: usize = 720;
        let inner = RADIUS * CUTOUT;
        for ring in 0..=RINGS {
            let r = inner + (RADIUS - inner) * ring as f64 / RINGS as f64;
            for step in 0..STEPS {
                let turn = step as f64 / STEPS as f64;
                let Some(color) = self.color_at(turn) else {
                    return;
                };
                let theta = FRAC_PI_2 - turn * TAU;
                if let Some((x, y)) = painter.get_point(r * theta.cos(), r * theta.sin()) {
                    painter.paint(x, y, color);
                }
            }
        }
    }
}

fn render_donut(f: &mut Frame, area: Rect, chart: &DonutChart) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Allocation ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);

    // Braille dots are roughly square, so widen the x range to match the area.
    let margin = RADIUS * 1.1;
    let dots_wide = f64::from(inner.width.max(1)) * 2.0;
    let dots_high = f64::from(inner.height.max(1)) * 4.0;
    let x_half = margin * dots_wide / dots_high;

    let donut = Donut {
        slices: chart
            .slices()
            .into_iter()
            .map(|(share, tag)| (share, theme::color_from_tag(tag)))
            .collect(),
    };
    let label = chart.center_label().unwrap_or_default();
    // One terminal cell spans two braille dots.
    let cell_width = 2.0 * x_half / f64::from(inner.width.max(1));
    let label_x = -(label.chars().count() as f64) / 2.0 * cell_width;
    let note = if chart.data().is_empty() {
        Some("no categories")
    } else if donut.slices.is_empty() {
        Some("fully spent")
    } else {
        None
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-margin, margin])
        .paint(move |ctx| {
            ctx.draw(&donut);
            ctx.layer();
            ctx.print(
                label_x,
                0.0,
                Line::from(Span::styled(
                    label.clone(),
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )),
            );
            if let Some(note) = note {
                ctx.print(
                    -(note.len() as f64) / 2.0 * cell_width,
                    -0.2,
                    Span::styled(note, theme::dim_style()),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_legend(f: &mut Frame, area: Rect, app: &App, budget: &Budget) {
    let salary = budget.original_salary();

    let header_cells = ["Category", "Left", "Remaining", "Budgeted"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = budget
        .categories()
        .iter()
        .enumerate()
        .skip(app.categories.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, cat)| {
            let style = if i == app.categories.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let remaining = cat.remaining_amount(salary);
            let remaining_style = Style::default().fg(theme::balance_color(remaining));

            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(theme::color_from_tag(&cat.color))),
                    Span::raw(truncate(&cat.name, 18)),
                ])),
                Cell::from(format_percentage(cat.percentage(salary))),
                Cell::from(Span::styled(format_amount(remaining), remaining_style)),
                Cell::from(format_amount(cat.budgeted_amount(salary))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(8),
        Constraint::Length(13),
        Constraint::Length(13),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Categories ({}) {} ",
                    budget.categories().len(),
                    format_percentage(budget.total_percentage())
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Span::styled(" Enter/e record spending ", theme::dim_style())),
    );

    f.render_widget(table, area);
}

fn render_tooltip(f: &mut Frame, area: Rect, app: &App, chart: &DonutChart) {
    let line = match chart.tooltip(app.categories.index) {
        Some(tip) => Line::from(vec![
            Span::styled(" ▸ ", Style::default().fg(theme::ACCENT)),
            Span::styled(tip, theme::normal_style()),
        ]),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

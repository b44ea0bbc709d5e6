use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;

use super::app::{App, InputMode, PendingAction, Screen};
use super::form::{is_hex_color, CategoryDraft, FormField, DEFAULT_COLOR};
use crate::models::{
    parse_amount, parse_percentage, parse_salary, AllocationError, AllocationMode, PresetCategory,
};
use crate::session::Session;
use crate::ui::util::{format_amount, format_percentage};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit AllocaTUI", cmd_quit, r);
    register_command!("quit", "Quit AllocaTUI", cmd_quit, r);
    register_command!("setup", "Go to Setup", cmd_setup, r);
    register_command!("chart", "Go to Chart", cmd_chart, r);
    register_command!("ledger", "Go to Ledger", cmd_ledger, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "mode",
        "Switch input mode (e.g. :mode personal); discards unsaved input",
        cmd_mode,
        r
    );
    register_command!("salary", "Set monthly salary (e.g. :salary 2000)", cmd_salary, r);
    register_command!(
        "preset",
        "Set preset percentages (e.g. :preset 50 30 20)",
        cmd_preset,
        r
    );
    register_command!(
        "add-cat",
        "Add personalized category (e.g. :add-cat Rent 40 #FF0000)",
        cmd_add_category,
        r
    );
    register_command!(
        "drop-cat",
        "Remove the personalized category under the cursor",
        cmd_drop_category,
        r
    );
    register_command!("submit", "Build the budget chart from the form", cmd_submit, r);
    register_command!("s", "Build the budget chart from the form", cmd_submit, r);
    register_command!(
        "add-funds",
        "Add to the salary and rebuild (e.g. :add-funds 250)",
        cmd_add_funds,
        r
    );
    register_command!(
        "spend",
        "Record spending in the selected category (e.g. :spend 2024-01-15 45.20 groceries)",
        cmd_spend,
        r
    );
    register_command!(
        "delete-entry",
        "Delete the selected spending entry",
        cmd_delete_entry,
        r
    );
    register_command!(
        "clear-spending",
        "Undo all recorded spending",
        cmd_clear_spending,
        r
    );
    register_command!(
        "clear-chart",
        "Clear the budget chart and the personalized form",
        cmd_clear_chart,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
        app.clamp_cursors(session);
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_setup(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Setup;
    Ok(())
}

fn cmd_chart(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Chart;
    Ok(())
}

fn cmd_ledger(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Ledger;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_mode(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    let mode = if args.is_empty() {
        app.form.mode.toggled()
    } else if let Some(mode) = AllocationMode::parse(args) {
        mode
    } else {
        app.set_status("Usage: :mode <preset|personal>");
        return Ok(());
    };
    app.switch_mode(mode);
    app.screen = Screen::Setup;
    Ok(())
}

fn cmd_salary(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :salary <amount>");
        return Ok(());
    }
    match parse_salary(args) {
        Ok(salary) => {
            app.form.set_value(FormField::Salary, args);
            app.set_status(format!("Salary set to {}", format_amount(salary)));
        }
        Err(e) => app.raise(&e),
    }
    Ok(())
}

fn cmd_preset(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 3 {
        app.set_status("Usage: :preset <utilities%> <savings%> <personal-needs%>");
        return Ok(());
    }
    if let Some(err) = parts.iter().find_map(|p| parse_percentage(p).err()) {
        app.raise(&err);
        return Ok(());
    }

    if app.form.mode != AllocationMode::Preset {
        app.switch_mode(AllocationMode::Preset);
    }
    for (preset, value) in PresetCategory::all().iter().zip(&parts) {
        app.form.set_value(FormField::Preset(*preset), value);
    }
    app.screen = Screen::Setup;
    app.set_status(format!(
        "Preset: Utilities {}%, Savings {}%, Personal Needs {}%. :submit to build",
        parts[0], parts[1], parts[2]
    ));
    Ok(())
}

/// Split `<name...> <pct> [#color]` from the right, since names may contain spaces.
fn parse_category_args(args: &str) -> Option<(String, String, String)> {
    let mut tokens: Vec<&str> = args.split_whitespace().collect();
    let color = match tokens.last() {
        Some(last) if last.starts_with('#') => {
            let c = last.to_string();
            tokens.pop();
            c
        }
        _ => DEFAULT_COLOR.to_string(),
    };
    let pct = tokens.pop()?.to_string();
    if tokens.is_empty() {
        return None;
    }
    Some((tokens.join(" "), pct, color))
}

fn cmd_add_category(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    let Some((name, pct, color)) = parse_category_args(args) else {
        app.set_status("Usage: :add-cat <name> <percentage> [#RRGGBB]");
        return Ok(());
    };
    if let Err(e) = parse_percentage(&pct) {
        app.raise(&e);
        return Ok(());
    }
    if !is_hex_color(&color) {
        app.raise(&AllocationError::InvalidColor(color));
        return Ok(());
    }

    if app.form.mode != AllocationMode::Personalized {
        app.switch_mode(AllocationMode::Personalized);
    }
    let index = app.form.add_category(CategoryDraft {
        name: name.clone(),
        percentage: pct.clone(),
        color,
    });
    app.focus_field(FormField::Name(index));
    app.screen = Screen::Setup;
    app.set_status(format!("Added category: {name} ({pct}%)"));
    Ok(())
}

fn cmd_drop_category(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if app.form.mode != AllocationMode::Personalized || app.form.categories.is_empty() {
        app.set_status("No personalized categories to remove");
        return Ok(());
    }

    let index = if args.is_empty() {
        match app.selected_field() {
            Some(FormField::Name(i) | FormField::Percentage(i) | FormField::Color(i)) => i,
            _ => {
                app.set_status("Move the cursor onto a category, or use :drop-cat <number>");
                return Ok(());
            }
        }
    } else {
        match args.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                app.set_status("Usage: :drop-cat [number]");
                return Ok(());
            }
        }
    };

    match app.form.remove_category(index) {
        Some(draft) => {
            let name = if draft.name.is_empty() {
                format!("category {}", index + 1)
            } else {
                draft.name
            };
            app.set_status(format!("Removed {name}"));
        }
        None => app.set_status(format!("No category {}", index + 1)),
    }
    Ok(())
}

fn cmd_submit(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.submit_form(session);
    Ok(())
}

fn cmd_add_funds(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add-funds <amount>");
        return Ok(());
    }
    let amount = match parse_amount(args) {
        Ok(a) => a,
        Err(e) => {
            app.raise(&e);
            return Ok(());
        }
    };

    let previous = app.form.salary.clone();
    if let Err(e) = app.form.add_funds(amount) {
        app.raise(&e);
        return Ok(());
    }
    if app.submit_form(session) {
        app.set_status(format!(
            "Added {}; salary is now {}",
            format_amount(amount),
            format_amount(session.budget().map_or(amount, |b| b.original_salary()))
        ));
    } else {
        app.form.salary = previous;
    }
    Ok(())
}

/// `[YYYY-MM-DD] <amount> [reason...]`
fn parse_spend_args(args: &str) -> Option<(Option<NaiveDate>, &str, &str)> {
    let mut rest = args.trim();
    let mut date = None;
    let (first, tail) = split_first_word(rest);
    if let Ok(d) = NaiveDate::parse_from_str(first, "%Y-%m-%d") {
        date = Some(d);
        rest = tail;
    }
    let (amount, reason) = split_first_word(rest);
    if amount.is_empty() {
        return None;
    }
    Some((date, amount, reason))
}

fn split_first_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (s, ""),
    }
}

fn cmd_spend(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let Some((date, amount_str, reason)) = parse_spend_args(args) else {
        app.set_status("Usage: :spend [YYYY-MM-DD] <amount> [reason]");
        return Ok(());
    };
    let amount = match parse_amount(amount_str) {
        Ok(a) => a,
        Err(e) => {
            app.raise(&e);
            return Ok(());
        }
    };
    let Some(category_id) = app.selected_category(session) else {
        app.raise(&AllocationError::NoBudget);
        return Ok(());
    };
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    match session.record_spending(date, reason, category_id, amount) {
        Ok(entry) => {
            let budget = session.budget();
            let left = match (
                budget.and_then(|b| b.allocated_amount(category_id)),
                budget.and_then(|b| b.percentage(category_id)),
            ) {
                (Some(amount), Some(pct)) => {
                    format!("{} / {}", format_amount(amount), format_percentage(pct))
                }
                _ => String::new(),
            };
            app.set_status(format!(
                "Recorded {} in {} ({left} left)",
                format_amount(entry.amount),
                entry.category_name
            ));
        }
        Err(e) => app.raise(&e),
    }
    Ok(())
}

fn cmd_delete_entry(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let Some(entry) = app
        .selected_entry(session)
        .and_then(|id| session.ledger().get(id))
    else {
        app.set_status("No spending entry selected");
        return Ok(());
    };

    let label = format!("{} {}", format_amount(entry.amount), entry.category_name);
    app.confirm_message = format!("Delete {label}?");
    app.pending_action = Some(PendingAction::DeleteEntry {
        id: entry.id,
        label,
    });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_clear_spending(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if session.ledger().is_empty() {
        app.set_status("No spending to clear");
        return Ok(());
    }
    app.confirm_message = format!("Clear all {} spending records?", session.ledger().len());
    app.pending_action = Some(PendingAction::ClearSpending);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_clear_chart(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.confirm_message =
        "Clear your budgeting chart? This action cannot be undone.".to_string();
    app.pending_action = Some(PendingAction::ClearChart);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

/// Carry out a confirmed action.
pub(crate) fn apply_pending(action: PendingAction, app: &mut App, session: &mut Session) {
    match action {
        PendingAction::DeleteEntry { id, label } => match session.delete_entry(id) {
            Ok(_) => app.set_status(format!("Deleted: {label}")),
            Err(e) => app.raise(&e),
        },
        PendingAction::ClearSpending => match session.clear_spending() {
            Ok(count) => app.set_status(format!("Cleared {count} spending records")),
            Err(e) => app.raise(&e),
        },
        PendingAction::ClearChart => {
            session.clear_chart();
            if app.form.mode == AllocationMode::Personalized {
                app.form.categories.clear();
            }
            app.form.salary.clear();
            app.screen = Screen::Setup;
            app.set_status("Budget chart cleared");
        }
    }
    app.clamp_cursors(session);
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;

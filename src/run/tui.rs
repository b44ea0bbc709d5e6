use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::models::AllocationMode;
use crate::session::Session;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::form::{CategoryDraft, FormField};
use crate::ui::util::ListCursor;

pub(crate) fn as_tui() -> Result<()> {
    let mut app = App::new();
    let mut session = Session::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal session ended with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, session);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.alert.is_some() {
                app.alert = None;
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, session)?,
                InputMode::Command => handle_command_input(key, app, session)?,
                InputMode::Editing => handle_editing_input(key, app, session),
                InputMode::Confirm => handle_confirm_input(key, app, session),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: event::KeyEvent,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, session),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app, session),
        KeyCode::Char('g') => handle_goto_top(app, session),
        KeyCode::Char('G') => handle_goto_bottom(app, session),
        KeyCode::Char('1') => app.screen = Screen::Setup,
        KeyCode::Char('2') => app.screen = Screen::Chart,
        KeyCode::Char('3') => app.screen = Screen::Ledger,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.screen = screens[prev];
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Enter if app.screen == Screen::Setup => {
            if let Some(field) = app.selected_field() {
                app.command_input = app.form.value(field).to_string();
                app.editing_field = Some(field);
                app.input_mode = InputMode::Editing;
                app.set_status(format!(
                    "Editing {}. Enter to save, Esc to cancel",
                    field.label()
                ));
            }
        }
        KeyCode::Char('m') if app.screen == Screen::Setup => {
            let mode = app.form.mode.toggled();
            app.switch_mode(mode);
        }
        KeyCode::Char('a') if app.screen == Screen::Setup => {
            if app.form.mode == AllocationMode::Personalized {
                let index = app.form.add_category(CategoryDraft::default());
                app.focus_field(FormField::Name(index));
                app.set_status(format!("Added category {}", index + 1));
            } else {
                app.set_status("Switch to personalized mode (m) to add categories");
            }
        }
        KeyCode::Char('x') if app.screen == Screen::Setup => {
            commands::handle_command("drop-cat", app, session)?;
        }
        KeyCode::Char('s') if app.screen == Screen::Setup => {
            commands::handle_command("submit", app, session)?;
        }
        KeyCode::Enter | KeyCode::Char('e') if app.screen == Screen::Chart => {
            app.input_mode = InputMode::Command;
            app.command_input = "spend ".to_string();
        }
        KeyCode::Char('D') if app.screen == Screen::Ledger => {
            commands::handle_command("delete-entry", app, session)?;
        }
        KeyCode::Char('C') if app.screen == Screen::Ledger => {
            commands::handle_command("clear-spending", app, session)?;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.page() / 2 {
                handle_move_down(app, session);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.page() / 2 {
                handle_move_up(app, session);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, session)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, session: &Session) {
    match key.code {
        KeyCode::Enter => {
            if let Some(field) = app.editing_field.take() {
                let value = app.command_input.clone();
                app.form.set_value(field, &value);
                app.set_status(format!("{}: {}", field.label(), value.trim()));
            }
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.clamp_cursors(session);
        }
        KeyCode::Esc => {
            app.editing_field = None;
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, session: &mut Session) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                commands::apply_pending(action, app, session);
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

/// Cursor of the list on the current screen, with that list's length.
fn active_list<'a>(app: &'a mut App, session: &Session) -> (&'a mut ListCursor, usize) {
    match app.screen {
        Screen::Setup => {
            let len = app.form.fields().len();
            (&mut app.fields, len)
        }
        Screen::Chart => (
            &mut app.categories,
            session.budget().map_or(0, |b| b.categories().len()),
        ),
        Screen::Ledger => (&mut app.entries, session.ledger().len()),
    }
}

fn handle_move_down(app: &mut App, session: &Session) {
    let page = app.page();
    let (cursor, len) = active_list(app, session);
    cursor.down(len, page);
}

fn handle_move_up(app: &mut App, session: &Session) {
    active_list(app, session).0.up();
}

fn handle_goto_top(app: &mut App, session: &Session) {
    active_list(app, session).0.top();
}

fn handle_goto_bottom(app: &mut App, session: &Session) {
    let page = app.page();
    let (cursor, len) = active_list(app, session);
    cursor.bottom(len, page);
}

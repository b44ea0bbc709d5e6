use crate::models::{AllocationError, AllocationMode, CategoryId, EntryId};
use crate::session::Session;
use crate::ui::form::{BudgetForm, FormField};
use crate::ui::util::ListCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Setup,
    Chart,
    Ledger,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Setup, Self::Chart, Self::Ledger]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "Setup"),
            Self::Chart => write!(f, "Chart"),
            Self::Ledger => write!(f, "Ledger"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteEntry { id: EntryId, label: String },
    ClearSpending,
    ClearChart,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Blocking error popup; the next key press dismisses it.
    pub(crate) alert: Option<String>,

    // Setup
    pub(crate) form: BudgetForm,
    pub(crate) fields: ListCursor,
    pub(crate) editing_field: Option<FormField>,

    // Chart legend
    pub(crate) categories: ListCursor,

    // Ledger
    pub(crate) entries: ListCursor,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Setup,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            alert: None,

            form: BudgetForm::new(AllocationMode::Preset),
            fields: ListCursor::default(),
            editing_field: None,

            categories: ListCursor::default(),

            entries: ListCursor::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Show a rejected action as a blocking popup.
    pub(crate) fn raise(&mut self, err: &AllocationError) {
        tracing::warn!(error = %err, screen = %self.screen, "action rejected");
        self.alert = Some(err.to_string());
        self.set_status(format!("Error: {err}"));
    }

    pub(crate) fn selected_field(&self) -> Option<FormField> {
        self.form.fields().get(self.fields.index).copied()
    }

    pub(crate) fn switch_mode(&mut self, mode: AllocationMode) {
        self.form.set_mode(mode);
        self.fields.top();
        self.editing_field = None;
        self.set_status(format!("{mode} mode"));
    }

    /// Validate the form and, when it passes, replace the session's budget.
    /// On failure the session is left exactly as it was.
    pub(crate) fn submit_form(&mut self, session: &mut Session) -> bool {
        match self.form.submit() {
            Ok(budget) => {
                let count = budget.categories().len();
                session.submit(budget);
                self.categories.top();
                self.entries.top();
                self.screen = Screen::Chart;
                self.set_status(format!(
                    "Budget built with {count} categor{}",
                    if count == 1 { "y" } else { "ies" }
                ));
                true
            }
            Err(e) => {
                self.raise(&e);
                false
            }
        }
    }

    /// Category under the legend cursor on the Chart screen.
    pub(crate) fn selected_category(&self, session: &Session) -> Option<CategoryId> {
        session
            .budget()?
            .categories()
            .get(self.categories.index)
            .map(|c| c.id)
    }

    pub(crate) fn selected_entry(&self, session: &Session) -> Option<EntryId> {
        session
            .ledger()
            .entries()
            .get(self.entries.index)
            .map(|e| e.id)
    }

    /// Keep every cursor inside its list after something was added or removed.
    pub(crate) fn clamp_cursors(&mut self, session: &Session) {
        self.fields.clamp(self.form.fields().len());
        self.categories
            .clamp(session.budget().map_or(0, |b| b.categories().len()));
        self.entries.clamp(session.ledger().len());
    }

    /// Put the Setup cursor on `field`, if the form currently shows it.
    pub(crate) fn focus_field(&mut self, field: FormField) {
        if let Some(i) = self.form.fields().iter().position(|f| *f == field) {
            let page = self.page();
            self.fields.select(i, page);
        }
    }

    pub(crate) fn page(&self) -> usize {
        self.visible_rows.max(1)
    }
}

use crate::domain::{
    expense::{next_currency, parse_amount},
    focus::coerce_setting,
    profile::name_error,
    task::parse_due_date,
    find_by_id, find_by_id_mut, prepend, remove_by_id, replace_by_id, resolve_gate, visible_notes,
    Expense, ExpenseCategory, FocusTimer, Gate, Habit, HabitFrequency, Note, PhaseChange,
    PomodoroSettings, Priority, SessionCheck, SettingsField, Task, Theme, UiMode, UserProfile,
    View, DEFAULT_CURRENCY,
};
use crate::notifications;
use crate::persistence::Store;
use crate::ticker::SecondTicker;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const PRIORITY_CHOICES: &[&str] = &["low", "medium", "high"];
pub const FREQUENCY_CHOICES: &[&str] = &["daily", "weekly"];
pub const CATEGORY_CHOICES: &[&str] = &[
    "Food & Drinks",
    "Shopping",
    "Housing",
    "Transportation",
    "Entertainment",
    "Healthcare",
    "Other",
];

/// Number of expenses shown in the "recent" list
pub const RECENT_EXPENSES: usize = 5;

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// What a form creates or edits when submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Onboarding,
    AddTask,
    EditTask(Uuid),
    AddNote,
    AddExpense,
    AddHabit,
    EditProfile,
    PomodoroSettings,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Onboarding => "Welcome to FocusFlow",
            FormKind::AddTask => "Add Task",
            FormKind::EditTask(_) => "Edit Task",
            FormKind::AddNote => "Add Note",
            FormKind::AddExpense => "Add Expense",
            FormKind::AddHabit => "Add Habit",
            FormKind::EditProfile => "Edit Profile",
            FormKind::PomodoroSettings => "Timer Settings",
        }
    }
}

/// A single input line. Choice fields cycle through fixed values instead of
/// accepting typed text.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub choices: Option<&'static [&'static str]>,
}

impl FormField {
    fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            choices: None,
        }
    }

    fn choice(label: &'static str, choices: &'static [&'static str], value: &str) -> Self {
        let value = choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(value))
            .or_else(|| choices.first())
            .copied()
            .unwrap_or_default();
        Self {
            label,
            value: value.to_string(),
            choices: Some(choices),
        }
    }

    /// Step to the next (or previous) choice; no-op for text fields
    pub fn cycle(&mut self, forward: bool) {
        let Some(choices) = self.choices else {
            return;
        };
        if choices.is_empty() {
            return;
        }
        let current = choices.iter().position(|c| *c == self.value).unwrap_or(0);
        let next = if forward {
            (current + 1) % choices.len()
        } else {
            (current + choices.len() - 1) % choices.len()
        };
        self.value = choices[next].to_string();
    }
}

/// Input form state shared by every add/edit dialog
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub editing_field: usize,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

impl InputFormState {
    fn new(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            editing_field: 0,
            error: None,
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    fn current_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.editing_field)
    }
}

/// Destructive actions waiting for a yes/no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetData,
    SignOut,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::ResetData => {
                "Delete all tasks, notes, expenses and habits? This cannot be undone."
            }
            ConfirmAction::SignOut => "Remove your profile from this device?",
        }
    }
}

/// Main application state
pub struct AppState {
    pub store: Store,
    session: Box<dyn SessionCheck>,
    pub profile: Option<UserProfile>,
    pub theme: Theme,
    pub currency: String,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub expenses: Vec<Expense>,
    pub habits: Vec<Habit>,
    pub focus: FocusTimer,
    pub view: View,
    pub ui_mode: UiMode,
    pub selected_task: usize,
    pub selected_note: usize,
    pub selected_expense: usize,
    pub selected_habit: usize,
    pub input_form: Option<InputFormState>,
    pub confirm: Option<ConfirmAction>,
    pub note_query: String,
    pub status_message: Option<String>,
    pub use_emoji: bool,
    pub needs_save: bool,
    second_ticker: SecondTicker,
}

impl AppState {
    /// Load everything from `store`. Without a usable profile the app starts
    /// on the onboarding form.
    pub fn new(store: Store, session: Box<dyn SessionCheck>) -> Self {
        let profile = store.profile();
        let focus = FocusTimer::new(store.pomodoro_settings());

        let mut app = Self {
            theme: store.theme(),
            currency: store
                .currency()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            tasks: store.tasks(),
            notes: store.notes(),
            expenses: store.expenses(),
            habits: store.habits(),
            store,
            session,
            profile,
            focus,
            view: View::Dashboard,
            ui_mode: UiMode::Normal,
            selected_task: 0,
            selected_note: 0,
            selected_expense: 0,
            selected_habit: 0,
            input_form: None,
            confirm: None,
            note_query: String::new(),
            status_message: None,
            use_emoji: true,
            needs_save: false,
            second_ticker: SecondTicker::new(Instant::now()),
        };

        info!(
            tasks = app.tasks.len(),
            notes = app.notes.len(),
            expenses = app.expenses.len(),
            habits = app.habits.len(),
            "state loaded"
        );

        app.check_session();
        app
    }

    /// App over an in-memory store with the local session
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Store::in_memory(), Box::new(crate::domain::LocalSession))
    }

    // ---- Profile gate ----

    /// Re-run the profile gate. Sends the user to onboarding when there is no
    /// profile or the session check fails.
    pub fn check_session(&mut self) {
        if self.ui_mode == UiMode::Onboarding {
            return;
        }
        if resolve_gate(self.profile.as_ref(), self.session.as_ref()) == Gate::Onboarding {
            if self.profile.is_some() {
                warn!("session check failed, returning to onboarding");
            }
            self.start_onboarding();
        }
    }

    fn start_onboarding(&mut self) {
        let name = self.profile.as_ref().map(|p| p.name.clone()).unwrap_or_default();
        self.input_form = Some(InputFormState::new(
            FormKind::Onboarding,
            vec![
                FormField::text("Name", name),
                FormField::text("Bio", ""),
                FormField::text("Avatar URL", ""),
                FormField::text("Email", ""),
            ],
        ));
        self.confirm = None;
        self.ui_mode = UiMode::Onboarding;
    }

    fn submit_onboarding(&mut self, form: &InputFormState) -> Result<(), String> {
        let profile = UserProfile::onboard(form.value(0), form.value(1), form.value(2), form.value(3))
            .ok_or_else(name_error)?;

        info!(name = %profile.name, "profile created");
        self.profile = Some(profile);
        self.clear_collections();
        if let Err(err) = self.store.reset_collections() {
            warn!(error = %err, "could not clear stored collections");
        }
        self.view = View::Dashboard;
        Ok(())
    }

    pub fn start_edit_profile(&mut self) {
        let Some(profile) = &self.profile else {
            return;
        };
        let fields = vec![
            FormField::text("Name", profile.name.clone()),
            FormField::text("Bio", profile.bio.clone().unwrap_or_default()),
            FormField::text("Avatar URL", profile.avatar.clone().unwrap_or_default()),
            FormField::text("Email", profile.email.clone().unwrap_or_default()),
        ];
        self.open_form(FormKind::EditProfile, fields);
    }

    fn clear_collections(&mut self) {
        self.tasks.clear();
        self.notes.clear();
        self.expenses.clear();
        self.habits.clear();
        self.selected_task = 0;
        self.selected_note = 0;
        self.selected_expense = 0;
        self.selected_habit = 0;
        self.note_query.clear();
        self.needs_save = true;
    }

    // ---- Navigation ----

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.status_message = None;
    }

    pub fn next_view(&mut self) {
        self.set_view(self.view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.view.prev());
    }

    fn selection_len(&self) -> usize {
        match self.view {
            View::Tasks => self.tasks.len(),
            View::Notes => self.visible_notes().len(),
            View::Expenses => self.expenses.len(),
            View::Habits => self.habits.len(),
            _ => 0,
        }
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.view {
            View::Tasks => Some(&mut self.selected_task),
            View::Notes => Some(&mut self.selected_note),
            View::Expenses => Some(&mut self.selected_expense),
            View::Habits => Some(&mut self.selected_habit),
            _ => None,
        }
    }

    pub fn move_selection_up(&mut self) {
        if let Some(selected) = self.selection_mut() {
            *selected = selected.saturating_sub(1);
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.selection_len();
        if let Some(selected) = self.selection_mut() {
            if *selected + 1 < len {
                *selected += 1;
            }
        }
    }

    /// Keep every selection inside its list after removals
    fn clamp_selections(&mut self) {
        let note_count = self.visible_notes().len();
        self.selected_task = self.selected_task.min(self.tasks.len().saturating_sub(1));
        self.selected_note = self.selected_note.min(note_count.saturating_sub(1));
        self.selected_expense = self
            .selected_expense
            .min(self.expenses.len().saturating_sub(1));
        self.selected_habit = self.selected_habit.min(self.habits.len().saturating_sub(1));
    }

    // ---- Forms ----

    fn open_form(&mut self, kind: FormKind, fields: Vec<FormField>) {
        self.input_form = Some(InputFormState::new(kind, fields));
        self.ui_mode = UiMode::Form;
    }

    /// Move to the next field
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            if !form.fields.is_empty() {
                form.editing_field = (form.editing_field + 1) % form.fields.len();
            }
        }
    }

    /// Move to the previous field
    pub fn input_form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            let len = form.fields.len();
            if len > 0 {
                form.editing_field = (form.editing_field + len - 1) % len;
            }
        }
    }

    /// Add character to the current field; choice fields ignore typing
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(field) = self.input_form.as_mut().and_then(InputFormState::current_mut) {
            if field.choices.is_none() {
                field.value.push(c);
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(field) = self.input_form.as_mut().and_then(InputFormState::current_mut) {
            if field.choices.is_none() {
                field.value.pop();
            }
        }
    }

    /// Cycle the current choice field
    pub fn input_form_cycle(&mut self, forward: bool) {
        if let Some(field) = self.input_form.as_mut().and_then(InputFormState::current_mut) {
            field.cycle(forward);
        }
    }

    /// Validate and apply the open form. Invalid input keeps the form open
    /// with a message.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        let result = match form.kind {
            FormKind::Onboarding => self.submit_onboarding(&form),
            FormKind::AddTask => self.submit_add_task(&form),
            FormKind::EditTask(id) => self.submit_edit_task(id, &form),
            FormKind::AddNote => self.submit_add_note(&form),
            FormKind::AddExpense => self.submit_add_expense(&form),
            FormKind::AddHabit => self.submit_add_habit(&form),
            FormKind::EditProfile => self.submit_edit_profile(&form),
            FormKind::PomodoroSettings => {
                self.submit_pomodoro_settings(&form);
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                self.ui_mode = UiMode::Normal;
                self.needs_save = true;
            }
            Err(message) => {
                debug!(form = form.kind.title(), %message, "form rejected");
                self.input_form = Some(InputFormState {
                    error: Some(message),
                    ..form
                });
            }
        }
    }

    /// Cancel input form. Onboarding cannot be dismissed.
    pub fn cancel_input_form(&mut self) {
        if self.ui_mode == UiMode::Onboarding {
            return;
        }
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- Tasks ----

    pub fn start_add_task(&mut self) {
        self.open_form(
            FormKind::AddTask,
            vec![
                FormField::text("Title", ""),
                FormField::text("Description", ""),
                FormField::choice("Priority", PRIORITY_CHOICES, Priority::default().name()),
                FormField::text("Due date (YYYY-MM-DD)", ""),
            ],
        );
    }

    pub fn start_edit_task(&mut self) {
        let Some(task) = self.tasks.get(self.selected_task) else {
            return;
        };
        let fields = vec![
            FormField::text("Title", task.title.clone()),
            FormField::text("Description", task.description.clone()),
            FormField::choice("Priority", PRIORITY_CHOICES, task.priority.name()),
            FormField::text(
                "Due date (YYYY-MM-DD)",
                task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            ),
        ];
        self.open_form(FormKind::EditTask(task.id), fields);
    }

    /// Blank means no due date; anything else must parse
    fn due_date_field(input: &str) -> Result<Option<NaiveDate>, String> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        parse_due_date(input)
            .map(Some)
            .ok_or_else(|| "Due date must be YYYY-MM-DD.".to_string())
    }

    fn submit_add_task(&mut self, form: &InputFormState) -> Result<(), String> {
        let priority = Priority::from_name(form.value(2)).unwrap_or_default();
        let mut task =
            Task::new(form.value(0), priority).ok_or_else(|| "Title is required.".to_string())?;
        task.description = form.value(1).trim().to_string();
        task.due_date = Self::due_date_field(form.value(3))?;

        prepend(&mut self.tasks, task);
        self.selected_task = 0;
        Ok(())
    }

    fn submit_edit_task(&mut self, id: Uuid, form: &InputFormState) -> Result<(), String> {
        let title = form.value(0).trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        let due_date = Self::due_date_field(form.value(3))?;

        let Some(mut task) = find_by_id(&self.tasks, id).cloned() else {
            return Err("Task no longer exists.".to_string());
        };
        task.title = title.to_string();
        task.description = form.value(1).trim().to_string();
        task.priority = Priority::from_name(form.value(2)).unwrap_or_default();
        task.due_date = due_date;
        replace_by_id(&mut self.tasks, task);
        Ok(())
    }

    /// Add a task directly
    #[cfg(test)]
    pub fn add_task(&mut self, title: &str, priority: Priority) -> Option<Uuid> {
        let task = Task::new(title, priority)?;
        let id = task.id;
        prepend(&mut self.tasks, task);
        self.needs_save = true;
        Some(id)
    }

    pub fn toggle_selected_task(&mut self) {
        if let Some(task) = self.tasks.get_mut(self.selected_task) {
            task.toggle();
            self.needs_save = true;
        }
    }

    pub fn delete_selected_task(&mut self) {
        if let Some(id) = self.tasks.get(self.selected_task).map(|t| t.id) {
            remove_by_id(&mut self.tasks, id);
            self.clamp_selections();
            self.needs_save = true;
        }
    }

    // ---- Notes ----

    /// Notes as displayed: filtered by the search query, pinned first
    pub fn visible_notes(&self) -> Vec<&Note> {
        visible_notes(&self.notes, &self.note_query)
    }

    pub fn selected_note_id(&self) -> Option<Uuid> {
        self.visible_notes().get(self.selected_note).map(|n| n.id)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected_note_id()
            .and_then(|id| find_by_id(&self.notes, id))
    }

    pub fn start_add_note(&mut self) {
        self.open_form(
            FormKind::AddNote,
            vec![FormField::text("Title", ""), FormField::text("Content", "")],
        );
    }

    fn submit_add_note(&mut self, form: &InputFormState) -> Result<(), String> {
        let note =
            Note::new(form.value(0), form.value(1)).ok_or_else(|| "Title is required.".to_string())?;
        prepend(&mut self.notes, note);
        self.selected_note = 0;
        Ok(())
    }

    /// Add a note directly
    #[cfg(test)]
    pub fn add_note(&mut self, title: &str, content: &str) -> Option<Uuid> {
        let note = Note::new(title, content)?;
        let id = note.id;
        prepend(&mut self.notes, note);
        self.needs_save = true;
        Some(id)
    }

    /// Replace a note's content (result of an external edit)
    pub fn set_note_content(&mut self, id: Uuid, content: String) {
        if let Some(note) = find_by_id_mut(&mut self.notes, id) {
            if note.content != content {
                note.edit_content(content);
                self.needs_save = true;
            }
        }
    }

    pub fn toggle_pin_selected_note(&mut self) {
        if let Some(id) = self.selected_note_id() {
            if let Some(note) = find_by_id_mut(&mut self.notes, id) {
                note.toggle_pin();
                self.needs_save = true;
            }
            // Keep the same note selected after it moves
            if let Some(index) = self.visible_notes().iter().position(|n| n.id == id) {
                self.selected_note = index;
            }
        }
    }

    pub fn delete_selected_note(&mut self) {
        if let Some(id) = self.selected_note_id() {
            remove_by_id(&mut self.notes, id);
            self.clamp_selections();
            self.needs_save = true;
        }
    }

    pub fn start_note_search(&mut self) {
        self.ui_mode = UiMode::SearchingNotes;
    }

    pub fn note_search_add_char(&mut self, c: char) {
        self.note_query.push(c);
        self.selected_note = 0;
    }

    pub fn note_search_backspace(&mut self) {
        self.note_query.pop();
        self.selected_note = 0;
    }

    /// Leave search mode keeping the filter
    pub fn finish_note_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Leave search mode and drop the filter
    pub fn clear_note_search(&mut self) {
        self.note_query.clear();
        self.selected_note = 0;
        self.ui_mode = UiMode::Normal;
    }

    // ---- Expenses ----

    pub fn start_add_expense(&mut self) {
        self.open_form(
            FormKind::AddExpense,
            vec![
                FormField::text("Amount", ""),
                FormField::choice("Category", CATEGORY_CHOICES, ExpenseCategory::default().name()),
                FormField::text("Description", ""),
            ],
        );
    }

    fn submit_add_expense(&mut self, form: &InputFormState) -> Result<(), String> {
        let message = || "Amount must be a positive number.".to_string();
        let amount = parse_amount(form.value(0)).ok_or_else(message)?;
        let category = ExpenseCategory::from_name(form.value(1)).unwrap_or(ExpenseCategory::Other);

        let mut expense = Expense::new(amount, category, form.value(2)).ok_or_else(message)?;
        expense.currency = Some(self.currency.clone());
        prepend(&mut self.expenses, expense);
        self.selected_expense = 0;
        Ok(())
    }

    /// Add an expense directly
    #[cfg(test)]
    pub fn add_expense(&mut self, amount: f64, category: ExpenseCategory, description: &str) -> Option<Uuid> {
        let expense = Expense::new(amount, category, description)?;
        let id = expense.id;
        prepend(&mut self.expenses, expense);
        self.needs_save = true;
        Some(id)
    }

    pub fn delete_selected_expense(&mut self) {
        if let Some(id) = self.expenses.get(self.selected_expense).map(|e| e.id) {
            remove_by_id(&mut self.expenses, id);
            self.clamp_selections();
            self.needs_save = true;
        }
    }

    /// Most recently added expenses
    pub fn recent_expenses(&self) -> &[Expense] {
        &self.expenses[..self.expenses.len().min(RECENT_EXPENSES)]
    }

    pub fn cycle_currency(&mut self) {
        self.currency = next_currency(&self.currency).to_string();
        self.status_message = Some(format!("Currency set to {}", self.currency));
        self.needs_save = true;
    }

    // ---- Habits ----

    pub fn start_add_habit(&mut self) {
        self.open_form(
            FormKind::AddHabit,
            vec![
                FormField::text("Name", ""),
                FormField::text("Description", ""),
                FormField::choice("Frequency", FREQUENCY_CHOICES, HabitFrequency::default().name()),
            ],
        );
    }

    fn submit_add_habit(&mut self, form: &InputFormState) -> Result<(), String> {
        let frequency = HabitFrequency::from_name(form.value(2)).unwrap_or_default();
        let mut habit =
            Habit::new(form.value(0), frequency).ok_or_else(|| "Name is required.".to_string())?;
        let description = form.value(1).trim();
        if !description.is_empty() {
            habit.description = Some(description.to_string());
        }

        self.habits.push(habit);
        self.selected_habit = self.habits.len() - 1;
        Ok(())
    }

    /// Add a habit directly
    #[cfg(test)]
    pub fn add_habit(&mut self, name: &str, frequency: HabitFrequency) -> Option<Uuid> {
        let habit = Habit::new(name, frequency)?;
        let id = habit.id;
        self.habits.push(habit);
        self.needs_save = true;
        Some(id)
    }

    /// Mark or unmark today for the selected habit
    pub fn toggle_selected_habit_today(&mut self) {
        let day = today();
        if let Some(habit) = self.habits.get_mut(self.selected_habit) {
            let done = habit.toggle_completion(day);
            debug!(habit = %habit.name, done, "habit toggled");
            self.needs_save = true;
        }
    }

    pub fn delete_selected_habit(&mut self) {
        if let Some(id) = self.habits.get(self.selected_habit).map(|h| h.id) {
            remove_by_id(&mut self.habits, id);
            self.clamp_selections();
            self.needs_save = true;
        }
    }

    // ---- Focus timer ----

    pub fn toggle_focus(&mut self) {
        if !self.focus.running {
            self.second_ticker.reset(Instant::now());
        }
        self.focus.toggle();
    }

    /// End the current phase early. Manual skips do not notify.
    pub fn skip_focus_phase(&mut self) {
        let change = self.focus.skip();
        self.status_message = Some(format!("Skipped to {}", change.to.label()));
    }

    pub fn reset_focus_phase(&mut self) {
        self.focus.reset_phase();
    }

    pub fn start_pomodoro_settings(&mut self) {
        let settings = self.focus.settings;
        let fields = SettingsField::all()
            .iter()
            .map(|field| FormField::text(field.label(), settings.get(*field).to_string()))
            .collect();
        self.open_form(FormKind::PomodoroSettings, fields);
    }

    fn submit_pomodoro_settings(&mut self, form: &InputFormState) {
        let previous = self.focus.settings;
        let mut settings = PomodoroSettings::default();
        for (index, field) in SettingsField::all().iter().enumerate() {
            settings.set(*field, coerce_setting(form.value(index), *field, previous.get(*field)));
        }
        self.focus.apply_settings(settings);
        info!(?settings, "pomodoro settings updated");
    }

    fn on_phase_complete(&mut self, change: PhaseChange) {
        info!(from = ?change.from, to = ?change.to, sessions = change.sessions_completed, "focus phase complete");
        notifications::notify_phase_complete(&change);
        self.status_message = Some(notifications::phase_message(&change));
    }

    /// Advance timers; called on every loop iteration
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let seconds = self.second_ticker.elapsed_seconds(now);
        if seconds > 0 && self.focus.running {
            if let Some(change) = self.focus.advance(seconds) {
                self.on_phase_complete(change);
            }
        }
        self.check_session();
    }

    // ---- Settings ----

    fn submit_edit_profile(&mut self, form: &InputFormState) -> Result<(), String> {
        let profile = UserProfile::from_form(form.value(0), form.value(1), form.value(2), form.value(3))
            .ok_or_else(name_error)?;
        self.profile = Some(profile);
        self.status_message = Some("Profile updated".to_string());
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.needs_save = true;
    }

    pub fn request_confirm(&mut self, action: ConfirmAction) {
        self.confirm = Some(action);
        self.ui_mode = UiMode::Confirm;
    }

    /// Carry out the pending destructive action
    pub fn confirm_action(&mut self) {
        let Some(action) = self.confirm.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        match action {
            ConfirmAction::ResetData => {
                self.clear_collections();
                if let Err(err) = self.store.reset_collections() {
                    warn!(error = %err, "reset failed");
                    self.status_message = Some(format!("Reset failed: {}", err));
                    return;
                }
                info!("all data reset");
                self.status_message = Some("All data has been reset".to_string());
            }
            ConfirmAction::SignOut => {
                if let Err(err) = self.store.clear_profile() {
                    warn!(error = %err, "could not remove profile");
                }
                self.profile = None;
                self.start_onboarding();
            }
        }
    }

    /// Decline the pending action; nothing changes
    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- Persistence ----

    /// Save state to the store
    pub fn save(&mut self) -> Result<()> {
        if let Some(profile) = &self.profile {
            self.store.save_profile(profile).context("Failed to save profile")?;
        }
        self.store.save_theme(self.theme).context("Failed to save theme")?;
        self.store
            .save_currency(&self.currency)
            .context("Failed to save currency")?;
        self.store
            .save_pomodoro_settings(&self.focus.settings)
            .context("Failed to save timer settings")?;
        self.store.save_tasks(&self.tasks).context("Failed to save tasks")?;
        self.store.save_notes(&self.notes).context("Failed to save notes")?;
        self.store
            .save_expenses(&self.expenses)
            .context("Failed to save expenses")?;
        self.store.save_habits(&self.habits).context("Failed to save habits")?;

        self.needs_save = false;
        Ok(())
    }

    /// Save if anything changed. Failures go to the status line; the next
    /// change retries.
    pub fn autosave(&mut self) {
        if !self.needs_save {
            return;
        }
        if let Err(err) = self.save() {
            let message = format!("{:#}", err);
            warn!(error = %message, "autosave failed");
            self.status_message = Some(format!("Save failed: {}", message));
            self.needs_save = false;
        }
    }
}

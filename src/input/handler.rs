use crate::app::{AppState, ConfirmAction};
use crate::domain::{UiMode, View};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::env;
use std::fs;
use std::io::Write;
use std::process::Command;
use tracing::{debug, warn};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Onboarding | UiMode::Form => handle_input_form_mode(app, key),
        UiMode::SearchingNotes => handle_search_mode(app, key),
        UiMode::Confirm => handle_confirm_mode(app, key),
    }
}

/// True when `key` will launch the external editor, so the caller can hand
/// the terminal over first
pub fn wants_external_editor(app: &AppState, key: &KeyEvent) -> bool {
    app.ui_mode == UiMode::Normal
        && app.view == View::Notes
        && key.code == KeyCode::Char('e')
        && app.selected_note_id().is_some()
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),

        // View switching
        KeyCode::Tab => {
            app.next_view();
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.prev_view();
            return Ok(false);
        }
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            if let Some(view) = View::from_index(index) {
                app.set_view(view);
            }
            return Ok(false);
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            return Ok(false);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            return Ok(false);
        }
        _ => {}
    }

    match app.view {
        View::Dashboard => handle_dashboard_keys(app, key),
        View::Tasks => handle_task_keys(app, key),
        View::Notes => handle_note_keys(app, key),
        View::Expenses => handle_expense_keys(app, key),
        View::Habits => handle_habit_keys(app, key),
        View::Focus => handle_focus_keys(app, key),
        View::Settings => handle_settings_keys(app, key),
    }
    Ok(false)
}

fn handle_dashboard_keys(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char(' ') {
        app.toggle_focus();
    }
}

fn handle_task_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('e') => app.start_edit_task(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_task(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected_task(),
        _ => {}
    }
}

fn handle_note_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.start_add_note(),
        KeyCode::Char('e') => edit_note_external(app),
        KeyCode::Char('p') => app.toggle_pin_selected_note(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected_note(),
        KeyCode::Char('/') => app.start_note_search(),
        KeyCode::Esc => app.clear_note_search(),
        _ => {}
    }
}

fn handle_expense_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.start_add_expense(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected_expense(),
        _ => {}
    }
}

fn handle_habit_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.start_add_habit(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_habit_today(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected_habit(),
        _ => {}
    }
}

fn handle_focus_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_focus(),
        KeyCode::Char('s') => app.skip_focus_phase(),
        KeyCode::Char('r') => app.reset_focus_phase(),
        KeyCode::Char('c') => app.start_pomodoro_settings(),
        _ => {}
    }
}

fn handle_settings_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('p') => app.start_edit_profile(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('c') => app.cycle_currency(),
        KeyCode::Char('f') => app.start_pomodoro_settings(),
        KeyCode::Char('R') => app.request_confirm(ConfirmAction::ResetData),
        KeyCode::Char('o') => app.request_confirm(ConfirmAction::SignOut),
        _ => {}
    }
}

/// Handle keys in input form mode (onboarding included)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Onboarding has nowhere to go back to, so Escape leaves the app
        KeyCode::Esc if app.ui_mode == UiMode::Onboarding => return Ok(true),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Tab | KeyCode::Down => app.input_form_toggle_field(),
        KeyCode::BackTab | KeyCode::Up => app.input_form_prev_field(),
        KeyCode::Left => app.input_form_cycle(false),
        KeyCode::Right => app.input_form_cycle(true),
        KeyCode::Backspace => app.input_form_backspace(),
        // Add character (without Ctrl modifier to allow Ctrl+C to work)
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_form_add_char(c)
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing a note search
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.clear_note_search(),
        KeyCode::Enter => app.finish_note_search(),
        KeyCode::Backspace => app.note_search_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.note_search_add_char(c)
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the yes/no confirmation modal
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_action(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirm(),
        _ => {}
    }
    Ok(false)
}

/// Editor from `$EDITOR`, else the platform default
fn resolve_editor() -> String {
    env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(windows) {
            "notepad".to_string()
        } else {
            "vi".to_string()
        }
    })
}

/// Edit the selected note's content using external $EDITOR
pub fn edit_note_external(app: &mut AppState) {
    edit_note_with(app, &resolve_editor());
}

/// Open the selected note in `editor`. Failures leave the note unchanged and
/// show on the status line.
fn edit_note_with(app: &mut AppState, editor: &str) {
    let Some(note) = app.selected_note() else {
        return;
    };
    let id = note.id;
    let content = note.content.clone();

    match run_editor(editor, &content) {
        Ok(Some(edited)) => app.set_note_content(id, edited),
        Ok(None) => {
            warn!(%editor, "editor exited with failure, note unchanged");
            app.status_message = Some("Editor exited with an error; note unchanged".to_string());
        }
        Err(err) => {
            let message = format!("{:#}", err);
            warn!(%editor, error = %message, "external edit failed");
            app.status_message = Some(format!("Could not edit note: {}", message));
        }
    }
}

/// Round-trip `content` through `editor`. None when the editor exits non-zero.
fn run_editor(editor: &str, content: &str) -> Result<Option<String>> {
    let mut temp_file = tempfile::Builder::new()
        .prefix("focusflow-note-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create temp file for note")?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write temp file for note")?;

    // Keep the file on disk while the editor has it open
    let temp_path = temp_file.into_temp_path();

    debug!(%editor, "launching editor");
    let status = Command::new(editor)
        .arg(&temp_path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    if !status.success() {
        return Ok(None);
    }
    let edited = fs::read_to_string(&temp_path).context("Failed to read edited note")?;
    Ok(Some(edited))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, UserProfile};
    use crate::persistence::Store;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        let mut store = Store::in_memory();
        store
            .save_profile(&UserProfile::onboard("Test User", "", "", "").unwrap())
            .unwrap();
        AppState::new(store, Box::new(crate::domain::LocalSession))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut app = create_test_app();
        app.start_add_task();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_view_switching() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.view, View::Tasks);
        handle_key(&mut app, key(KeyCode::BackTab)).unwrap();
        assert_eq!(app.view, View::Dashboard);
        handle_key(&mut app, key(KeyCode::Char('6'))).unwrap();
        assert_eq!(app.view, View::Focus);
        handle_key(&mut app, key(KeyCode::Char('7'))).unwrap();
        assert_eq!(app.view, View::Settings);
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        app.set_view(View::Tasks);

        // Press 'a' to open form
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Form);
        assert!(app.input_form.is_some());

        // 'q' is just text inside a form
        type_text(&mut app, "quiz");

        // Submit with Enter
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].title, "quiz");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_form_choice_field_cycles() {
        let mut app = create_test_app();
        app.set_view(View::Tasks);
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Pick");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        // Typing into a choice field is ignored
        type_text(&mut app, "zzz");
        handle_key(&mut app, key(KeyCode::Left)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.tasks[0].priority, Priority::Low);
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut app = create_test_app();
        app.set_view(View::Habits);
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Read");
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.habits.is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_escape_quits_onboarding() {
        let mut app = AppState::in_memory();
        assert_eq!(app.ui_mode, UiMode::Onboarding);
        assert!(handle_key(&mut app, key(KeyCode::Esc)).unwrap());
    }

    #[test]
    fn test_handle_delete_task() {
        let mut app = create_test_app();
        app.add_task("One", Priority::Low);
        app.add_task("Two", Priority::Low);
        app.set_view(View::Tasks);

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.tasks.len(), 1);
        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_note_search_keys() {
        let mut app = create_test_app();
        app.add_note("Alpha", "");
        app.add_note("Beta", "");
        app.set_view(View::Notes);

        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::SearchingNotes);
        type_text(&mut app, "alp");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.visible_notes().len(), 1);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.visible_notes().len(), 2);
    }

    #[test]
    fn test_external_editor_detection() {
        let mut app = create_test_app();
        app.set_view(View::Notes);
        let e = key(KeyCode::Char('e'));
        assert!(!wants_external_editor(&app, &e));

        app.add_note("Note", "body");
        assert!(wants_external_editor(&app, &e));
        assert!(!wants_external_editor(&app, &key(KeyCode::Char('p'))));
    }

    #[test]
    fn test_focus_keys() {
        let mut app = create_test_app();
        app.set_view(View::Focus);

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.focus.running);
        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(!app.focus.running);
        assert_eq!(app.focus.sessions_completed, 1);
    }

    #[test]
    fn test_reset_confirmation_keys() {
        let mut app = create_test_app();
        app.add_task("Keep", Priority::Low);
        app.set_view(View::Settings);

        handle_key(&mut app, key(KeyCode::Char('R'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Confirm);
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.tasks.len(), 1);

        handle_key(&mut app, key(KeyCode::Char('R'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_habit_space_toggles_today() {
        let mut app = create_test_app();
        app.add_habit("Water", crate::domain::HabitFrequency::Daily);
        app.set_view(View::Habits);

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert_eq!(app.habits[0].completion_count(), 1);
    }

    fn notes_app_with_note() -> AppState {
        let mut app = create_test_app();
        app.add_note("Plan", "original");
        app.set_view(View::Notes);
        app
    }

    #[test]
    fn test_missing_editor_is_not_fatal() {
        let mut app = notes_app_with_note();

        edit_note_with(&mut app, "/nonexistent/editor-binary");

        assert_eq!(app.notes[0].content, "original");
        let status = app.status_message.as_deref().unwrap();
        assert!(status.starts_with("Could not edit note"));
        assert!(status.contains("/nonexistent/editor-binary"));

        // The session carries on
        assert!(!handle_key(&mut app, key(KeyCode::Char('j'))).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_editor_leaves_note_unchanged() {
        let mut app = notes_app_with_note();

        edit_note_with(&mut app, "false");

        assert_eq!(app.notes[0].content, "original");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Editor exited with an error; note unchanged")
        );
    }
}

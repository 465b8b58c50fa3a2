pub mod dashboard_pane;
pub mod expense_pane;
pub mod focus_pane;
pub mod habit_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod notes_pane;
pub mod settings_pane;
pub mod styles;
pub mod task_pane;

use crate::app::AppState;
use crate::domain::{UiMode, View};
use dashboard_pane::render_dashboard_pane;
use expense_pane::render_expense_pane;
use focus_pane::render_focus_pane;
use habit_pane::render_habit_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_confirm_modal;
use notes_pane::render_notes_pane;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use settings_pane::render_settings_pane;
use task_pane::render_task_pane;
use styles::{border_style, default_style, error_style, muted_style, selected_style, title_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();

    // Paint the theme background first
    f.render_widget(Block::default().style(default_style(app.theme)), size);

    // Onboarding shows only the profile form
    if app.ui_mode == UiMode::Onboarding {
        render_input_form(f, app, size);
        return;
    }

    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);
    render_tabs(f, app, layout.tabs_area);

    match app.view {
        View::Dashboard => render_dashboard_pane(f, app, layout.content_area),
        View::Tasks => render_task_pane(f, app, layout.content_area),
        View::Notes => render_notes_pane(f, app, layout.content_area),
        View::Expenses => render_expense_pane(f, app, layout.content_area),
        View::Habits => render_habit_pane(f, app, layout.content_area),
        View::Focus => render_focus_pane(f, app, layout.content_area),
        View::Settings => render_settings_pane(f, app, layout.content_area),
    }

    render_status_line(f, app, layout.status_area);

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    // Render confirmation modal if active
    if app.ui_mode == UiMode::Confirm {
        render_confirm_modal(f, app, size);
    }
}

fn render_tabs(f: &mut Frame, app: &AppState, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::raw(format!("{} {}", i + 1, view.title())))
        .collect();

    let name = app.profile.as_ref().map(|p| p.name.as_str()).unwrap_or("");
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.theme))
                .title(Span::styled(" FocusFlow ", title_style(app.theme)))
                .title(Span::styled(format!(" {} ", name), muted_style(app.theme))),
        )
        .select(app.view.index())
        .style(default_style(app.theme))
        .highlight_style(selected_style(app.theme));
    f.render_widget(tabs, area);
}

/// Last status message, or the timer state while it runs
fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status_message {
        Some(message) if message.starts_with("Save failed") => {
            Line::from(Span::styled(format!(" {}", message), error_style()))
        }
        Some(message) => Line::from(Span::styled(format!(" {}", message), muted_style(app.theme))),
        None if app.focus.running => Line::from(Span::styled(
            format!(
                " {} {} remaining",
                app.focus.phase.label(),
                app.focus.remaining_formatted()
            ),
            muted_style(app.theme),
        )),
        None => Line::raw(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, HabitFrequency, Priority, UserProfile};
    use crate::persistence::Store;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn populated_app() -> AppState {
        let mut store = Store::in_memory();
        store
            .save_profile(&UserProfile::onboard("Robin", "", "", "").unwrap())
            .unwrap();
        let mut app = AppState::new(store, Box::new(crate::domain::LocalSession));
        app.use_emoji = false;
        app.add_task("Write tests", Priority::High);
        app.add_note("Ideas", "ship it");
        app.add_expense(4.5, ExpenseCategory::FoodAndDrinks, "Coffee");
        app.add_habit("Stretch", HabitFrequency::Daily);
        app
    }

    #[test]
    fn test_every_view_renders() {
        let mut app = populated_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        for view in View::all() {
            app.set_view(*view);
            terminal.draw(|f| render(f, &app)).unwrap();
            assert!(buffer_text(&terminal).contains(view.title()));
        }
    }

    #[test]
    fn test_dashboard_greets_user() {
        let app = populated_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Robin!"));
        assert!(text.contains("Write tests"));
    }

    #[test]
    fn test_onboarding_renders_form_only() {
        let app = AppState::in_memory();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Welcome to FocusFlow"));
        assert!(!text.contains("Dashboard"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let mut app = populated_app();
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        for view in View::all() {
            app.set_view(*view);
            terminal.draw(|f| render(f, &app)).unwrap();
        }
        app.start_add_task();
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}

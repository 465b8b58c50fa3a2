use crate::app::AppState;
use crate::domain::{UiMode, View};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Key hints for the current mode and view
pub fn hints(app: &AppState) -> &'static [&'static str] {
    match app.ui_mode {
        UiMode::Onboarding => &["Tab next field", "Enter save profile", "Esc quit"],
        UiMode::Form => &[
            "Tab/↑↓ field",
            "←/→ choose",
            "Enter save",
            "Esc cancel",
        ],
        UiMode::SearchingNotes => &["type to filter", "Enter keep filter", "Esc clear"],
        UiMode::Confirm => &["y confirm", "n cancel"],
        UiMode::Normal => match app.view {
            View::Dashboard => &["Tab/1-7 views", "space start/pause timer", "q quit"],
            View::Tasks => &[
                "↑/↓ select",
                "a add",
                "e edit",
                "space done",
                "x delete",
                "q quit",
            ],
            View::Notes => &[
                "↑/↓ select",
                "a add",
                "e edit in $EDITOR",
                "p pin",
                "/ search",
                "x delete",
                "q quit",
            ],
            View::Expenses => &["↑/↓ select", "a add", "x delete", "q quit"],
            View::Habits => &["↑/↓ select", "a add", "space done today", "x delete", "q quit"],
            View::Focus => &[
                "space start/pause",
                "s skip",
                "r reset",
                "c settings",
                "q quit",
            ],
            View::Settings => &[
                "p profile",
                "t theme",
                "c currency",
                "f timer",
                "R reset data",
                "o sign out",
                "q quit",
            ],
        },
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let text = format!(" {}", hints(app).join("   "));
    let paragraph = Paragraph::new(Line::raw(text)).style(hint_style(app.theme));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_mode() {
        let mut app = AppState::in_memory();
        assert!(hints(&app).contains(&"Esc quit"));

        app.ui_mode = UiMode::Normal;
        app.view = View::Notes;
        assert!(hints(&app).contains(&"/ search"));
    }
}

use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, muted_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn row<'a>(label: &'a str, value: String, app: &AppState) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), title_style(app.theme)),
        Span::raw(value),
    ])
}

/// Render profile, preferences and timer settings
pub fn render_settings_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Profile
            Constraint::Length(5), // Preferences
            Constraint::Length(7), // Timer
            Constraint::Min(0),    // Danger zone
        ])
        .split(area);

    let section = |title: &'static str| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(theme))
            .title(Span::styled(format!(" {} ", title), title_style(theme)))
    };

    let profile_lines = match &app.profile {
        Some(profile) => vec![
            row("Name", profile.name.clone(), app),
            row("Bio", profile.bio.clone().unwrap_or_default(), app),
            row("Avatar", profile.avatar.clone().unwrap_or_default(), app),
            row("Email", profile.email.clone().unwrap_or_default(), app),
            Line::from(Span::styled("p to edit", muted_style(theme))),
        ],
        None => vec![Line::from(Span::styled("No profile", muted_style(theme)))],
    };
    f.render_widget(
        Paragraph::new(profile_lines)
            .style(default_style(theme))
            .block(section("Profile"))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let preferences = vec![
        row("Theme", format!("{}  (t to toggle)", app.theme.name()), app),
        row("Currency", format!("{}  (c to change)", app.currency), app),
    ];
    f.render_widget(
        Paragraph::new(preferences)
            .style(default_style(theme))
            .block(section("Preferences")),
        chunks[1],
    );

    let settings = app.focus.settings;
    let timer_lines = vec![
        row("Work", format!("{} min", settings.work_duration), app),
        row("Short break", format!("{} min", settings.break_duration), app),
        row("Long break", format!("{} min", settings.long_break_duration), app),
        row(
            "Long break",
            format!("every {} sessions", settings.sessions_before_long_break),
            app,
        ),
        Line::from(Span::styled("f to edit", muted_style(theme))),
    ];
    f.render_widget(
        Paragraph::new(timer_lines)
            .style(default_style(theme))
            .block(section("Focus Timer")),
        chunks[2],
    );

    let danger = vec![
        Line::raw("R  Reset all data (tasks, notes, expenses, habits)"),
        Line::raw("o  Sign out and remove the profile from this device"),
    ];
    f.render_widget(
        Paragraph::new(danger)
            .style(default_style(theme))
            .block(section("Data")),
        chunks[3],
    );
}

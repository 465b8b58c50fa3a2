use crate::domain::{FocusPhase, Priority, Theme};
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
    }
}

/// Muted secondary text
pub fn muted_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::DarkGray),
        Theme::Dark => Style::default().fg(Color::Gray),
    }
}

/// Selected row highlight style
pub fn selected_style(theme: Theme) -> Style {
    let bg = match theme {
        Theme::Light => Color::LightBlue,
        Theme::Dark => Color::LightCyan,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(theme: Theme) -> Style {
    let fg = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::DarkGray),
        Theme::Dark => Style::default().fg(Color::Gray),
    }
}

/// Modal background style
pub fn modal_bg_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().bg(Color::Gray).fg(Color::Black),
        Theme::Dark => Style::default().bg(Color::DarkGray).fg(Color::White),
    }
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style(theme: Theme) -> Style {
    muted_style(theme)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed item style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Streak and success accents
pub fn success_style() -> Style {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
}

/// Overdue and at-risk warnings
pub fn warning_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Pinned note marker
pub fn pin_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

/// Gauge colour follows the phase
pub fn phase_gauge_style(phase: FocusPhase) -> Style {
    let fg = match phase {
        FocusPhase::Work => Color::Red,
        FocusPhase::Break => Color::Green,
        FocusPhase::LongBreak => Color::Blue,
    };
    Style::default().fg(fg).bg(Color::DarkGray)
}

/// Bar chart bars
pub fn chart_style() -> Style {
    Style::default().fg(Color::Cyan)
}

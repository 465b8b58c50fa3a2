use crate::app::AppState;
use crate::domain::{FocusPhase, FocusTimer};
use crate::ui::styles::{
    border_style, default_style, muted_style, phase_gauge_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Phase that follows the current one if it completes now
fn next_phase(timer: &FocusTimer) -> FocusPhase {
    match timer.phase {
        FocusPhase::Work => {
            let cadence = timer.settings.sessions_before_long_break.max(1);
            if (timer.sessions_completed + 1) % cadence == 0 {
                FocusPhase::LongBreak
            } else {
                FocusPhase::Break
            }
        }
        FocusPhase::Break | FocusPhase::LongBreak => FocusPhase::Work,
    }
}

/// Render the pomodoro timer
pub fn render_focus_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let timer = &app.focus;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" Focus Timer ", title_style(theme)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(4), // Phase and clock
            Constraint::Length(1),
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(3), // Session info
            Constraint::Min(0),
        ])
        .split(inner);

    let state = if timer.running { "running" } else { "paused" };
    let clock = Paragraph::new(vec![
        Line::from(Span::styled(timer.phase.label(), title_style(theme))),
        Line::raw(""),
        Line::from(Span::styled(timer.remaining_formatted(), default_style(theme))),
        Line::from(Span::styled(state, muted_style(theme))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(clock, chunks[1]);

    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(chunks[3])[1];
    let percent = (timer.elapsed_ratio() * 100.0).round() as u16;
    let gauge = Gauge::default()
        .gauge_style(phase_gauge_style(timer.phase))
        .ratio(timer.elapsed_ratio().clamp(0.0, 1.0))
        .label(format!("{}%", percent.min(100)));
    f.render_widget(gauge, gauge_area);

    let info = Paragraph::new(vec![
        Line::raw(timer.session_label()),
        Line::from(Span::styled(
            format!(
                "Completed sessions: {}  ·  Next: {}",
                timer.sessions_completed,
                next_phase(timer).label()
            ),
            muted_style(theme),
        )),
        Line::from(Span::styled(
            format!(
                "{} / {} / {} min",
                timer.settings.work_duration,
                timer.settings.break_duration,
                timer.settings.long_break_duration
            ),
            muted_style(theme),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(info, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PomodoroSettings;

    #[test]
    fn test_next_phase_matches_rotation() {
        let mut timer = FocusTimer::new(PomodoroSettings::default());
        for _ in 0..8 {
            let predicted = next_phase(&timer);
            let change = timer.skip();
            assert_eq!(change.to, predicted);
        }
    }
}

use crate::app::{today, AppState};
use crate::domain::{views, Habit, StreakStatus};
use crate::ui::styles::{
    border_style, default_style, muted_style, selected_style, success_style, title_style,
    warning_style,
};
use chrono::{Days, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Days shown in the history strip
const HISTORY_DAYS: u64 = 7;

/// Render the habit list with today's check, streak and a week of history
pub fn render_habit_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let day = today();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(area);

    let items: Vec<ListItem> = app
        .habits
        .iter()
        .map(|habit| ListItem::new(create_habit_line(habit, day, app.use_emoji)))
        .collect();

    let done_today = app.habits.iter().filter(|h| h.is_completed_on(day)).count();
    let title = format!(" Habits ({}/{} today) ", done_today, app.habits.len());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme))
                .title(Span::styled(title, title_style(theme))),
        )
        .style(default_style(theme))
        .highlight_style(selected_style(theme));

    let mut state = ListState::default();
    if !app.habits.is_empty() {
        state.select(Some(app.selected_habit));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    render_history(f, app, day, chunks[1]);
}

/// Format: [x] Meditate (daily)  🔥 3 day streak
fn create_habit_line(habit: &Habit, today: NaiveDate, use_emoji: bool) -> Line<'static> {
    let status = habit.streak_status(today);
    let mut spans = vec![
        Span::raw(format!(
            "{} ",
            views::check_glyph(habit.is_completed_on(today), use_emoji)
        )),
        Span::raw(habit.name.clone()),
        Span::raw(format!(" ({})", habit.frequency.name())),
    ];

    let badge = views::streak_badge(status, use_emoji);
    if !badge.is_empty() {
        let style = match status {
            StreakStatus::AtRisk(_) => warning_style(),
            _ => success_style(),
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(badge, style));
    }

    Line::from(spans)
}

/// Last week for the selected habit, oldest first. One flag per day.
fn history(habit: &Habit, today: NaiveDate) -> Vec<(NaiveDate, bool)> {
    (0..HISTORY_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|day| (day, habit.is_completed_on(day)))
        .collect()
}

fn render_history(f: &mut Frame, app: &AppState, day: NaiveDate, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" Last 7 days ", title_style(theme)));

    let Some(habit) = app.habits.get(app.selected_habit) else {
        let empty = Paragraph::new("No habits yet. Press 'a' to add one.")
            .style(muted_style(theme))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let days = history(habit, day);
    let labels: Vec<Span> = days
        .iter()
        .map(|(d, _)| Span::raw(format!("{:^7}", d.format("%a"))))
        .collect();
    let marks: Vec<Span> = days
        .iter()
        .map(|(_, done)| {
            if *done {
                Span::styled(format!("{:^7}", "●"), success_style())
            } else {
                Span::styled(format!("{:^7}", "·"), muted_style(theme))
            }
        })
        .collect();

    let mut lines = vec![Line::from(labels), Line::from(marks)];
    if let Some(description) = &habit.description {
        lines.push(Line::from(Span::styled(description.clone(), muted_style(theme))));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{} completions since {}",
            habit.completion_count(),
            views::format_date(habit.created_at)
        ),
        muted_style(theme),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

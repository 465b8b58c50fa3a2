use crate::app::{today, AppState};
use crate::domain::{expense::format_currency, views, Theme};
use crate::report::stats::{best_streak, calculate_task_stats, summarize_expenses};
use crate::ui::layout::create_card_grid;
use crate::ui::styles::{
    border_style, default_style, muted_style, phase_gauge_style, priority_style, success_style,
    title_style, warning_style,
};
use chrono::{Local, Timelike};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Open tasks listed on the tasks card
const TOP_OPEN_TASKS: usize = 3;

fn card(title: &str, theme: Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(format!(" {} ", title), title_style(theme)))
}

/// Render the overview: greeting plus tasks, focus, habits and expenses cards
pub fn render_dashboard_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let name = app.profile.as_ref().map(|p| p.first_name()).unwrap_or("there");
    let now = Local::now();
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}, {}!", views::greeting(now.hour()), name),
            title_style(theme),
        )),
        Line::from(Span::styled(
            format!(" {}", now.format("%A, %B %-d")),
            muted_style(theme),
        )),
    ]);
    f.render_widget(header, chunks[0]);

    let cards = create_card_grid(chunks[1]);
    render_tasks_card(f, app, cards[0]);
    render_focus_card(f, app, cards[1]);
    render_habits_card(f, app, cards[2]);
    render_expenses_card(f, app, cards[3]);
}

fn render_tasks_card(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let stats = calculate_task_stats(&app.tasks, today());

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} open", stats.open), default_style(theme)),
        Span::raw("  ·  "),
        Span::styled(format!("{} done", stats.completed), success_style()),
    ])];
    if stats.overdue > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} overdue", stats.overdue),
            warning_style(),
        )));
    }
    lines.push(Line::raw(""));

    let open: Vec<_> = app
        .tasks
        .iter()
        .filter(|t| !t.completed)
        .take(TOP_OPEN_TASKS)
        .collect();
    if open.is_empty() {
        lines.push(Line::from(Span::styled("Nothing to do. Enjoy!", muted_style(theme))));
    }
    for task in open {
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", views::check_glyph(false, app.use_emoji))),
            Span::raw(views::truncate(&task.title, 40)),
            Span::raw(" "),
            Span::styled(views::priority_badge(task.priority), priority_style(task.priority)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(card("Tasks", theme))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_focus_card(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let block = card("Focus", theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let timer = &app.focus;
    let state = if timer.running { "running" } else { "paused" };
    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(timer.phase.label(), title_style(theme)),
            Span::raw(format!("  {}", timer.remaining_formatted())),
        ]),
        Line::from(Span::styled(
            format!("{} · {}", timer.session_label(), state),
            muted_style(theme),
        )),
    ]);
    f.render_widget(text, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(phase_gauge_style(timer.phase))
        .ratio(timer.elapsed_ratio().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, rows[1]);
}

fn render_habits_card(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let day = today();
    let done_today = app.habits.iter().filter(|h| h.is_completed_on(day)).count();

    let mut lines = vec![Line::from(format!(
        "{}/{} done today",
        done_today,
        app.habits.len()
    ))];
    let best = best_streak(&app.habits, day);
    if best > 0 {
        lines.push(Line::from(Span::styled(
            format!("Best streak: {} days", best),
            success_style(),
        )));
    }
    lines.push(Line::raw(""));

    for habit in app.habits.iter().take(4) {
        lines.push(Line::raw(format!(
            "{} {}",
            views::check_glyph(habit.is_completed_on(day), app.use_emoji),
            views::truncate(&habit.name, 40)
        )));
    }
    if app.habits.is_empty() {
        lines.push(Line::from(Span::styled("No habits yet", muted_style(theme))));
    }

    let paragraph = Paragraph::new(lines)
        .block(card("Habits", theme))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_expenses_card(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let summary = summarize_expenses(&app.expenses);

    let mut lines = vec![Line::from(Span::styled(
        format!("Total: {}", format_currency(summary.total, &app.currency)),
        title_style(theme),
    ))];
    if let Some((category, amount)) = summary.top_category() {
        lines.push(Line::from(Span::styled(
            format!("Top: {} ({})", category.name(), format_currency(amount, &app.currency)),
            muted_style(theme),
        )));
    }
    lines.push(Line::raw(""));

    for expense in app.recent_expenses() {
        lines.push(Line::raw(format!(
            "{}  {}",
            format_currency(expense.amount, &app.currency),
            views::truncate(expense.label(), 30)
        )));
    }
    if app.expenses.is_empty() {
        lines.push(Line::from(Span::styled("No expenses recorded", muted_style(theme))));
    }

    let paragraph = Paragraph::new(lines)
        .block(card("Expenses", theme))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

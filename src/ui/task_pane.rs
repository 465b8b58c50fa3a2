use crate::app::{today, AppState};
use crate::domain::{views, Task};
use crate::ui::layout::split_columns;
use crate::ui::styles::{
    border_style, default_style, done_style, muted_style, priority_style, selected_style,
    title_style, warning_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the task list and the details of the selected task
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let (list_area, details_area) = split_columns(area, 65);
    let theme = app.theme;
    let day = today();

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|task| ListItem::new(create_task_line(task, day, app.use_emoji)))
        .collect();

    let open = app.tasks.iter().filter(|t| !t.completed).count();
    let title = format!(" Tasks ({} open / {}) ", open, app.tasks.len());

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
    if !app.tasks.is_empty() {
        state.select(Some(app.selected_task));
    }
    f.render_stateful_widget(list, list_area, &mut state);

    render_task_details(f, app, details_area);
}

/// Create a single line for a task
/// Format: [ ] Write proposal (high)  due Mar 5
fn create_task_line(task: &Task, today: NaiveDate, use_emoji: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(
        "{} ",
        views::check_glyph(task.completed, use_emoji)
    ))];

    if task.completed {
        spans.push(Span::styled(task.title.clone(), done_style()));
    } else {
        spans.push(Span::raw(task.title.clone()));
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        views::priority_badge(task.priority),
        priority_style(task.priority),
    ));

    if let Some(due) = task.due_date {
        let text = format!("  due {}", views::format_day(due));
        if task.is_overdue(today) {
            spans.push(Span::styled(format!("{} (overdue)", text), warning_style()));
        } else {
            spans.push(Span::raw(text));
        }
    }

    Line::from(spans)
}

fn render_task_details(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" Details ", title_style(theme)));

    let Some(task) = app.tasks.get(app.selected_task) else {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .style(muted_style(theme))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Title: ", title_style(theme)),
            Span::raw(task.title.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", title_style(theme)),
            Span::styled(task.priority.name(), priority_style(task.priority)),
        ]),
        Line::from(vec![
            Span::styled("Status: ", title_style(theme)),
            Span::raw(if task.completed { "completed" } else { "open" }),
        ]),
        Line::from(vec![
            Span::styled("Created: ", title_style(theme)),
            Span::raw(views::format_date(task.created_at)),
        ]),
    ];

    if let Some(due) = task.due_date {
        lines.push(Line::from(vec![
            Span::styled("Due: ", title_style(theme)),
            Span::raw(due.format("%b %-d, %Y").to_string()),
        ]));
    }
    lines.push(Line::raw(""));

    if task.description.trim().is_empty() {
        lines.push(Line::from(Span::styled("Description: (empty)", muted_style(theme))));
    } else {
        lines.push(Line::from(Span::styled("Description:", title_style(theme))));
        for line in task.description.lines() {
            lines.push(Line::raw(format!("  {}", line)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .style(default_style(theme))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_create_task_line() {
        let mut task = Task::new("Write proposal", Priority::High).unwrap();
        task.due_date = NaiveDate::from_ymd_opt(2024, 3, 5);

        let text = line_text(&create_task_line(&task, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), false));
        assert_eq!(text, "[ ] Write proposal (high)  due Mar 5");
    }

    #[test]
    fn test_overdue_task_line() {
        let mut task = Task::new("Late", Priority::Low).unwrap();
        task.due_date = NaiveDate::from_ymd_opt(2024, 3, 5);

        let text = line_text(&create_task_line(&task, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), false));
        assert!(text.ends_with("(overdue)"));
    }
}

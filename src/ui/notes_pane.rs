use crate::app::AppState;
use crate::domain::{views, Note, UiMode};
use crate::ui::layout::split_columns;
use crate::ui::styles::{
    border_style, default_style, muted_style, pin_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the searchable note list and the selected note's content
pub fn render_notes_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let (list_area, content_area) = split_columns(area, 40);
    let theme = app.theme;
    let notes = app.visible_notes();

    let items: Vec<ListItem> = notes
        .iter()
        .map(|note| ListItem::new(create_note_line(note, app.use_emoji)))
        .collect();

    let title = if app.ui_mode == UiMode::SearchingNotes {
        format!(" Notes - search: {}█ ", app.note_query)
    } else if !app.note_query.is_empty() {
        format!(" Notes - \"{}\" ({}/{}) ", app.note_query, notes.len(), app.notes.len())
    } else {
        format!(" Notes ({}) ", app.notes.len())
    };

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
    if !notes.is_empty() {
        state.select(Some(app.selected_note));
    }
    f.render_stateful_widget(list, list_area, &mut state);

    render_note_content(f, app, content_area);
}

/// Format: 📌 Groceries · Mar 5, 2024
fn create_note_line(note: &Note, use_emoji: bool) -> Line<'static> {
    let mut spans = Vec::new();
    if note.pinned {
        let marker = if use_emoji { "📌 " } else { "* " };
        spans.push(Span::styled(marker, pin_style()));
    }
    spans.push(Span::raw(views::truncate(&note.title, 40)));
    spans.push(Span::raw(format!(" · {}", views::format_date(note.last_edited))));
    Line::from(spans)
}

fn render_note_content(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let Some(note) = app.selected_note() else {
        let message = if app.note_query.is_empty() {
            "No notes yet. Press 'a' to add one."
        } else {
            "No notes match your search."
        };
        let empty = Paragraph::new(message).style(muted_style(theme)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme)),
        );
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "Created {} · edited {}",
                views::format_date(note.created_at),
                views::format_date(note.last_edited)
            ),
            muted_style(theme),
        )),
        Line::raw(""),
    ];
    if note.content.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "(empty - press 'e' to write)",
            muted_style(theme),
        )));
    } else {
        lines.extend(note.content.lines().map(Line::raw));
    }

    let paragraph = Paragraph::new(lines)
        .style(default_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme))
                .title(Span::styled(format!(" {} ", note.title), title_style(theme))),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

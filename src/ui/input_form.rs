use crate::app::{AppState, FormKind};
use crate::ui::{
    layout::create_form_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the open add/edit form (also used for onboarding)
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };

    let modal_area = create_form_area(area, form.fields.len());

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();

    if form.kind == FormKind::Onboarding {
        lines.push(Line::raw("Tell us who you are. Your data stays on this device."));
    }

    for (index, field) in form.fields.iter().enumerate() {
        let editing = index == form.editing_field;
        let label = if editing {
            format!("{}: (editing)", field.label)
        } else {
            format!("{}:", field.label)
        };
        lines.push(Line::raw(label));

        let value_line = match field.choices {
            Some(_) => Line::from(vec![
                Span::raw("> "),
                Span::raw(if editing { "◀ " } else { "" }),
                Span::styled(field.value.as_str(), modal_title_style()),
                Span::raw(if editing { " ▶" } else { "" }),
            ]),
            None => Line::from(vec![
                Span::raw("> "),
                Span::styled(field.value.as_str(), modal_title_style()),
                if editing {
                    Span::styled("█", modal_title_style()) // Cursor
                } else {
                    Span::raw("")
                },
            ]),
        };
        lines.push(value_line);
        lines.push(Line::raw(""));
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.as_str(), error_style())));
    }

    let instructions = if form.kind == FormKind::Onboarding {
        "Tab to switch fields  ·  Enter to continue  ·  Esc to quit"
    } else {
        "Tab to switch fields  ·  ←/→ to choose  ·  Enter to save  ·  Esc to cancel"
    };
    lines.push(Line::raw(instructions));

    let title = format!(" {} ", form.kind.title());
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style(app.theme)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

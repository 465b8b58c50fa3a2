use crate::app::AppState;
use crate::domain::{expense::format_currency, views, Expense};
use crate::report::stats::summarize_expenses;
use crate::ui::layout::split_columns;
use crate::ui::styles::{
    border_style, chart_style, default_style, muted_style, selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the expense list, the total and a per-category chart
pub fn render_expense_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let (list_area, summary_area) = split_columns(area, 55);
    let theme = app.theme;

    let items: Vec<ListItem> = app
        .expenses
        .iter()
        .map(|expense| ListItem::new(create_expense_line(expense, &app.currency)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme))
                .title(Span::styled(
                    format!(" Expenses ({}) ", app.expenses.len()),
                    title_style(theme),
                )),
        )
        .style(default_style(theme))
        .highlight_style(selected_style(theme));

    let mut state = ListState::default();
    if !app.expenses.is_empty() {
        state.select(Some(app.selected_expense));
    }
    f.render_stateful_widget(list, list_area, &mut state);

    render_summary(f, app, summary_area);
}

/// Format: $12.50  Lunch  [Food & Drinks]  Mar 5, 2024
fn create_expense_line(expense: &Expense, currency: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:>12}  ", format_currency(expense.amount, currency))),
        Span::raw(views::truncate(expense.label(), 30)),
        Span::raw(format!("  [{}]  ", expense.category.name())),
        Span::raw(views::format_date(expense.date)),
    ])
}

fn render_summary(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let summary = summarize_expenses(&app.expenses);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let total = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Total: {}", format_currency(summary.total, &app.currency)),
            title_style(theme),
        )),
        Line::from(Span::styled(
            format!("Currency: {} (change in Settings)", app.currency),
            muted_style(theme),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(theme)),
    );
    f.render_widget(total, chunks[0]);

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" By Category ", title_style(theme)));

    if summary.by_category.is_empty() {
        let empty = Paragraph::new("No expenses yet. Press 'a' to add one.")
            .style(muted_style(theme))
            .block(chart_block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let bars: Vec<Bar> = summary
        .by_category
        .iter()
        .map(|(category, amount)| {
            Bar::default()
                .label(Line::from(category.short_name()))
                .value(amount.round().max(1.0) as u64)
                .text_value(format_currency(*amount, &app.currency))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(chart_style())
        .value_style(selected_style(theme));
    f.render_widget(chart, chunks[1]);
}

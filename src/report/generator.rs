use crate::domain::{
    expense::format_currency, views::format_date, PomodoroSettings, StreakStatus, DEFAULT_CURRENCY,
};
use crate::persistence::{atomic_write, report_file, Store};
use crate::report::stats::{calculate_task_stats, summarize_expenses, summarize_habits};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::info;

fn streak_cell(status: StreakStatus) -> String {
    match status {
        StreakStatus::Broken => "-".to_string(),
        StreakStatus::AtRisk(n) => format!("{} (at risk)", n),
        StreakStatus::Active(n) => n.to_string(),
    }
}

/// Text safe inside a Markdown table cell
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn focus_section(settings: &PomodoroSettings) -> String {
    let mut section = String::from("## Focus Settings\n\n");
    section.push_str(&format!("- **Work:** {} min\n", settings.work_duration));
    section.push_str(&format!("- **Short break:** {} min\n", settings.break_duration));
    section.push_str(&format!("- **Long break:** {} min\n", settings.long_break_duration));
    section.push_str(&format!(
        "- **Long break every:** {} sessions\n",
        settings.sessions_before_long_break
    ));
    section
}

/// Render the Markdown report for `date` from the stored data
pub fn build_report(store: &Store, date: NaiveDate) -> String {
    let tasks = store.tasks();
    let habits = store.habits();
    let expenses = store.expenses();
    let currency = store
        .currency()
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let mut report = String::new();
    report.push_str(&format!("# FocusFlow Report - {}\n\n", date));

    if let Some(profile) = store.profile() {
        report.push_str(&format!("**{}**", profile.name));
        if let Some(bio) = &profile.bio {
            report.push_str(&format!(" - {}", bio));
        }
        report.push_str("\n\n");
    }

    // Tasks
    let task_stats = calculate_task_stats(&tasks, date);
    report.push_str("## Tasks\n\n");
    report.push_str(&format!(
        "- **Total:** {} (Completed: {}, Open: {})\n",
        task_stats.total, task_stats.completed, task_stats.open
    ));
    report.push_str(&format!("- **Overdue:** {}\n", task_stats.overdue));
    let by_priority: Vec<String> = task_stats
        .open_by_priority
        .iter()
        .map(|(priority, count)| format!("{} {}", count, priority.name()))
        .collect();
    report.push_str(&format!("- **Open by priority:** {}\n", by_priority.join(", ")));

    let overdue: Vec<_> = tasks.iter().filter(|t| t.is_overdue(date)).collect();
    if !overdue.is_empty() {
        report.push_str("\n### Overdue\n\n");
        for task in overdue {
            if let Some(due) = task.due_date {
                report.push_str(&format!("- {} (due {})\n", task.title, due));
            }
        }
    }
    report.push('\n');

    // Habits
    report.push_str("## Habits\n\n");
    let rows = summarize_habits(&habits, date);
    if rows.is_empty() {
        report.push_str("No habits tracked.\n\n");
    } else {
        let done_today = rows.iter().filter(|r| r.done_today).count();
        report.push_str(&format!("Done today: {}/{}\n\n", done_today, rows.len()));
        report.push_str("| Habit | Frequency | Completions | Streak | Today |\n");
        report.push_str("|---|---|---|---|---|\n");
        for row in &rows {
            report.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                table_cell(&row.name),
                row.frequency.name(),
                row.completions,
                streak_cell(row.status),
                if row.done_today { "yes" } else { "no" }
            ));
        }
        report.push('\n');
    }

    // Expenses
    let summary = summarize_expenses(&expenses);
    report.push_str("## Expenses\n\n");
    report.push_str(&format!(
        "- **Total:** {} across {} expenses\n",
        format_currency(summary.total, &currency),
        summary.count
    ));
    for (category, amount) in &summary.by_category {
        report.push_str(&format!(
            "- {}: {}\n",
            category.name(),
            format_currency(*amount, &currency)
        ));
    }
    if let Some(latest) = expenses.first() {
        report.push_str(&format!(
            "\nLatest: {} {} on {}\n",
            latest.label(),
            format_currency(latest.amount, &currency),
            format_date(latest.date)
        ));
    }
    report.push('\n');

    report.push_str(&focus_section(&store.pomodoro_settings()));
    report
}

/// Write the report for `date` (default today). Without `output_path` it goes
/// to `<data_dir>/report-YYYY-MM-DD.md`.
pub fn generate_report(
    store: &Store,
    data_dir: &Path,
    date: Option<NaiveDate>,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let report_date = date.unwrap_or_else(|| Local::now().date_naive());
    let path = output_path.unwrap_or_else(|| report_file(data_dir, report_date));

    let report = build_report(store, report_date);
    atomic_write(&path, &report)?;

    info!(path = %path.display(), date = %report_date, "report written");
    Ok(path)
}

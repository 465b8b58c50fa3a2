use crate::domain::{
    expense::{category_totals, total},
    Expense, ExpenseCategory, Habit, HabitFrequency, Priority, StreakStatus, Task,
};
use chrono::NaiveDate;

/// Task counts as of a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub open: usize,
    pub overdue: usize,
    /// Open tasks per priority, high first
    pub open_by_priority: Vec<(Priority, usize)>,
}

/// One row of the habit table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitSummary {
    pub name: String,
    pub frequency: HabitFrequency,
    pub completions: usize,
    pub status: StreakStatus,
    pub done_today: bool,
}

/// Spending overview
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total: f64,
    pub by_category: Vec<(ExpenseCategory, f64)>,
}

impl ExpenseSummary {
    /// Category with the largest total; the first one wins ties
    pub fn top_category(&self) -> Option<(ExpenseCategory, f64)> {
        self.by_category
            .iter()
            .copied()
            .fold(None, |best: Option<(ExpenseCategory, f64)>, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
    }
}

pub fn calculate_task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();

    let open_by_priority = [Priority::High, Priority::Medium, Priority::Low]
        .into_iter()
        .map(|priority| {
            let count = tasks
                .iter()
                .filter(|t| !t.completed && t.priority == priority)
                .count();
            (priority, count)
        })
        .collect();

    TaskStats {
        total: tasks.len(),
        completed,
        open: tasks.len() - completed,
        overdue,
        open_by_priority,
    }
}

pub fn summarize_habits(habits: &[Habit], today: NaiveDate) -> Vec<HabitSummary> {
    habits
        .iter()
        .map(|habit| HabitSummary {
            name: habit.name.clone(),
            frequency: habit.frequency,
            completions: habit.completion_count(),
            status: habit.streak_status(today),
            done_today: habit.is_completed_on(today),
        })
        .collect()
}

pub fn summarize_expenses(expenses: &[Expense]) -> ExpenseSummary {
    ExpenseSummary {
        count: expenses.len(),
        total: total(expenses),
        by_category: category_totals(expenses),
    }
}

/// Longest current streak across all habits
pub fn best_streak(habits: &[Habit], today: NaiveDate) -> u32 {
    habits.iter().map(|h| h.streak(today)).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_stats() {
        let today = day(2024, 6, 10);
        let mut overdue = Task::new("Overdue", Priority::High).unwrap();
        overdue.due_date = Some(day(2024, 6, 1));
        let mut done_late = Task::new("Done late", Priority::Low).unwrap();
        done_late.due_date = Some(day(2024, 6, 1));
        done_late.completed = true;
        let due_today = {
            let mut t = Task::new("Due today", Priority::Medium).unwrap();
            t.due_date = Some(today);
            t
        };

        let stats = calculate_task_stats(&[overdue, done_late, due_today], today);
        assert_eq!(
            stats,
            TaskStats {
                total: 3,
                completed: 1,
                open: 2,
                overdue: 1,
                open_by_priority: vec![
                    (Priority::High, 1),
                    (Priority::Medium, 1),
                    (Priority::Low, 0)
                ],
            }
        );
    }

    #[test]
    fn test_habit_summary_and_best_streak() {
        let today = day(2024, 6, 10);
        let mut read = Habit::new("Read", HabitFrequency::Daily).unwrap();
        for offset in 0..3 {
            read.toggle_completion(today.checked_sub_days(Days::new(offset)).unwrap());
        }
        let mut run = Habit::new("Run", HabitFrequency::Weekly).unwrap();
        run.toggle_completion(today.checked_sub_days(Days::new(1)).unwrap());

        let rows = summarize_habits(&[read.clone(), run.clone()], today);
        assert_eq!(rows[0].status, StreakStatus::Active(3));
        assert!(rows[0].done_today);
        assert_eq!(rows[1].status, StreakStatus::AtRisk(1));
        assert_eq!(rows[1].completions, 1);

        assert_eq!(best_streak(&[read, run], today), 3);
        assert_eq!(best_streak(&[], today), 0);
    }

    #[test]
    fn test_expense_summary_top_category() {
        let expenses = vec![
            Expense::new(12.0, ExpenseCategory::Shopping, "").unwrap(),
            Expense::new(30.0, ExpenseCategory::Housing, "").unwrap(),
            Expense::new(20.0, ExpenseCategory::Shopping, "").unwrap(),
        ];

        let summary = summarize_expenses(&expenses);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total, 62.0);
        assert_eq!(summary.top_category(), Some((ExpenseCategory::Shopping, 32.0)));
        assert_eq!(summarize_expenses(&[]).top_category(), None);
    }
}

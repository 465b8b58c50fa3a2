use super::collection::Identified;
use super::enums::Priority;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

/// A to-do item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Build a new open task. Returns None when the title is blank.
    pub fn new(title: &str, priority: Priority) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            completed: false,
            priority,
            created_at: Local::now(),
            due_date: None,
        })
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Open and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

impl Identified for Task {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Parse a due date typed as YYYY-MM-DD; anything else means "no due date"
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("  Write report ", Priority::High).unwrap();
        assert_eq!(task.title, "Write report");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::High);
        assert!(task.description.is_empty());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(Task::new("", Priority::Medium).is_none());
        assert!(Task::new("   ", Priority::Medium).is_none());
    }

    #[test]
    fn test_toggle() {
        let mut task = Task::new("Task", Priority::Low).unwrap();
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn test_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let mut task = Task::new("Task", Priority::Low).unwrap();
        assert!(!task.is_overdue(today));

        task.due_date = NaiveDate::from_ymd_opt(2024, 5, 9);
        assert!(task.is_overdue(today));

        task.due_date = Some(today);
        assert!(!task.is_overdue(today));

        task.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        task.completed = true;
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(
            parse_due_date("2024-12-31"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
        assert_eq!(parse_due_date("tomorrow"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut task = Task::new("Task", Priority::Medium).unwrap();
        task.due_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["dueDate"], "2024-01-02");
        assert!(value.get("createdAt").is_some());
    }
}

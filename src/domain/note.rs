use super::collection::Identified;
use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

/// A free-form note
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Local>,
    pub last_edited: DateTime<Local>,
    pub pinned: bool,
}

impl Note {
    /// Build a new note. Returns None when the title is blank.
    pub fn new(title: &str, content: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let now = Local::now();
        Some(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            last_edited: now,
            pinned: false,
        })
    }

    /// Replace the content and bump the edit time
    pub fn edit_content(&mut self, content: String) {
        self.content = content;
        self.last_edited = Local::now();
    }

    pub fn toggle_pin(&mut self) {
        self.pinned = !self.pinned;
    }

    /// Case-insensitive match on title or content. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
    }
}

impl Identified for Note {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Filter by query, then order pinned first and most recently edited first
pub fn visible_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let mut visible: Vec<&Note> = notes.iter().filter(|note| note.matches(query)).collect();
    visible.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.last_edited.cmp(&a.last_edited))
    });
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn note_at(title: &str, content: &str, minutes_ago: i64, pinned: bool) -> Note {
        let mut note = Note::new(title, content).unwrap();
        note.last_edited = Local::now() - Duration::minutes(minutes_ago);
        note.pinned = pinned;
        note
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(Note::new(" ", "content").is_none());
    }

    #[test]
    fn test_edit_content_bumps_last_edited() {
        let mut note = note_at("Title", "old", 60, false);
        let before = note.last_edited;
        note.edit_content("new".to_string());
        assert_eq!(note.content, "new");
        assert!(note.last_edited > before);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let note = note_at("Groceries", "Buy MILK and eggs", 0, false);
        assert!(note.matches("milk"));
        assert!(note.matches("GROC"));
        assert!(note.matches(""));
        assert!(!note.matches("bread"));
    }

    #[test]
    fn test_visible_notes_order() {
        let notes = vec![
            note_at("old", "", 30, false),
            note_at("pinned-old", "", 90, true),
            note_at("recent", "", 1, false),
            note_at("pinned-new", "", 10, true),
        ];

        let titles: Vec<&str> = visible_notes(&notes, "")
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["pinned-new", "pinned-old", "recent", "old"]);
    }

    #[test]
    fn test_visible_notes_filters() {
        let notes = vec![
            note_at("Meeting", "agenda", 5, false),
            note_at("Ideas", "meeting follow-up", 1, false),
            note_at("Other", "nothing", 2, false),
        ];
        let titles: Vec<&str> = visible_notes(&notes, "MEETING")
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Ideas", "Meeting"]);
    }
}

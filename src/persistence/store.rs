use super::files::write_atomic;
use super::records;
use crate::domain::{Expense, Habit, Note, PomodoroSettings, Task, Theme, UserProfile};
use serde::Serialize;
use serde_json::Value;
#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage keys. One JSON document per key.
pub mod keys {
    pub const USER: &str = "focusflow-user";
    pub const THEME: &str = "theme";
    pub const TASKS: &str = "focusflow-tasks";
    pub const NOTES: &str = "focusflow-notes";
    pub const EXPENSES: &str = "focusflow-expenses";
    pub const HABITS: &str = "focusflow-habits";
    pub const POMODORO_SETTINGS: &str = "focusflow-pomodoro-settings";
    pub const CURRENCY: &str = "focusflow-currency";

    /// Keys cleared by onboarding and reset
    pub const COLLECTIONS: &[&str] = &[TASKS, NOTES, EXPENSES, HABITS];
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("stored value for '{key}' is not valid JSON: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Raw key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            })
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;

        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        write_atomic(&path, json.as_bytes()).map_err(io_err)?;
        debug!(key, path = %path.display(), "saved");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-process store for tests
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.remove(key);
        Ok(())
    }
}

/// Typed access to everything FocusFlow persists.
///
/// Reads never fail: a missing, unreadable or malformed value is logged and
/// replaced by its default. Writes report errors to the caller.
pub struct Store {
    backend: Box<dyn KeyValueStore>,
}

impl Store {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// File-backed store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileStore::new(dir)))
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    fn load(&self, key: &str) -> Option<Value> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "could not read stored value, using default");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &value)
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.load(keys::USER).and_then(records::decode_profile)
    }

    pub fn theme(&self) -> Theme {
        self.load(keys::THEME)
            .map(records::decode_theme)
            .unwrap_or_default()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.load(keys::TASKS)
            .map(|v| records::decode_tasks(keys::TASKS, v))
            .unwrap_or_default()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.load(keys::NOTES)
            .map(|v| records::decode_notes(keys::NOTES, v))
            .unwrap_or_default()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.load(keys::EXPENSES)
            .map(|v| records::decode_expenses(keys::EXPENSES, v))
            .unwrap_or_default()
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.load(keys::HABITS)
            .map(|v| records::decode_habits(keys::HABITS, v))
            .unwrap_or_default()
    }

    pub fn pomodoro_settings(&self) -> PomodoroSettings {
        self.load(keys::POMODORO_SETTINGS)
            .map(records::decode_pomodoro_settings)
            .unwrap_or_default()
    }

    /// Configured currency code, if any
    pub fn currency(&self) -> Option<String> {
        self.load(keys::CURRENCY).and_then(records::decode_currency)
    }

    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        self.save(keys::USER, profile)
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.save(keys::THEME, &theme)
    }

    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        self.save(keys::TASKS, tasks)
    }

    pub fn save_notes(&mut self, notes: &[Note]) -> Result<(), StoreError> {
        self.save(keys::NOTES, notes)
    }

    pub fn save_expenses(&mut self, expenses: &[Expense]) -> Result<(), StoreError> {
        self.save(keys::EXPENSES, expenses)
    }

    pub fn save_habits(&mut self, habits: &[Habit]) -> Result<(), StoreError> {
        self.save(keys::HABITS, habits)
    }

    pub fn save_pomodoro_settings(&mut self, settings: &PomodoroSettings) -> Result<(), StoreError> {
        self.save(keys::POMODORO_SETTINGS, settings)
    }

    pub fn save_currency(&mut self, code: &str) -> Result<(), StoreError> {
        self.save(keys::CURRENCY, code)
    }

    pub fn clear_profile(&mut self) -> Result<(), StoreError> {
        self.backend.remove(keys::USER)
    }

    /// Remove tasks, notes, expenses and habits. Profile and preferences stay.
    pub fn reset_collections(&mut self) -> Result<(), StoreError> {
        for key in keys::COLLECTIONS {
            self.backend.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, HabitFrequency, Priority};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn file_store() -> (TempDir, Store) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::open(temp_dir.path());
        (temp_dir, store)
    }

    #[test]
    fn test_empty_store_defaults() {
        let (_dir, store) = file_store();
        assert_eq!(store.profile(), None);
        assert_eq!(store.theme(), Theme::Light);
        assert!(store.tasks().is_empty());
        assert!(store.habits().is_empty());
        assert_eq!(store.pomodoro_settings(), PomodoroSettings::default());
        assert_eq!(store.currency(), None);
    }

    #[test]
    fn test_tasks_survive_reopen() {
        let (dir, mut store) = file_store();
        let mut task = Task::new("Write report", Priority::High).unwrap();
        task.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        store.save_tasks(&[task.clone()]).unwrap();

        let reopened = Store::open(dir.path());
        let tasks = reopened.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);
        assert_eq!(tasks[0].title, "Write report");
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].due_date, task.due_date);
    }

    #[test]
    fn test_files_use_key_names() {
        let (dir, mut store) = file_store();
        store.save_theme(Theme::Dark).unwrap();
        store.save_currency("EUR").unwrap();

        let theme = fs::read_to_string(dir.path().join("theme.json")).unwrap();
        assert_eq!(theme.trim(), "\"dark\"");
        assert!(dir.path().join("focusflow-currency.json").exists());
        assert_eq!(store.currency().as_deref(), Some("EUR"));
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let (dir, store) = file_store();
        fs::write(dir.path().join("focusflow-notes.json"), "{not json").unwrap();
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_reset_collections_keeps_profile() {
        let mut store = Store::in_memory();
        let profile = UserProfile::from_form("Robin", "", "", "").unwrap();
        store.save_profile(&profile).unwrap();
        store
            .save_expenses(&[Expense::new(3.0, ExpenseCategory::Other, "Tea").unwrap()])
            .unwrap();
        store
            .save_habits(&[Habit::new("Read", HabitFrequency::Daily).unwrap()])
            .unwrap();

        store.reset_collections().unwrap();

        assert!(store.expenses().is_empty());
        assert!(store.habits().is_empty());
        assert_eq!(store.profile(), Some(profile));
    }

    #[test]
    fn test_clear_profile() {
        let mut store = Store::in_memory();
        let profile = UserProfile::from_form("Robin", "", "", "").unwrap();
        store.save_profile(&profile).unwrap();
        store.clear_profile().unwrap();
        assert_eq!(store.profile(), None);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let mut backend = MemoryStore::default();
        assert!(matches!(
            backend.set("../escape", &Value::Null),
            Err(StoreError::InvalidKey(_))
        ));
        let files = FileStore::new("/tmp");
        assert!(files.get("Tasks").is_err());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let (_dir, mut store) = file_store();
        assert!(store.reset_collections().is_ok());
    }
}

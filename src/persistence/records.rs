//! Validating decoders for stored JSON.
//!
//! Stored data is never trusted: every record is decoded on its own, missing
//! optional fields get defaults, and records that cannot be repaired are
//! dropped with a warning instead of failing the whole collection.

use crate::domain::{
    expense::{is_valid_amount, normalize_currency},
    Expense, ExpenseCategory, Habit, HabitFrequency, Note, PomodoroSettings, Priority, Task,
    Theme, UserProfile,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Parse an RFC 3339 timestamp or a bare YYYY-MM-DD (taken as local midnight)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Local.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).earliest()
}

/// Parse a calendar day; timestamps are truncated to their local date
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date_naive()))
}

fn parse_id(raw: Option<&str>) -> Uuid {
    raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn timestamp_or_now(raw: Option<&str>) -> DateTime<Local> {
    raw.and_then(parse_timestamp).unwrap_or_else(Local::now)
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Decode a JSON array record by record. Anything that is not an array yields
/// an empty list.
fn decode_list<R, T>(key: &str, value: Value, convert: impl Fn(R) -> Option<T>) -> Vec<T>
where
    R: for<'de> Deserialize<'de>,
{
    let Value::Array(items) = value else {
        warn!(key, "stored value is not a list, using empty collection");
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<R>(item) {
            Ok(raw) => {
                let record = convert(raw);
                if record.is_none() {
                    warn!(key, index, "dropping invalid record");
                }
                record
            }
            Err(err) => {
                warn!(key, index, error = %err, "dropping malformed record");
                None
            }
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    priority: Option<String>,
    created_at: Option<String>,
    due_date: Option<String>,
}

impl RawTask {
    fn into_task(self) -> Option<Task> {
        let title = non_blank(self.title)?;
        Some(Task {
            id: parse_id(self.id.as_deref()),
            title,
            description: self.description.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
            priority: self
                .priority
                .as_deref()
                .and_then(Priority::from_name)
                .unwrap_or_default(),
            created_at: timestamp_or_now(self.created_at.as_deref()),
            due_date: self.due_date.as_deref().and_then(parse_day),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNote {
    id: Option<String>,
    title: Option<String>,
    content: Option<String>,
    created_at: Option<String>,
    last_edited: Option<String>,
    pinned: Option<bool>,
}

impl RawNote {
    fn into_note(self) -> Option<Note> {
        let title = non_blank(self.title)?;
        let created_at = timestamp_or_now(self.created_at.as_deref());
        Some(Note {
            id: parse_id(self.id.as_deref()),
            title,
            content: self.content.unwrap_or_default(),
            created_at,
            last_edited: self
                .last_edited
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(created_at),
            pinned: self.pinned.unwrap_or(false),
        })
    }
}

/// Amounts may have been stored as numbers or numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn value(&self) -> Option<f64> {
        match self {
            RawAmount::Number(n) => Some(*n),
            RawAmount::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExpense {
    id: Option<String>,
    amount: Option<RawAmount>,
    category: Option<String>,
    description: Option<String>,
    date: Option<String>,
    currency: Option<String>,
}

impl RawExpense {
    fn into_expense(self) -> Option<Expense> {
        let amount = self.amount.as_ref().and_then(RawAmount::value)?;
        if !is_valid_amount(amount) {
            return None;
        }
        Some(Expense {
            id: parse_id(self.id.as_deref()),
            amount,
            category: self
                .category
                .as_deref()
                .and_then(ExpenseCategory::from_name)
                .unwrap_or(ExpenseCategory::Other),
            description: self.description.unwrap_or_default(),
            date: timestamp_or_now(self.date.as_deref()),
            currency: self.currency.as_deref().and_then(normalize_currency),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHabit {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    completed_dates: Vec<Value>,
    created_at: Option<String>,
    frequency: Option<String>,
}

impl RawHabit {
    fn into_habit(self) -> Option<Habit> {
        let name = non_blank(self.name)?;
        let completed_dates = self
            .completed_dates
            .iter()
            .filter_map(Value::as_str)
            .filter_map(parse_day)
            .collect();

        let mut habit = Habit {
            id: parse_id(self.id.as_deref()),
            name,
            description: non_blank(self.description),
            completed_dates,
            created_at: timestamp_or_now(self.created_at.as_deref()),
            frequency: self
                .frequency
                .as_deref()
                .and_then(HabitFrequency::from_name)
                .unwrap_or_default(),
        };
        habit.normalize_dates();
        Some(habit)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    work_duration: Option<Value>,
    break_duration: Option<Value>,
    long_break_duration: Option<Value>,
    sessions_before_long_break: Option<Value>,
}

/// Minutes may be numbers or numeric strings; anything else is zero (later replaced)
fn minutes(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[derive(Deserialize)]
struct RawProfile {
    name: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
    email: Option<String>,
}

pub fn decode_tasks(key: &str, value: Value) -> Vec<Task> {
    decode_list(key, value, RawTask::into_task)
}

pub fn decode_notes(key: &str, value: Value) -> Vec<Note> {
    decode_list(key, value, RawNote::into_note)
}

pub fn decode_expenses(key: &str, value: Value) -> Vec<Expense> {
    decode_list(key, value, RawExpense::into_expense)
}

pub fn decode_habits(key: &str, value: Value) -> Vec<Habit> {
    decode_list(key, value, RawHabit::into_habit)
}

/// Missing or invalid values fall back to the defaults field by field
pub fn decode_pomodoro_settings(value: Value) -> PomodoroSettings {
    let defaults = PomodoroSettings::default();
    match serde_json::from_value::<RawSettings>(value) {
        Ok(raw) => PomodoroSettings {
            work_duration: minutes(raw.work_duration.as_ref()),
            break_duration: minutes(raw.break_duration.as_ref()),
            long_break_duration: minutes(raw.long_break_duration.as_ref()),
            sessions_before_long_break: minutes(raw.sessions_before_long_break.as_ref()),
        }
        .sanitized(&defaults),
        Err(err) => {
            warn!(error = %err, "malformed pomodoro settings, using defaults");
            defaults
        }
    }
}

/// Absent when the name is missing or too short
pub fn decode_profile(value: Value) -> Option<UserProfile> {
    let raw: RawProfile = serde_json::from_value(value)
        .map_err(|err| warn!(error = %err, "malformed profile"))
        .ok()?;
    UserProfile::from_form(
        raw.name.as_deref().unwrap_or_default(),
        raw.bio.as_deref().unwrap_or_default(),
        raw.avatar.as_deref().unwrap_or_default(),
        raw.email.as_deref().unwrap_or_default(),
    )
}

pub fn decode_theme(value: Value) -> Theme {
    value
        .as_str()
        .and_then(Theme::from_name)
        .unwrap_or_default()
}

pub fn decode_currency(value: Value) -> Option<String> {
    value.as_str().and_then(normalize_currency)
}

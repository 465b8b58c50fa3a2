pub mod collection;
pub mod enums;
pub mod expense;
pub mod focus;
pub mod habit;
pub mod note;
pub mod profile;
pub mod task;
pub mod views;

pub use collection::{find_by_id, find_by_id_mut, prepend, remove_by_id, replace_by_id};
pub use enums::{ExpenseCategory, HabitFrequency, Priority, Theme, UiMode, View};
pub use expense::{Expense, DEFAULT_CURRENCY};
pub use focus::{FocusPhase, FocusTimer, PhaseChange, PomodoroSettings, SettingsField};
pub use habit::{Habit, StreakStatus};
pub use note::{visible_notes, Note};
pub use profile::{resolve_gate, Gate, LocalSession, SessionCheck, UserProfile};
pub use task::Task;

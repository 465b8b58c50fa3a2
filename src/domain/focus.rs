//! Work / break / long-break rotation for the focus timer.
//!
//! The timer never restarts itself: every phase change leaves it stopped and
//! the user resumes explicitly.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Phase of the focus rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusPhase {
    Work,
    Break,
    LongBreak,
}

impl FocusPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FocusPhase::Work => "Focus",
            FocusPhase::Break => "Short Break",
            FocusPhase::LongBreak => "Long Break",
        }
    }
}

/// Editable pomodoro setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Work,
    Break,
    LongBreak,
    Sessions,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::Work,
            SettingsField::Break,
            SettingsField::LongBreak,
            SettingsField::Sessions,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Work => "Work Duration (minutes)",
            SettingsField::Break => "Break Duration (minutes)",
            SettingsField::LongBreak => "Long Break Duration (minutes)",
            SettingsField::Sessions => "Sessions Before Long Break",
        }
    }

    /// Accepted input range
    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            SettingsField::Work => 1..=60,
            SettingsField::Break => 1..=30,
            SettingsField::LongBreak => 1..=60,
            SettingsField::Sessions => 1..=10,
        }
    }
}

/// Durations in minutes plus the long-break cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    pub work_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
    pub sessions_before_long_break: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_duration: 25,
            break_duration: 5,
            long_break_duration: 15,
            sessions_before_long_break: 4,
        }
    }
}

impl PomodoroSettings {
    pub fn get(&self, field: SettingsField) -> u32 {
        match field {
            SettingsField::Work => self.work_duration,
            SettingsField::Break => self.break_duration,
            SettingsField::LongBreak => self.long_break_duration,
            SettingsField::Sessions => self.sessions_before_long_break,
        }
    }

    pub fn set(&mut self, field: SettingsField, value: u32) {
        match field {
            SettingsField::Work => self.work_duration = value,
            SettingsField::Break => self.break_duration = value,
            SettingsField::LongBreak => self.long_break_duration = value,
            SettingsField::Sessions => self.sessions_before_long_break = value,
        }
    }

    /// Full length of a phase in seconds
    pub fn duration_secs(&self, phase: FocusPhase) -> u32 {
        let minutes = match phase {
            FocusPhase::Work => self.work_duration,
            FocusPhase::Break => self.break_duration,
            FocusPhase::LongBreak => self.long_break_duration,
        };
        minutes.saturating_mul(60)
    }

    /// Replace out-of-range values: zero falls back to `fallback`, the rest is clamped
    pub fn sanitized(mut self, fallback: &PomodoroSettings) -> Self {
        for field in SettingsField::all() {
            let range = field.range();
            let value = match self.get(*field) {
                0 => fallback.get(*field),
                v => v,
            };
            self.set(*field, value.clamp(*range.start(), *range.end()));
        }
        self
    }
}

/// Parse typed settings input. Non-numeric or zero input keeps `previous`.
pub fn coerce_setting(input: &str, field: SettingsField, previous: u32) -> u32 {
    let range = field.range();
    match input.trim().parse::<u32>() {
        Ok(0) | Err(_) => previous,
        Ok(value) => value.clamp(*range.start(), *range.end()),
    }
}

/// Emitted when the rotation moves to another phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: FocusPhase,
    pub to: FocusPhase,
    pub sessions_completed: u32,
}

/// Countdown state machine
#[derive(Debug, Clone)]
pub struct FocusTimer {
    pub phase: FocusPhase,
    pub remaining_secs: u32,
    pub running: bool,
    pub sessions_completed: u32,
    pub settings: PomodoroSettings,
}

impl FocusTimer {
    pub fn new(settings: PomodoroSettings) -> Self {
        let settings = settings.sanitized(&PomodoroSettings::default());
        Self {
            phase: FocusPhase::Work,
            remaining_secs: settings.duration_secs(FocusPhase::Work),
            running: false,
            sessions_completed: 0,
            settings,
        }
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    #[cfg(test)]
    pub fn start(&mut self) {
        self.running = true;
    }

    #[cfg(test)]
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// One real second elapsed. Returns the phase change if the countdown hit zero.
    pub fn tick_second(&mut self) -> Option<PhaseChange> {
        if !self.running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            Some(self.complete_phase())
        } else {
            None
        }
    }

    /// Advance by several seconds at once. Stops at the first phase change,
    /// since the timer is stopped afterwards.
    pub fn advance(&mut self, seconds: u64) -> Option<PhaseChange> {
        for _ in 0..seconds {
            if !self.running {
                break;
            }
            if let Some(change) = self.tick_second() {
                return Some(change);
            }
        }
        None
    }

    /// End the current phase early
    pub fn skip(&mut self) -> PhaseChange {
        self.complete_phase()
    }

    /// Stop and rewind the current phase to its full length
    pub fn reset_phase(&mut self) {
        self.running = false;
        self.remaining_secs = self.settings.duration_secs(self.phase);
    }

    fn complete_phase(&mut self) -> PhaseChange {
        let from = self.phase;
        let to = match from {
            FocusPhase::Work => {
                self.sessions_completed += 1;
                let cadence = self.settings.sessions_before_long_break.max(1);
                if self.sessions_completed % cadence == 0 {
                    FocusPhase::LongBreak
                } else {
                    FocusPhase::Break
                }
            }
            FocusPhase::Break | FocusPhase::LongBreak => FocusPhase::Work,
        };

        self.phase = to;
        self.remaining_secs = self.settings.duration_secs(to);
        self.running = false;

        PhaseChange {
            from,
            to,
            sessions_completed: self.sessions_completed,
        }
    }

    /// Install new settings. A stopped timer whose current phase length changed
    /// is rewound to the new length; other phases and the session count are untouched.
    pub fn apply_settings(&mut self, settings: PomodoroSettings) {
        let settings = settings.sanitized(&self.settings);
        let old = std::mem::replace(&mut self.settings, settings);

        if !self.running && old.duration_secs(self.phase) != settings.duration_secs(self.phase) {
            self.remaining_secs = settings.duration_secs(self.phase);
        }
    }

    pub fn total_secs(&self) -> u32 {
        self.settings.duration_secs(self.phase)
    }

    /// Fraction of the current phase already elapsed (0.0 to 1.0)
    pub fn elapsed_ratio(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let remaining = self.remaining_secs.min(total);
        1.0 - remaining as f64 / total as f64
    }

    /// "Session X of N", where X wraps back to N after a long break
    pub fn session_label(&self) -> String {
        let cadence = self.settings.sessions_before_long_break.max(1);
        let position = match self.sessions_completed % cadence {
            0 => cadence,
            n => n,
        };
        format!("Session {} of {}", position, cadence)
    }

    pub fn remaining_formatted(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Format seconds as "MM:SS"
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

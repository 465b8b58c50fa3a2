use super::collection::Identified;
use super::enums::HabitFrequency;
use chrono::{DateTime, Days, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

/// A recurring habit with its completion history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calendar days with at least one completion, kept sorted and unique
    pub completed_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Local>,
    pub frequency: HabitFrequency,
}

/// Where a habit's chain stands relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStatus {
    /// Latest completion is older than yesterday (or there is none)
    Broken,
    /// Chain ends yesterday; completing today extends it
    AtRisk(u32),
    /// Chain includes today
    Active(u32),
}

#[cfg(test)]
impl StreakStatus {
    pub fn count(&self) -> u32 {
        match self {
            StreakStatus::Broken => 0,
            StreakStatus::AtRisk(n) | StreakStatus::Active(n) => *n,
        }
    }
}

impl Habit {
    /// Build a new habit. Returns None when the name is blank.
    pub fn new(name: &str, frequency: HabitFrequency) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            completed_dates: Vec::new(),
            created_at: Local::now(),
            frequency,
        })
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completed_dates.contains(&day)
    }

    /// Mark the day done, or undo it if already done. Returns the new state.
    pub fn toggle_completion(&mut self, day: NaiveDate) -> bool {
        if self.is_completed_on(day) {
            self.completed_dates.retain(|d| *d != day);
            false
        } else {
            self.completed_dates.push(day);
            self.normalize_dates();
            true
        }
    }

    /// Sort and deduplicate completion days
    pub fn normalize_dates(&mut self) {
        self.completed_dates.sort_unstable();
        self.completed_dates.dedup();
    }

    /// Number of distinct days completed
    pub fn completion_count(&self) -> usize {
        self.completed_dates
            .iter()
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        current_streak(&self.completed_dates, today)
    }

    pub fn streak_status(&self, today: NaiveDate) -> StreakStatus {
        let streak = self.streak(today);
        if streak == 0 {
            StreakStatus::Broken
        } else if self.is_completed_on(today) {
            StreakStatus::Active(streak)
        } else {
            StreakStatus::AtRisk(streak)
        }
    }
}

impl Identified for Habit {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Consecutive-day streak ending at the most recent completion.
///
/// The chain only counts if its latest day is today or yesterday; a chain
/// ending yesterday is still intact because today is not over yet.
/// Duplicate days count once and days after `today` are ignored.
pub fn current_streak(completions: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = completions
        .iter()
        .copied()
        .filter(|day| *day <= today)
        .collect();

    let Some(&latest) = days.iter().next_back() else {
        return 0;
    };

    let yesterday = today.checked_sub_days(Days::new(1));
    if latest != today && Some(latest) != yesterday {
        return 0;
    }

    let mut streak = 0;
    let mut cursor = Some(latest);
    while let Some(day) = cursor {
        if !days.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.checked_sub_days(Days::new(1));
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn days_ago(n: u64) -> NaiveDate {
        today().checked_sub_days(Days::new(n)).unwrap()
    }

    #[test]
    fn test_empty_streak_is_zero() {
        assert_eq!(current_streak(&[], today()), 0);
    }

    #[test]
    fn test_consecutive_days_including_today() {
        for n in 1..=10u64 {
            let dates: Vec<NaiveDate> = (0..n).map(days_ago).collect();
            assert_eq!(current_streak(&dates, today()), n as u32);
        }
    }

    #[test]
    fn test_gap_limits_streak_to_run_after_gap() {
        // Completed today, 1 and 2 days ago, gap at 3, then 4..=9
        let mut dates: Vec<NaiveDate> = (0..3).map(days_ago).collect();
        dates.extend((4..10).map(days_ago));
        assert_eq!(current_streak(&dates, today()), 3);
    }

    #[test]
    fn test_last_completion_before_yesterday_breaks() {
        let dates = vec![days_ago(2), days_ago(3), days_ago(4)];
        assert_eq!(current_streak(&dates, today()), 0);
    }

    #[test]
    fn test_chain_ending_yesterday_is_intact() {
        let dates = vec![days_ago(1), days_ago(2)];
        assert_eq!(current_streak(&dates, today()), 2);
    }

    #[test]
    fn test_duplicates_count_once_and_order_is_irrelevant() {
        let dates = vec![days_ago(1), today(), days_ago(1), today(), days_ago(2)];
        assert_eq!(current_streak(&dates, today()), 3);
    }

    #[test]
    fn test_future_dates_ignored() {
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        let dates = vec![tomorrow, today()];
        assert_eq!(current_streak(&dates, today()), 1);
    }

    #[test]
    fn test_toggle_completion_twice_restores() {
        let mut habit = Habit::new("Read", HabitFrequency::Daily).unwrap();
        habit.completed_dates = vec![days_ago(1)];

        assert!(habit.toggle_completion(today()));
        assert!(habit.is_completed_on(today()));
        assert_eq!(habit.completion_count(), 2);

        assert!(!habit.toggle_completion(today()));
        assert_eq!(habit.completed_dates, vec![days_ago(1)]);
    }

    #[test]
    fn test_streak_status() {
        let mut habit = Habit::new("Run", HabitFrequency::Weekly).unwrap();
        assert_eq!(habit.streak_status(today()), StreakStatus::Broken);

        habit.completed_dates = vec![days_ago(2), days_ago(1)];
        assert_eq!(habit.streak_status(today()), StreakStatus::AtRisk(2));

        habit.toggle_completion(today());
        assert_eq!(habit.streak_status(today()), StreakStatus::Active(3));
        assert_eq!(habit.streak_status(today()).count(), 3);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(Habit::new("  ", HabitFrequency::Daily).is_none());
    }
}

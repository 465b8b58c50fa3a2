use super::enums::Priority;
use super::habit::StreakStatus;
use chrono::{DateTime, Local, NaiveDate};

/// Checkbox glyph for a completion flag
pub fn check_glyph(done: bool, use_emoji: bool) -> &'static str {
    match (done, use_emoji) {
        (true, true) => "✅",
        (false, true) => "⬜",
        (true, false) => "[x]",
        (false, false) => "[ ]",
    }
}

/// Priority tag, e.g. "(high)"
pub fn priority_badge(priority: Priority) -> String {
    format!("({})", priority.name())
}

/// Streak text shown next to a habit; empty when the chain is broken
pub fn streak_badge(status: StreakStatus, use_emoji: bool) -> String {
    let icon = if use_emoji { "🔥 " } else { "" };
    match status {
        StreakStatus::Broken => String::new(),
        StreakStatus::Active(n) => format!("{}{} day streak", icon, n),
        StreakStatus::AtRisk(n) => format!("{}{} day streak (do it today!)", icon, n),
    }
}

/// Cut a string to `max` characters, adding an ellipsis when shortened
pub fn truncate(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= max {
        return first_line.to_string();
    }
    let kept: String = first_line.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// "Mar 5, 2024"
pub fn format_date(date: DateTime<Local>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Mar 5"
pub fn format_day(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Greeting for the dashboard header
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_check_glyph() {
        assert_eq!(check_glyph(true, false), "[x]");
        assert_eq!(check_glyph(false, false), "[ ]");
    }

    #[test]
    fn test_streak_badge() {
        assert_eq!(streak_badge(StreakStatus::Broken, false), "");
        assert_eq!(streak_badge(StreakStatus::Active(3), false), "3 day streak");
        assert!(streak_badge(StreakStatus::AtRisk(2), false).contains("do it today"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer line of text", 8), "a longe…");
        assert_eq!(truncate("first\nsecond", 20), "first");
    }

    #[test]
    fn test_format_date() {
        let date = Local.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(format_date(date), "Mar 5, 2024");
        assert_eq!(format_day(date.date_naive()), "Mar 5");
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(8), "Good morning");
        assert_eq!(greeting(14), "Good afternoon");
        assert_eq!(greeting(22), "Good evening");
        assert_eq!(greeting(2), "Good evening");
    }
}

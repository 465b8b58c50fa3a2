use serde::{Deserialize, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse a stored or typed priority, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Fixed list of expense categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Drinks")]
    #[default]
    FoodAndDrinks,
    Shopping,
    Housing,
    Transportation,
    Entertainment,
    Healthcare,
    Other,
}

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            ExpenseCategory::FoodAndDrinks,
            ExpenseCategory::Shopping,
            ExpenseCategory::Housing,
            ExpenseCategory::Transportation,
            ExpenseCategory::Entertainment,
            ExpenseCategory::Healthcare,
            ExpenseCategory::Other,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FoodAndDrinks => "Food & Drinks",
            Self::Shopping => "Shopping",
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// First word of the name, used for narrow chart labels
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::FoodAndDrinks => "Food",
            other => other.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// How often a habit is meant to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
}

impl HabitFrequency {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Top-level screens, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Tasks,
    Notes,
    Expenses,
    Habits,
    Focus,
    Settings,
}

impl View {
    pub fn all() -> &'static [View] {
        &[
            View::Dashboard,
            View::Tasks,
            View::Notes,
            View::Expenses,
            View::Habits,
            View::Focus,
            View::Settings,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Tasks => "Tasks",
            View::Notes => "Notes",
            View::Expenses => "Expenses",
            View::Habits => "Habits",
            View::Focus => "Focus",
            View::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Onboarding, // No profile yet; only the profile form is reachable
    Form,
    SearchingNotes,
    Confirm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_name() {
        assert_eq!(Priority::from_name("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_name(" low "), Some(Priority::Low));
        assert_eq!(Priority::from_name("urgent"), None);
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in ExpenseCategory::all() {
            assert_eq!(ExpenseCategory::from_name(category.name()), Some(*category));
        }
        assert_eq!(
            ExpenseCategory::from_name("food & drinks"),
            Some(ExpenseCategory::FoodAndDrinks)
        );
        assert_eq!(ExpenseCategory::FoodAndDrinks.short_name(), "Food");
    }

    #[test]
    fn test_category_serializes_display_name() {
        let json = serde_json::to_string(&ExpenseCategory::FoodAndDrinks).unwrap();
        assert_eq!(json, "\"Food & Drinks\"");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Dashboard.next(), View::Tasks);
        assert_eq!(View::Settings.next(), View::Dashboard);
        assert_eq!(View::Dashboard.prev(), View::Settings);
        assert_eq!(View::from_index(5), Some(View::Focus));
        assert_eq!(View::from_index(9), None);
    }
}

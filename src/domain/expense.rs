use super::collection::Identified;
use super::enums::ExpenseCategory;
use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

/// Currency used when nothing else is configured
pub const DEFAULT_CURRENCY: &str = "USD";

/// Currencies offered in Settings, in cycle order
pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "INR", "CAD", "AUD"];

/// A single spending record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Expense {
    /// Build a new expense. Returns None unless the amount is a positive number.
    pub fn new(amount: f64, category: ExpenseCategory, description: &str) -> Option<Self> {
        if !is_valid_amount(amount) {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4(),
            amount,
            category,
            description: description.trim().to_string(),
            date: Local::now(),
            currency: None,
        })
    }

    /// Description if present, otherwise the category name
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            self.category.name()
        } else {
            &self.description
        }
    }
}

impl Identified for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Parse a typed amount; None for non-numeric or non-positive input
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| is_valid_amount(*amount))
}

/// Sum of all amounts
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum for a single category
pub fn category_total(expenses: &[Expense], category: ExpenseCategory) -> f64 {
    expenses
        .iter()
        .filter(|e| e.category == category)
        .map(|e| e.amount)
        .sum()
}

/// Per-category totals in category order, skipping empty categories
pub fn category_totals(expenses: &[Expense]) -> Vec<(ExpenseCategory, f64)> {
    ExpenseCategory::all()
        .iter()
        .map(|category| (*category, category_total(expenses, *category)))
        .filter(|(_, total)| *total > 0.0)
        .collect()
}

/// Normalize a typed currency code: three ASCII letters, upper-cased
pub fn normalize_currency(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Next entry in the Settings currency cycle
pub fn next_currency(current: &str) -> &'static str {
    let index = CURRENCIES
        .iter()
        .position(|code| code.eq_ignore_ascii_case(current))
        .map(|i| (i + 1) % CURRENCIES.len())
        .unwrap_or(0);
    CURRENCIES[index]
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Format an amount for display, e.g. "$1,234.50" or "CHF 12.00".
/// Display hint only; no conversion between currencies.
pub fn format_currency(amount: f64, code: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match currency_symbol(code) {
        Some(symbol) => format!("{}{}{}.{:02}", sign, symbol, grouped, fraction),
        None => format!("{}{} {}.{:02}", sign, code.to_ascii_uppercase(), grouped, fraction),
    }
}

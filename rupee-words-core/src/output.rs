//! Output helpers for human and agent modes.

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

use crate::parser::Amount;

/// Human (TTY) vs Agent (non-interactive) output selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Agent,
}

/// Structured error collected for a specific CSV row.
#[derive(Debug, Clone, Serialize)]
pub struct RowIssue {
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// Agent-mode error payload.
#[derive(Debug, Clone, Serialize)]
pub struct AgentError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<RowIssue>>,
}

/// Shorten long free-text cells (party names, descriptions) for tables.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let s = text.trim();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Format an amount with Indian digit grouping and two decimals,
/// e.g. `12345678.5` -> `1,23,45,678.50`.
pub fn format_inr(amount: Amount) -> String {
    format!(
        "{}.{:02}",
        amount.rupees().to_formatted_string(&Locale::en_IN),
        amount.paise()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_amounts_have_no_separator() {
        assert_eq!(format_inr(Amount::from_rupees(0)), "0.00");
        assert_eq!(format_inr(Amount::from_rupees(999)), "999.00");
    }

    #[test]
    fn thousands_and_lakhs_use_indian_grouping() {
        assert_eq!(format_inr(Amount::from_rupees(1_000)), "1,000.00");
        assert_eq!(format_inr(Amount::from_rupees(17_000)), "17,000.00");
        assert_eq!(format_inr(Amount::from_rupees(123_456)), "1,23,456.00");
        assert_eq!(format_inr(Amount::from_paise(1_234_567_850)), "1,23,45,678.50");
    }

    #[test]
    fn very_large_amounts_keep_pairs() {
        assert_eq!(
            format_inr(Amount::from_rupees(1_000_000_000)),
            "1,00,00,00,000.00"
        );
    }

    #[test]
    fn truncate_short_text_is_unchanged() {
        assert_eq!(truncate_text("ACME", 10), "ACME");
    }

    #[test]
    fn truncate_long_unicode_text_without_panic() {
        let han = "\u{4F60}";
        assert_eq!(
            truncate_text(&han.repeat(12), 5),
            format!("{}…", han.repeat(4))
        );
    }
}

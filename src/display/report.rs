//! Report formatting helpers for terminal output

use crate::models::Money;
use crate::services::ProgressLevel;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text
    }
}

/// One decimal place, matching the spreadsheet export
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Horizontal bar filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Short status tag for a progress level
pub fn level_marker(level: ProgressLevel) -> &'static str {
    match level {
        ProgressLevel::Critical => "!!",
        ProgressLevel::Warning => "!",
        ProgressLevel::Saving => "↑",
        ProgressLevel::OnTrack => "",
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to at most `max_chars` characters, ending with an ellipsis
///
/// Counts characters rather than bytes so Vietnamese text is never split
/// inside a code point.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }

    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 100.0, 10), "█████░░░░░");
        assert_eq!(format_bar(150.0, 100.0, 4), "████");
        assert_eq!(format_bar(0.0, 100.0, 3), "░░░");
        assert_eq!(format_bar(10.0, 0.0, 2), "░░");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Đi chợ", 10), "Đi chợ");
        assert_eq!(truncate("Điện/Nước/Internet", 8), "Điện/...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(12.5), "12.5%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }

    #[test]
    fn test_level_marker() {
        assert_eq!(level_marker(ProgressLevel::Critical), "!!");
        assert_eq!(level_marker(ProgressLevel::OnTrack), "");
    }

    #[test]
    fn test_colored_money() {
        assert!(format_money_colored(Money::new(-1), "₫").starts_with("\x1b[31m"));
        assert_eq!(format_money_colored(Money::zero(), "₫"), Money::zero().format_with("₫"));
    }
}

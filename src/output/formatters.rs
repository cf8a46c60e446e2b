//! Reusable formatting helpers for pretty output

use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;

use crate::theme::{Palette, paint};

/// Format a backend date or timestamp as `Jan 15, 2025`.
///
/// Returns "N/A" for missing values and the input unchanged when it cannot
/// be parsed.
pub fn format_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "N/A".to_string();
    };

    if let Ok(dt) = value.parse::<DateTime<Utc>>() {
        return dt.format("%b %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    value.to_string()
}

/// True when `deadline` falls within the next seven days
pub fn is_deadline_soon(deadline: Option<&str>, now: DateTime<Utc>) -> bool {
    let Some(deadline) = deadline else {
        return false;
    };
    let date = deadline
        .parse::<DateTime<Utc>>()
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(deadline, "%Y-%m-%d"));

    match date {
        Ok(date) => {
            let days = (date - now.date_naive()).num_days();
            (1..=7).contains(&days)
        }
        Err(_) => false,
    }
}

/// Bold, coloured screen heading followed by a blank line
pub fn heading(title: &str, palette: &Palette) -> String {
    format!("{}\n", paint(title, palette.primary).bold())
}

/// `Label: value` line with a dimmed label
pub fn field(label: &str, value: &str, palette: &Palette) -> String {
    format!("{} {}", paint(&format!("{}:", label), palette.text_secondary), value)
}

/// Status word coloured by meaning
pub fn status(value: &str, palette: &Palette) -> String {
    paint(value, palette.status(value)).to_string()
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// Display formatting shared by the report and the admin dashboard.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use url::Url;

/// Whole-dollar amount with thousands separators, e.g. `$95,000`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

pub fn format_optional_currency(amount: Option<i64>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "N/A".to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let t = raw.trim();
    // Backend timestamps are naive ISO strings (no offset).
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DD`, or the raw value when it is not a timestamp.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `YYYY-MM-DD HH:MM`, or the raw value when it is not a timestamp.
pub fn format_datetime(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Absolute form of a link the backend may hand out relative to its own base.
pub fn resolve_link(base: &Url, raw: &str) -> String {
    base.join(raw.trim())
        .map(|u| u.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

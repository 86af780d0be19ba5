//! Display formatting of scan values by [`FieldFormat`].

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tvscreener_api::FieldFormat;

/// Placeholder for missing values.
pub const MISSING: &str = "—";

/// Render a raw column value for display.
///
/// Numeric formats fall back to plain text when the value is not a number.
pub fn format_value(value: &Value, format: FieldFormat) -> String {
    if value.is_null() {
        return MISSING.to_string();
    }
    let number = value.as_f64().filter(|n| n.is_finite());
    match (format, number) {
        (FieldFormat::Currency, Some(n)) => format_currency(n),
        (FieldFormat::Percent, Some(n)) => format!("{:.2}%", n),
        (FieldFormat::Float, Some(n)) => format!("{:.2}", n),
        (FieldFormat::Round, Some(n)) => format!("{}", (n + 0.5).floor() as i64),
        (FieldFormat::NumberGroup, Some(n)) => format_number_group(n),
        (FieldFormat::Bool, _) => format_bool(value),
        (FieldFormat::Date, _) => format_date(value),
        _ => format_text(value),
    }
}

/// Abbreviate with K/M/B/T and two decimals: `1234567.0` is `1.23M`.
pub fn millify(n: f64) -> String {
    if !n.is_finite() {
        return MISSING.to_string();
    }
    let sign = if n < 0.0 { "-" } else { "" };
    let abs = n.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (abs / 1e12, "T")
    } else if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        (abs, "")
    };
    format!("{}{:.2}{}", sign, scaled, suffix)
}

fn format_currency(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", n.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int), frac)
}

/// Thousands separators and at most two decimals, trailing zeros dropped.
fn format_number_group(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", n.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(int))
    } else {
        format!("{}{}.{}", sign, group_thousands(int), frac)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_bool(value: &Value) -> String {
    let truthy = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    };
    match truthy {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => format_text(value),
    }
}

/// Unix seconds, RFC 3339, or `YYYY-MM-DD` as `Jan 5, 2024`.
fn format_date(value: &Value) -> String {
    const DISPLAY: &str = "%b %-d, %Y";
    let date = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.date_naive()),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
        _ => None,
    };
    match date {
        Some(date) => date.format(DISPLAY).to_string(),
        None => format_text(value),
    }
}

fn format_text(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.is_empty() {
        MISSING.to_string()
    } else {
        text
    }
}

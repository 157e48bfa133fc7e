//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Labels a party size, e.g. "1 guest" or "3 guests".
///
/// Usage in templates: `{{ item.guests|guests }}`
#[askama::filter_fn]
pub fn guests(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(guest_label(&count.to_string()))
}

fn guest_label(count: &str) -> String {
    if count == "1" {
        "1 guest".to_string()
    } else {
        format!("{count} guests")
    }
}

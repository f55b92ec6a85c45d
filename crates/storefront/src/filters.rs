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

/// Formats a WordPress date (`2024-06-01T08:00:00`) as `1 Jun 2024`.
///
/// Falls back to the raw value when the date does not parse; the backend is
/// trusted but a broken date must not break the page.
#[askama::filter_fn]
pub fn wp_date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(chrono::NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S")
        .map_or_else(|_| raw.clone(), |dt| dt.format("%-d %b %Y").to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    #[test]
    fn test_wp_date_format_parses_api_dates() {
        let dt = NaiveDateTime::parse_from_str("2024-06-01T08:00:00", "%Y-%m-%dT%H:%M:%S");
        assert!(dt.is_ok());
    }
}

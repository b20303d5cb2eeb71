// src/schema/date.rs

use chrono::NaiveDate;

/// Parse `value` with the first of `formats` that accepts it.
pub fn parse_date(value: &str, formats: &[&str]) -> Option<NaiveDate> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// `November 1`
pub fn month_day(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// `November 1, 2024`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `November 2024`
pub fn month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

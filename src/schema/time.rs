// src/schema/time.rs

use chrono::{Duration, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::SchemaError;

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)^\s*
        (?P<sh>\d{1,2})(?::(?P<sm>\d{2}))?\s*(?P<sp>[ap]\.?m\.?)?
        \s*(?:(?:-|–|—|to)\s*
        (?P<eh>\d{1,2})(?::(?P<em>\d{2}))?\s*(?P<ep>[ap]\.?m\.?)?
        )?\s*$",
    )
    .expect("time range regex should compile")
});

/// Start and end of an event, read from free text like `6:00 - 8:00 PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// A start without AM/PM takes the end's; a range without any is PM.
    /// When the borrowed meridiem would put the start after the end, the
    /// start is read the other way (`11:00 - 1:00 PM` starts at 11:00).
    /// A single time lasts one hour. Hours above 12 are read as 24-hour.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let bad = || SchemaError::BadTime(text.trim().to_string());
        let caps = RANGE_RE.captures(text).ok_or_else(bad)?;

        let start_h = number(&caps, "sh").ok_or_else(bad)?;
        let start_m = number(&caps, "sm").unwrap_or(0);
        let start_pm = meridiem(&caps, "sp");

        let Some(end_h) = number(&caps, "eh") else {
            let start = clock(start_h, start_m, start_pm.unwrap_or(true)).ok_or_else(bad)?;
            return Ok(Self {
                start,
                end: start + Duration::hours(1),
            });
        };
        let end_m = number(&caps, "em").unwrap_or(0);
        let end_pm = meridiem(&caps, "ep").or(start_pm).unwrap_or(true);
        let end = clock(end_h, end_m, end_pm).ok_or_else(bad)?;

        let start = match start_pm {
            Some(pm) => clock(start_h, start_m, pm),
            None => clock(start_h, start_m, end_pm)
                .filter(|s| *s <= end)
                .or_else(|| clock(start_h, start_m, !end_pm)),
        }
        .ok_or_else(bad)?;

        Ok(Self { start, end })
    }
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn meridiem(caps: &Captures<'_>, name: &str) -> Option<bool> {
    caps.name(name)
        .map(|m| m.as_str().to_ascii_lowercase().starts_with('p'))
}

fn clock(hour: u32, minute: u32, pm: bool) -> Option<NaiveTime> {
    let hour = match hour {
        12 if !pm => 0,
        1..=11 if pm => hour + 12,
        0..=23 => hour,
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

// src/render/links.rs

use chrono::{NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use url::{form_urlencoded, Url};

use crate::model::Event;
use crate::schema::TimeRange;

static GOOGLE_CALENDAR: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://calendar.google.com/calendar/render").expect("google calendar URL should parse")
});

static OUTLOOK_COMPOSE: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://outlook.office.com/calendar/action/compose")
        .expect("outlook compose URL should parse")
});

/// Export links for one event with a known start and end. An end earlier
/// than the start falls on the following day.
#[derive(Debug, Clone)]
pub struct CalendarLinks {
    pub google: Url,
    pub outlook: Url,
    /// `data:text/calendar` URI carrying a one-event ICS document.
    pub ics: String,
    /// Suggested download name for the ICS file.
    pub ics_filename: String,
}

impl CalendarLinks {
    pub fn new(event: &Event, range: TimeRange) -> Self {
        let start = event.date.and_time(range.start);
        let end_date = if range.end < range.start {
            event.date.succ_opt().unwrap_or(event.date)
        } else {
            event.date
        };
        let end = end_date.and_time(range.end);
        Self {
            google: google(event, start, end),
            outlook: outlook(event, start, end),
            ics: ics_data_uri(event, start, end),
            ics_filename: format!("{}.ics", event.name.split_whitespace().collect::<Vec<_>>().join("_")),
        }
    }
}

fn compact(t: NaiveDateTime) -> String {
    t.format("%Y%m%dT%H%M%S").to_string()
}

fn google(event: &Event, start: NaiveDateTime, end: NaiveDateTime) -> Url {
    let mut url = GOOGLE_CALENDAR.clone();
    url.query_pairs_mut()
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &event.name)
        .append_pair("details", &event.description)
        .append_pair("dates", &format!("{}/{}", compact(start), compact(end)))
        .append_pair("location", &event.location);
    url
}

fn outlook(event: &Event, start: NaiveDateTime, end: NaiveDateTime) -> Url {
    let mut url = OUTLOOK_COMPOSE.clone();
    url.query_pairs_mut()
        .append_pair("subject", &event.name)
        .append_pair("body", &event.description)
        .append_pair("startdt", &start.format("%Y-%m-%dT%H:%M:%S").to_string())
        .append_pair("enddt", &end.format("%Y-%m-%dT%H:%M:%S").to_string())
        .append_pair("location", &event.location);
    url
}

/// One-event VCALENDAR document with floating local times.
pub fn ics_document(event: &Event, start: NaiveDateTime, end: NaiveDateTime) -> String {
    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//sasegen//calendar//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}-{}@sasegen", compact(start), ics_text(&event.name).replace(' ', "-")),
        format!("DTSTAMP:{}", Utc::now().format("%Y%m%dT%H%M%SZ")),
        format!("DTSTART:{}", compact(start)),
        format!("DTEND:{}", compact(end)),
        format!("SUMMARY:{}", ics_text(&event.name)),
        format!("DESCRIPTION:{}", ics_text(&event.description)),
        format!("LOCATION:{}", ics_text(&event.location)),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];
    let mut doc = lines.join("\r\n");
    doc.push_str("\r\n");
    doc
}

fn ics_data_uri(event: &Event, start: NaiveDateTime, end: NaiveDateTime) -> String {
    let doc = ics_document(event, start, end);
    // form encoding writes spaces as '+' and escapes literal '+', so the swap is lossless
    let encoded: String = form_urlencoded::byte_serialize(doc.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("data:text/calendar;charset=utf8,{encoded}")
}

/// RFC 5545 TEXT escaping.
fn ics_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event() -> Event {
        Event {
            name: "Fall Social".into(),
            date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            kind: "Social".into(),
            time: "6:00 - 8:00 PM".into(),
            location: "Student Union, Room 2".into(),
            description: "Food; games\nand more".into(),
        }
    }

    fn links() -> CalendarLinks {
        let e = event();
        let range = e.time_range().unwrap();
        CalendarLinks::new(&e, range)
    }

    #[test]
    fn test_google_dates() {
        let url = links().google;
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("dates".into(), "20241101T180000/20241101T200000".into())));
        assert!(pairs.contains(&("text".into(), "Fall Social".into())));
        assert_eq!(url.host_str(), Some("calendar.google.com"));
    }

    #[test]
    fn test_outlook_times() {
        let url = links().outlook;
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("startdt".into(), "2024-11-01T18:00:00".into())));
        assert!(pairs.contains(&("enddt".into(), "2024-11-01T20:00:00".into())));
    }

    #[test]
    fn test_ics_document() {
        let e = event();
        let range = e.time_range().unwrap();
        let doc = ics_document(&e, e.date.and_time(range.start), e.date.and_time(range.end));
        assert!(doc.contains("DTSTART:20241101T180000\r\n"));
        assert!(doc.contains("DTEND:20241101T200000\r\n"));
        assert!(doc.contains("LOCATION:Student Union\\, Room 2\r\n"));
        assert!(doc.contains("DESCRIPTION:Food\\; games\\nand more\r\n"));
    }

    #[test]
    fn test_late_event_ends_next_day() {
        let mut e = event();
        for (time, end) in [("11 PM", "20241102T000000"), ("10 PM - 1 AM", "20241102T010000")] {
            e.time = time.into();
            let l = CalendarLinks::new(&e, e.time_range().unwrap());
            let pairs: Vec<(String, String)> = l.google.query_pairs().into_owned().collect();
            let dates = &pairs.iter().find(|(k, _)| k == "dates").unwrap().1;
            let (from, to) = dates.split_once('/').unwrap();
            assert_eq!(to, end);
            assert!(to > from, "{time}: {dates}");

            let outlook: Vec<(String, String)> = l.outlook.query_pairs().into_owned().collect();
            assert!(outlook.contains(&("enddt".into(), format!("{}-{}-{}T{}:{}:00", &end[..4], &end[4..6], &end[6..8], &end[9..11], &end[11..13]))));
            assert!(l.ics.contains(&format!("DTEND%3A{end}")));
        }
    }

    #[test]
    fn test_dtstamp_is_utc() {
        let e = event();
        let range = e.time_range().unwrap();
        let doc = ics_document(&e, e.date.and_time(range.start), e.date.and_time(range.end));
        let stamp = regex::Regex::new(r"(?m)^DTSTAMP:\d{8}T\d{6}Z\r$").unwrap();
        assert!(stamp.is_match(&doc), "{doc}");
    }

    #[test]
    fn test_ics_uri_is_percent_encoded() {
        let l = links();
        assert!(l.ics.starts_with("data:text/calendar;charset=utf8,BEGIN%3AVCALENDAR%0D%0A"));
        assert!(!l.ics.contains(' '));
        assert!(!l.ics.contains('+'));
        assert!(l.ics.contains("SUMMARY%3AFall%20Social"));
        assert_eq!(l.ics_filename, "Fall_Social.ics");
    }
}

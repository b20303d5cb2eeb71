// src/model/event.rs

use chrono::NaiveDate;

use super::{text, FromRecord};
use crate::schema::{ColumnMap, SchemaError, Source, TimeRange, EVENTS};
use crate::table::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub date: NaiveDate,
    pub kind: String,
    /// Free text, e.g. `6:00 - 8:00 PM`.
    pub time: String,
    pub location: String,
    pub description: String,
}

impl FromRecord for Event {
    const SOURCE: Source = Source::Events;

    fn from_record(record: &Record, cols: &ColumnMap) -> Result<Self, SchemaError> {
        Ok(Self {
            name: text(cols, record, "Name"),
            date: EVENTS.record_date(cols, record)?,
            kind: text(cols, record, "Kind"),
            time: text(cols, record, "Time"),
            location: text(cols, record, "Location"),
            description: text(cols, record, "Description"),
        })
    }
}

impl Event {
    pub fn time_range(&self) -> Result<TimeRange, SchemaError> {
        TimeRange::parse(&self.time)
    }
}

/// Events strictly after `today`, soonest first.
pub fn upcoming(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let mut out: Vec<&Event> = events.iter().filter(|e| e.date > today).collect();
    out.sort_by_key(|e| e.date);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::load;
    use crate::table::parse_table;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upcoming_drops_past_and_today() {
        let table = parse_table(
            "Name,Date,Kind,Time,Location,Description\n\
             Past Social,10/01/2024,Social,6 PM,Union,old\n\
             Today GBM,10/15/2024,Meeting,6 PM,Hall,now\n\
             Future Mixer,11/01/2024,Social,6 PM,Union,new\n",
        );
        let events = load::<Event>(&table).unwrap();
        let names: Vec<_> = upcoming(&events, ymd(2024, 10, 15))
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Future Mixer"]);
    }

    #[test]
    fn test_upcoming_sorted() {
        let table = parse_table(
            "Name,Date,Kind,Time,Location,Description\n\
             B,12/01/2024,x,6 PM,x,x\n\
             A,11/01/2024,x,6 PM,x,x\n\
             C,01/15/2025,x,6 PM,x,x\n",
        );
        let events = load::<Event>(&table).unwrap();
        let names: Vec<_> = upcoming(&events, ymd(2024, 1, 1))
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_multiline_description() {
        let table = parse_table(
            "Name,Date,Kind,Time,Location,Description\n\
             Gala,11/01/2024,Formal,6:00 - 8:00 PM,Ballroom,\"Dress up.\nBring a friend.\"\n",
        );
        let events = load::<Event>(&table).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].description.contains('\n'));
        assert!(events[0].time_range().is_ok());
    }
}

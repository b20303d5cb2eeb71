// src/model/announcement.rs

use chrono::NaiveDate;
use std::cmp::Reverse;

use super::{text, FromRecord};
use crate::schema::{ColumnMap, SchemaError, Source, ANNOUNCEMENTS};
use crate::table::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    pub image: String,
    pub link_button: String,
    pub link: String,
}

impl FromRecord for Announcement {
    const SOURCE: Source = Source::Announcements;

    fn from_record(record: &Record, cols: &ColumnMap) -> Result<Self, SchemaError> {
        Ok(Self {
            name: text(cols, record, "Name"),
            date: ANNOUNCEMENTS.record_date(cols, record)?,
            description: text(cols, record, "Description"),
            image: text(cols, record, "Image"),
            link_button: text(cols, record, "Link Button"),
            link: text(cols, record, "Link"),
        })
    }
}

/// The `n` newest announcements dated on or before `today`.
pub fn recent(list: &[Announcement], today: NaiveDate, n: usize) -> Vec<&Announcement> {
    let mut out: Vec<&Announcement> = list.iter().filter(|a| a.date <= today).collect();
    out.sort_by_key(|a| Reverse(a.date));
    out.truncate(n);
    out
}

// src/model/gallery.rs

use chrono::{Datelike, NaiveDate};

use super::{text, FromRecord};
use crate::schema::{ColumnMap, SchemaError, Source, GALLERY};
use crate::table::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub name: String,
    pub date: NaiveDate,
    pub num_pics: u32,
    pub description: String,
}

impl FromRecord for GalleryEntry {
    const SOURCE: Source = Source::Gallery;

    fn from_record(record: &Record, cols: &ColumnMap) -> Result<Self, SchemaError> {
        Ok(Self {
            name: text(cols, record, "Name"),
            date: GALLERY.record_date(cols, record)?,
            num_pics: pic_count(cols, record)?,
            description: text(cols, record, "Description"),
        })
    }
}

/// Most numbered photos one entry may list.
pub const MAX_PICS: u32 = 100;

/// `Num of Pics`, or 0 when blank or unreadable.
fn pic_count(cols: &ColumnMap, record: &Record) -> Result<u32, SchemaError> {
    let count: u32 = cols.get(record, "Num of Pics").trim().parse().unwrap_or(0);
    if count > MAX_PICS {
        return Err(SchemaError::TooLarge {
            input: Source::Gallery,
            column: "Num of Pics",
            value: count.into(),
            max: MAX_PICS.into(),
        });
    }
    Ok(count)
}

/// Academic term a gallery entry is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semester {
    /// August to December.
    Autumn,
    /// January to May.
    Spring,
}

impl Semester {
    /// Summer months belong to neither term.
    pub fn of(date: NaiveDate) -> Option<Self> {
        match date.month() {
            8..=12 => Some(Semester::Autumn),
            1..=5 => Some(Semester::Spring),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Semester::Autumn => "Autumn",
            Semester::Spring => "Spring",
        }
    }
}

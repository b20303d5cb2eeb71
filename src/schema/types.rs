// src/schema/types.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use thiserror::Error;

use super::date;
use crate::table::{Record, Table};

/// The CSV inputs the site is generated from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Events,
    Gallery,
    Officers,
    Announcements,
    Carousel,
}

impl Source {
    pub const ALL: [Source; 5] = [
        Source::Events,
        Source::Gallery,
        Source::Officers,
        Source::Announcements,
        Source::Carousel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Source::Events => "events",
            Source::Gallery => "gallery",
            Source::Officers => "officers",
            Source::Announcements => "announcements",
            Source::Carousel => "carousel",
        }
    }

    pub fn schema(self) -> &'static SourceSchema {
        match self {
            Source::Events => &super::EVENTS,
            Source::Gallery => &super::GALLERY,
            Source::Officers => &super::OFFICERS,
            Source::Announcements => &super::ANNOUNCEMENTS,
            Source::Carousel => &super::CAROUSEL,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{input} CSV has no header row")]
    Empty { input: Source },

    #[error("{input} CSV is missing column `{column}`")]
    MissingColumn {
        input: Source,
        column: &'static str,
    },

    #[error("{input} record has no `{column}`")]
    MissingValue {
        input: Source,
        column: &'static str,
    },

    #[error("{input} CSV has an unreadable date `{value}`")]
    BadDate { input: Source, value: String },

    #[error("{input} record has `{column}` {value}, above the limit of {max}")]
    TooLarge {
        input: Source,
        column: &'static str,
        value: u64,
        max: u64,
    },

    #[error("unreadable time range `{0}`")]
    BadTime(String),
}

/// A named column and the other header spellings accepted for it.
#[derive(Debug)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

/// Expected shape of one source: its columns and, if it has one, which
/// column holds a date and the formats that date may be written in.
#[derive(Debug)]
pub struct SourceSchema {
    pub source: Source,
    pub columns: &'static [ColumnSpec],
    pub date_column: Option<&'static str>,
    pub date_formats: &'static [&'static str],
}

impl SourceSchema {
    /// Check that every column is present in the table header and map each
    /// to its position.
    pub fn validate(&self, table: &Table) -> Result<ColumnMap, SchemaError> {
        if table.headers().is_empty() {
            return Err(SchemaError::Empty { input: self.source });
        }
        let header: Vec<String> = table.headers().iter().map(|h| normalize(h)).collect();

        let mut index = HashMap::with_capacity(self.columns.len());
        for spec in self.columns {
            let position = std::iter::once(spec.name)
                .chain(spec.aliases.iter().copied())
                .find_map(|name| {
                    let name = normalize(name);
                    header.iter().position(|h| *h == name)
                })
                .ok_or(SchemaError::MissingColumn {
                    input: self.source,
                    column: spec.name,
                })?;
            index.insert(spec.name, position);
        }

        Ok(ColumnMap {
            source: self.source,
            index,
        })
    }

    /// Parse a date written in one of this source's formats.
    pub fn parse_date(&self, value: &str) -> Result<NaiveDate, SchemaError> {
        date::parse_date(value, self.date_formats).ok_or_else(|| SchemaError::BadDate {
            input: self.source,
            value: value.trim().to_string(),
        })
    }

    /// The record's date, read from the date column.
    pub fn record_date(&self, cols: &ColumnMap, record: &Record) -> Result<NaiveDate, SchemaError> {
        let value = self.date_column.map_or("", |c| cols.get(record, c));
        self.parse_date(value)
    }
}

/// Column positions of a validated table.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    source: Source,
    index: HashMap<&'static str, usize>,
}

impl ColumnMap {
    pub fn source(&self) -> Source {
        self.source
    }

    /// Value of a schema column in `record`; empty when the column is not
    /// part of the schema.
    pub fn get<'r>(&self, record: &'r Record, column: &str) -> &'r str {
        self.index
            .get(column)
            .and_then(|&i| record.get_at(i))
            .unwrap_or("")
    }
}

/// Header comparison key: case, whitespace, `-` and `_` are ignored.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// src/schema/mod.rs

pub mod date;
pub mod time;
pub mod types;

pub use time::TimeRange;
pub use types::{ColumnMap, ColumnSpec, SchemaError, Source, SourceSchema};

const fn col(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, aliases: &[] }
}

pub static EVENTS: SourceSchema = SourceSchema {
    source: Source::Events,
    columns: &[
        col("Name"),
        col("Date"),
        col("Kind"),
        col("Time"),
        col("Location"),
        col("Description"),
    ],
    date_column: Some("Date"),
    date_formats: &["%m/%d/%Y", "%d-%b-%Y"],
};

pub static GALLERY: SourceSchema = SourceSchema {
    source: Source::Gallery,
    columns: &[
        col("Name"),
        col("Date"),
        ColumnSpec {
            name: "Num of Pics",
            aliases: &["pics", "num pics"],
        },
        col("Description"),
    ],
    date_column: Some("Date"),
    date_formats: &["%m/%d/%Y", "%Y-%m-%d", "%d-%b-%Y"],
};

pub static OFFICERS: SourceSchema = SourceSchema {
    source: Source::Officers,
    columns: &[
        col("Position"),
        col("Name"),
        col("Major"),
        col("Email"),
        col("Year"),
        ColumnSpec {
            name: "LinkedIn",
            aliases: &["linkedin-url", "linkedin url"],
        },
    ],
    date_column: None,
    date_formats: &[],
};

pub static ANNOUNCEMENTS: SourceSchema = SourceSchema {
    source: Source::Announcements,
    columns: &[
        col("Name"),
        col("Date"),
        col("Description"),
        col("Image"),
        col("Link Button"),
        col("Link"),
    ],
    date_column: Some("Date"),
    date_formats: &["%d-%m-%Y", "%d-%b-%Y"],
};

pub static CAROUSEL: SourceSchema = SourceSchema {
    source: Source::Carousel,
    columns: &[col("Image"), col("Image Title"), col("Title")],
    date_column: None,
    date_formats: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_table;
    use chrono::NaiveDate;

    #[test]
    fn test_officers_named_columns() {
        let table = parse_table(
            "name ,POSITION,major,email,year,linkedin-url\nAda Lovelace,President,CS,ada@x.edu,Senior,https://l.in/ada\n",
        );
        let cols = Source::Officers.schema().validate(&table).unwrap();
        let record = &table.records()[0];
        assert_eq!(cols.get(record, "Position"), "President");
        assert_eq!(cols.get(record, "Name"), "Ada Lovelace");
        assert_eq!(cols.get(record, "LinkedIn"), "https://l.in/ada");
    }

    #[test]
    fn test_missing_column() {
        let table = parse_table("Position,Name,Major,Year,LinkedIn\nPresident,Ada,CS,Senior,x\n");
        let err = Source::Officers.schema().validate(&table).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumn {
                input: Source::Officers,
                column: "Email"
            }
        );
        assert_eq!(err.to_string(), "officers CSV is missing column `Email`");
    }

    #[test]
    fn test_empty_table() {
        let err = Source::Carousel.schema().validate(&parse_table("")).unwrap_err();
        assert_eq!(
            err,
            SchemaError::Empty {
                input: Source::Carousel
            }
        );
    }

    #[test]
    fn test_date_formats_per_source() {
        let nov1 = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        assert_eq!(EVENTS.parse_date("11/01/2024"), Ok(nov1));
        assert_eq!(EVENTS.parse_date("01-Nov-2024"), Ok(nov1));
        assert_eq!(ANNOUNCEMENTS.parse_date("01-11-2024"), Ok(nov1));
        assert_eq!(GALLERY.parse_date("2024-11-01"), Ok(nov1));
        assert!(matches!(
            ANNOUNCEMENTS.parse_date("11/01/2024"),
            Err(SchemaError::BadDate { .. })
        ));
        assert!(OFFICERS.parse_date("11/01/2024").is_err());
    }

    #[test]
    fn test_every_source_has_a_schema() {
        for source in Source::ALL {
            assert_eq!(source.schema().source, source);
        }
    }
}

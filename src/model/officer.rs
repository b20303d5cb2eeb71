// src/model/officer.rs

use super::{text, FromRecord};
use crate::schema::{ColumnMap, SchemaError, Source};
use crate::table::Record;

const CO_PREFIX: &str = "Co-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Officer {
    pub position: String,
    pub name: String,
    pub major: String,
    pub email: String,
    pub year: String,
    pub linkedin: String,
}

impl FromRecord for Officer {
    const SOURCE: Source = Source::Officers;

    fn from_record(record: &Record, cols: &ColumnMap) -> Result<Self, SchemaError> {
        let required = |column: &'static str| {
            let value = text(cols, record, column);
            if value.is_empty() {
                Err(SchemaError::MissingValue {
                    input: Source::Officers,
                    column,
                })
            } else {
                Ok(value)
            }
        };
        Ok(Self {
            position: required("Position")?,
            name: required("Name")?,
            major: text(cols, record, "Major"),
            email: text(cols, record, "Email"),
            year: text(cols, record, "Year"),
            linkedin: text(cols, record, "LinkedIn"),
        })
    }
}

impl Officer {
    /// Shared positions are written `Co-<position>`.
    pub fn is_co(&self) -> bool {
        self.position.starts_with(CO_PREFIX)
    }

    /// Position without the `Co-` marker.
    pub fn base_position(&self) -> &str {
        self.position
            .strip_prefix(CO_PREFIX)
            .map_or(self.position.as_str(), str::trim_start)
    }

    /// `First_Last`, used for photo file names.
    pub fn photo_stem(&self) -> String {
        let words: Vec<&str> = self.name.split_whitespace().collect();
        match words.as_slice() {
            [] => String::new(),
            [only] => only.to_string(),
            [first, .., last] => format!("{first}_{last}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::load;
    use crate::table::parse_table;

    #[test]
    fn test_rows_without_name_skipped() {
        let table = parse_table(
            "Position,Name,Major,Email,Year,LinkedIn\n\
             President,Ada Lovelace,CS,ada@x.edu,Senior,https://l.in/ada\n\
             Treasurer,,Math,t@x.edu,Junior,\n",
        );
        let officers = load::<Officer>(&table).unwrap();
        assert_eq!(officers.len(), 1);
        assert_eq!(officers[0].name, "Ada Lovelace");
    }

    #[test]
    fn test_co_positions() {
        let officer = Officer {
            position: "Co-Events Chair".into(),
            name: "Grace Brewster Hopper".into(),
            major: String::new(),
            email: String::new(),
            year: String::new(),
            linkedin: String::new(),
        };
        assert!(officer.is_co());
        assert_eq!(officer.base_position(), "Events Chair");
        assert_eq!(officer.photo_stem(), "Grace_Hopper");
    }
}

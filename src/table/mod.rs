// src/table/mod.rs

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::sync::Arc;

pub mod parser;
pub mod write;

pub use parser::{parse_rows, parse_table};
pub use write::write_table;

/// One data row, keyed by the header of the table it came from.
///
/// Values are kept in header order; every record of a table has exactly the
/// header's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Value of the first column named `column`, if the header has one.
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.get_at(idx)
    }

    /// Value at header position `idx`.
    pub fn get_at(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Records in source order, all sharing one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Arc<[String]>,
    records: Vec<Record>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            headers: Arc::from(Vec::new()),
            records: Vec::new(),
        }
    }
}

impl Table {
    /// Zip raw rows against `headers`. Short rows are padded with empty
    /// strings, long rows lose their excess values.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Arc<[String]> = Arc::from(headers);
        let width = headers.len();
        let records = rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, String::new());
                Record {
                    headers: Arc::clone(&headers),
                    values,
                }
            })
            .collect();
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of data records (the header row is not counted).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_and_long_rows() {
        let table = Table::new(
            strings(&["a", "b", "c"]),
            vec![strings(&["1"]), strings(&["1", "2", "3", "4"])],
        );
        assert_eq!(table.len(), 2);
        for record in &table {
            assert_eq!(record.len(), 3);
        }
        assert_eq!(table.records()[0].get("c"), Some(""));
        assert_eq!(table.records()[1].values(), &strings(&["1", "2", "3"])[..]);
    }

    #[test]
    fn test_get_unknown_column() {
        let table = Table::new(strings(&["Name"]), vec![strings(&["x"])]);
        assert_eq!(table.records()[0].get("Date"), None);
    }

    #[test]
    fn test_serialize_as_objects() {
        let table = Table::new(
            strings(&["Name", "Date"]),
            vec![strings(&["Fall Social", "11/01/2024"])],
        );
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"Name":"Fall Social","Date":"11/01/2024"}]"#);
    }
}

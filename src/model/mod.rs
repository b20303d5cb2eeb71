// src/model/mod.rs

use tracing::{debug, warn};

use crate::schema::{ColumnMap, SchemaError, Source};
use crate::table::{Record, Table};

pub mod announcement;
pub mod carousel;
pub mod event;
pub mod gallery;
pub mod officer;

pub use announcement::Announcement;
pub use carousel::Slide;
pub use event::Event;
pub use gallery::{GalleryEntry, Semester};
pub use officer::Officer;

/// A typed row of one source.
pub trait FromRecord: Sized {
    const SOURCE: Source;

    fn from_record(record: &Record, cols: &ColumnMap) -> Result<Self, SchemaError>;
}

/// Validate `table` against `T`'s schema and convert its records.
///
/// A schema mismatch fails the whole table. A record that does not convert
/// is logged and skipped.
pub fn load<T: FromRecord>(table: &Table) -> Result<Vec<T>, SchemaError> {
    let cols = T::SOURCE.schema().validate(table)?;
    let mut out = Vec::with_capacity(table.len());
    for (idx, record) in table.iter().enumerate() {
        match T::from_record(record, &cols) {
            Ok(item) => out.push(item),
            Err(e) => warn!(source = %T::SOURCE, record = idx + 1, error = %e, "skipping record"),
        }
    }
    debug!(source = %T::SOURCE, loaded = out.len(), total = table.len(), "loaded records");
    Ok(out)
}

/// Number of records of `table` that convert for `source`.
pub fn count_valid(source: Source, table: &Table) -> Result<usize, SchemaError> {
    Ok(match source {
        Source::Events => load::<Event>(table)?.len(),
        Source::Gallery => load::<GalleryEntry>(table)?.len(),
        Source::Officers => load::<Officer>(table)?.len(),
        Source::Announcements => load::<Announcement>(table)?.len(),
        Source::Carousel => load::<Slide>(table)?.len(),
    })
}

/// Trimmed, owned value of a schema column.
pub(crate) fn text(cols: &ColumnMap, record: &Record, column: &str) -> String {
    cols.get(record, column).trim().to_string()
}

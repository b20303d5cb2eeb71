// src/model/carousel.rs

use super::{text, FromRecord};
use crate::schema::{ColumnMap, SchemaError, Source};
use crate::table::Record;

/// One home-page carousel slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub image: String,
    pub image_title: String,
    pub title: String,
}

impl FromRecord for Slide {
    const SOURCE: Source = Source::Carousel;

    fn from_record(record: &Record, cols: &ColumnMap) -> Result<Self, SchemaError> {
        let image = text(cols, record, "Image");
        if image.is_empty() {
            return Err(SchemaError::MissingValue {
                input: Source::Carousel,
                column: "Image",
            });
        }
        Ok(Self {
            image,
            image_title: text(cols, record, "Image Title"),
            title: text(cols, record, "Title"),
        })
    }
}

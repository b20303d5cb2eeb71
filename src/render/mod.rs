// src/render/mod.rs

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Assets;
use crate::model::{self, Announcement, Event, GalleryEntry, Officer, Slide};
use crate::schema::Source;
use crate::table::Table;

pub mod calendar;
pub mod eboard;
pub mod gallery;
pub mod home;
pub mod links;

/// A named region of a page that receives a generated fragment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Container {
    #[serde(rename = "cardsContainer")]
    #[value(name = "cardsContainer")]
    CalendarCards,
    #[serde(rename = "modalsContainer")]
    #[value(name = "modalsContainer")]
    CalendarModals,
    #[serde(rename = "gallery-container")]
    #[value(name = "gallery-container")]
    Gallery,
    #[serde(rename = "eboard-container")]
    #[value(name = "eboard-container")]
    Eboard,
    #[serde(rename = "announcements-container")]
    #[value(name = "announcements-container")]
    Announcements,
    #[serde(rename = "events-container")]
    #[value(name = "events-container")]
    EventPreviews,
    #[serde(rename = "carousel-inner")]
    #[value(name = "carousel-inner")]
    Carousel,
}

impl Container {
    pub const ALL: [Container; 7] = [
        Container::CalendarCards,
        Container::CalendarModals,
        Container::Gallery,
        Container::Eboard,
        Container::Announcements,
        Container::EventPreviews,
        Container::Carousel,
    ];

    /// Element id the fragment stands in for; also the page marker name.
    pub fn id(self) -> &'static str {
        match self {
            Container::CalendarCards => "cardsContainer",
            Container::CalendarModals => "modalsContainer",
            Container::Gallery => "gallery-container",
            Container::Eboard => "eboard-container",
            Container::Announcements => "announcements-container",
            Container::EventPreviews => "events-container",
            Container::Carousel => "carousel-inner",
        }
    }

    pub fn source(self) -> Source {
        match self {
            Container::CalendarCards | Container::CalendarModals | Container::EventPreviews => {
                Source::Events
            }
            Container::Gallery => Source::Gallery,
            Container::Eboard => Source::Officers,
            Container::Announcements => Source::Announcements,
            Container::Carousel => Source::Carousel,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub struct RenderContext<'a> {
    pub today: NaiveDate,
    pub assets: &'a Assets,
}

/// Build the fragment for `container` from its source table.
pub fn render(container: Container, table: &Table, ctx: &RenderContext<'_>) -> Result<String> {
    let html = match container {
        Container::CalendarCards => {
            calendar::calendar(&model::load::<Event>(table)?, ctx.today).cards
        }
        Container::CalendarModals => {
            calendar::calendar(&model::load::<Event>(table)?, ctx.today).modals
        }
        Container::EventPreviews => {
            home::event_previews(&model::load::<Event>(table)?, ctx.today, ctx.assets)
        }
        Container::Gallery => gallery::gallery(&model::load::<GalleryEntry>(table)?, ctx.assets),
        Container::Eboard => eboard::eboard(&model::load::<Officer>(table)?, ctx.today, ctx.assets),
        Container::Announcements => home::announcements(
            &model::load::<Announcement>(table)?,
            ctx.today,
            ctx.assets,
        ),
        Container::Carousel => home::carousel(&model::load::<Slide>(table)?, ctx.assets),
    };
    Ok(html)
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape, keeping line breaks as `<br>`.
pub fn escape_lines(text: &str) -> String {
    text.lines()
        .map(escape)
        .collect::<Vec<_>>()
        .join("<br>\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_table;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_lines("a < b\nc"), "a &lt; b<br>\nc");
    }

    #[test]
    fn test_container_ids_round_trip_through_yaml() {
        for c in Container::ALL {
            let yaml = serde_yaml::to_string(&c).unwrap();
            assert_eq!(yaml.trim(), c.id());
            let back: Container = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(back, c);
        }
    }

    #[test]
    fn test_render_reports_schema_error() {
        let assets = Assets::default();
        let ctx = RenderContext {
            today: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            assets: &assets,
        };
        let err = render(Container::Eboard, &parse_table("Name\nAda\n"), &ctx).unwrap_err();
        assert!(err.to_string().contains("missing column `Position`"));
    }
}

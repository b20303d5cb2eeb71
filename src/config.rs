// src/config.rs

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::render::Container;
use crate::schema::Source;

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG: &str = "site.yaml";

/// Site configuration (`site.yaml`). Every field has a default matching the
/// chapter site's layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory or `http(s)` URL the source paths are resolved against.
    pub base: String,
    /// Overrides the build date used for upcoming/recent filtering.
    pub today: Option<NaiveDate>,
    pub sources: Sources,
    pub assets: Assets,
    pub pages: Vec<PageConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base: ".".into(),
            today: None,
            sources: Sources::default(),
            assets: Assets::default(),
            pages: vec![
                PageConfig::new(
                    "index.html",
                    &[
                        Container::Carousel,
                        Container::Announcements,
                        Container::EventPreviews,
                    ],
                ),
                PageConfig::new(
                    "pages/calender.html",
                    &[Container::CalendarCards, Container::CalendarModals],
                ),
                PageConfig::new("pages/gallery.html", &[Container::Gallery]),
                PageConfig::new("pages/meetTeam.html", &[Container::Eboard]),
            ],
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(path = %path.display(), pages = config.pages.len(), "loaded config");
        Ok(config)
    }

    /// Load `path`, or `site.yaml` if present, or fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::load(Path::new(DEFAULT_CONFIG)),
            None => {
                debug!("no config file; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Containers used by at least one page, in first-use order.
    pub fn containers(&self) -> Vec<Container> {
        let mut out = Vec::new();
        for c in self.pages.iter().flat_map(|p| p.containers.iter()) {
            if !out.contains(c) {
                out.push(*c);
            }
        }
        out
    }
}

/// Source CSV paths, relative to `base`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Sources {
    pub events: String,
    pub gallery: String,
    pub officers: String,
    pub announcements: String,
    pub carousel: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            events: "CSV_info/UpcomingEvents.csv".into(),
            gallery: "CSV_info/GalleryEvents.csv".into(),
            officers: "images/EBoard/CurrentBoard.csv".into(),
            announcements: "CSV_info/Announcements.csv".into(),
            carousel: "CSV_info/Carousel.csv".into(),
        }
    }
}

impl Sources {
    pub fn path(&self, source: Source) -> &str {
        match source {
            Source::Events => &self.events,
            Source::Gallery => &self.gallery,
            Source::Officers => &self.officers,
            Source::Announcements => &self.announcements,
            Source::Carousel => &self.carousel,
        }
    }
}

/// URL prefixes written into the generated markup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Assets {
    /// Numbered gallery photos: `{gallery_images}/{Name}{n}.png`.
    pub gallery_images: String,
    /// Local folder holding one sub-folder of photos per gallery event,
    /// searched when an entry has no photo count.
    pub event_photo_dir: Option<PathBuf>,
    pub event_photo_url: String,
    pub logo: String,
    pub eboard_images: String,
    pub carousel_images: String,
    pub announcement_images: String,
    pub calendar_page: String,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            gallery_images: "../images/Gallery".into(),
            event_photo_dir: None,
            event_photo_url: "images/event_post".into(),
            logo: "../images/sase_logo.png".into(),
            eboard_images: "../images/EBoard".into(),
            carousel_images: "images/Carousel".into(),
            announcement_images: "images/Announcements".into(),
            calendar_page: "pages/calender.html".into(),
        }
    }
}

/// A page template and the containers generated into it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    pub template: PathBuf,
    /// Defaults to rewriting the template in place.
    #[serde(default)]
    pub output: Option<PathBuf>,
    pub containers: Vec<Container>,
}

impl PageConfig {
    fn new(path: &str, containers: &[Container]) -> Self {
        Self {
            template: PathBuf::from(path),
            output: None,
            containers: containers.to_vec(),
        }
    }

    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "base: https://example.org/site/\ntoday: 2024-10-15\nsources:\n  events: data/events.csv\npages:\n  - template: cal.html\n    output: out/cal.html\n    containers: [cardsContainer, modalsContainer]\n"
        )
        .unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.base, "https://example.org/site/");
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
        assert_eq!(config.sources.path(Source::Events), "data/events.csv");
        assert_eq!(
            config.sources.path(Source::Carousel),
            "CSV_info/Carousel.csv"
        );
        assert_eq!(config.pages.len(), 1);
        assert_eq!(config.pages[0].output_path(), Path::new("out/cal.html"));
        assert_eq!(
            config.containers(),
            vec![Container::CalendarCards, Container::CalendarModals]
        );
    }

    #[test]
    fn test_unknown_container_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "pages:\n  - template: a.html\n    containers: [sidebar]\n").unwrap();
        assert!(SiteConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_default_pages_cover_every_container() {
        let config = SiteConfig::default();
        for c in Container::ALL {
            assert!(config.containers().contains(&c), "{c:?} unused");
        }
    }
}

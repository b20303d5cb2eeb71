// src/render/gallery.rs

use chrono::Datelike;
use glob::{glob, Pattern};
use std::path::Path;
use tracing::{debug, warn};

use super::escape;
use crate::config::Assets;
use crate::model::{GalleryEntry, Semester};
use crate::schema::date::long_date;

const PER_ROW: usize = 3;
const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Gallery sections, newest year first; within a year Autumn precedes
/// Spring, and each section lays its entries out three to a row.
pub fn gallery(entries: &[GalleryEntry], assets: &Assets) -> String {
    let mut sorted: Vec<&GalleryEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut years: Vec<i32> = Vec::new();
    for e in &sorted {
        if !years.contains(&e.date.year()) {
            years.push(e.date.year());
        }
    }

    let mut out = String::new();
    // carousel ids must be unique across the whole page
    let mut card_num = 0;
    for year in years {
        for semester in [Semester::Autumn, Semester::Spring] {
            let group: Vec<&GalleryEntry> = sorted
                .iter()
                .copied()
                .filter(|e| e.date.year() == year && Semester::of(e.date) == Some(semester))
                .collect();
            if group.is_empty() {
                continue;
            }
            out.push_str(&format!(
                r#"    <div class="container"></div>
    <div class="break"></div>
    <h1 class="fw-bold text-center sase-blue-text">{} {}</h1>
    <div class="break"></div>
"#,
                semester.label(),
                year
            ));
            for row in group.chunks(PER_ROW) {
                out.push_str("    <div class=\"row mb-3 mx-3\">\n");
                for entry in row {
                    card_num += 1;
                    out.push_str(&card(card_num, entry, &photos(entry, assets)));
                }
                out.push_str("    </div>\n");
            }
        }
    }

    let skipped = sorted.iter().filter(|e| Semester::of(e.date).is_none()).count();
    if skipped > 0 {
        debug!(skipped, "summer entries not shown");
    }
    out
}

/// Photo URLs for an entry: numbered files when a count is given, otherwise
/// whatever the event's photo folder holds, otherwise the logo.
pub fn photos(entry: &GalleryEntry, assets: &Assets) -> Vec<String> {
    if entry.num_pics > 0 {
        return (1..=entry.num_pics)
            .map(|i| format!("{}/{}{}.png", assets.gallery_images, entry.name, i))
            .collect();
    }
    if let Some(dir) = &assets.event_photo_dir {
        let found = folder_photos(&dir.join(&entry.name));
        if !found.is_empty() {
            return found
                .into_iter()
                .map(|f| format!("{}/{}/{}", assets.event_photo_url, entry.name, f))
                .collect();
        }
    }
    vec![assets.logo.clone()]
}

/// Sorted file names of the photos directly inside `dir`.
fn folder_photos(dir: &Path) -> Vec<String> {
    let pattern = format!("{}/*", Pattern::escape(&dir.to_string_lossy()));
    let entries = match glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "bad photo glob");
            return Vec::new();
        }
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| PHOTO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}

fn card(num: usize, entry: &GalleryEntry, photos: &[String]) -> String {
    let items: String = photos
        .iter()
        .enumerate()
        .map(|(i, src)| {
            format!(
                r#"
              <div class="carousel-item{active}">
                <img class="d-block w-100 carousel-image" src="{src}" alt="">
              </div>"#,
                active = if i == 0 { " active" } else { "" },
                src = escape(src),
            )
        })
        .collect();

    let controls = if photos.len() > 1 {
        format!(
            r##"
            <button class="carousel-control-prev" type="button" data-bs-target="#event{num}Carousel" data-bs-slide="prev">
              <span class="carousel-control-prev-icon" aria-hidden="true"></span>
              <span class="visually-hidden">Previous</span>
            </button>
            <button class="carousel-control-next" type="button" data-bs-target="#event{num}Carousel" data-bs-slide="next">
              <span class="carousel-control-next-icon" aria-hidden="true"></span>
              <span class="visually-hidden">Next</span>
            </button>"##
        )
    } else {
        String::new()
    };

    format!(
        r#"      <div class="col-sm-4 themed-grid-col">
        <div class="card">
          <div id="event{num}Carousel" class="carousel slide" data-bs-ride="carousel" data-bs-interval="5000">
            <div class="carousel-inner">{items}
            </div>{controls}
          </div>
          <div class="card-body">
            <h5 class="card-title">{name}</h5>
            <p class="text-secondary mb-2">{date}</p>
            <p class="card-text">{description}</p>
          </div>
        </div>
      </div>
"#,
        name = escape(&entry.name),
        date = escape(&long_date(entry.date)),
        description = super::escape_lines(&entry.description),
    )
}

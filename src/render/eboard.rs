// src/render/eboard.rs

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

use super::escape;
use crate::config::Assets;
use crate::model::Officer;

/// Officer cards in source order, grouped by base position.
pub fn eboard(officers: &[Officer], today: NaiveDate, assets: &Assets) -> String {
    let photo_dir = format!("{}/EBoard{}", assets.eboard_images, board_years(today));
    let mut current: Option<&str> = None;
    let mut counts: HashMap<&str, usize> = HashMap::new();

    let mut out = String::from(
        "<div class=\"container-fluid p-3\">\n  <div class=\"row gy-4\">\n",
    );
    for officer in officers {
        let base = officer.base_position();
        if current != Some(base) {
            // `--` may not appear inside an HTML comment
            out.push_str(&format!(
                "    <!-- {}(s) -->\n",
                escape(base).replace("--", "- -")
            ));
            current = Some(base);
            counts.insert(base, 0);
        }
        let count = counts.entry(base).or_insert(0);
        *count += 1;

        let id = card_id(officer, *count);
        out.push_str(&card(officer, &id, &photo_dir));
    }
    out.push_str("  </div>\n</div>\n");

    debug!(officers = officers.len(), "rendered eboard");
    out
}

/// `yy-yy` for the board year starting in `today`'s calendar year.
fn board_years(today: NaiveDate) -> String {
    let year = today.year();
    format!("{:02}-{:02}", year.rem_euclid(100), (year + 1).rem_euclid(100))
}

/// Collapse target for an officer's details.
pub fn card_id(officer: &Officer, count: usize) -> String {
    let slug: String = officer
        .base_position()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if officer.is_co() {
        let short: String = slug.chars().take(4).collect();
        format!("{short}{count}")
    } else {
        slug
    }
}

fn card(officer: &Officer, id: &str, photo_dir: &str) -> String {
    let photo = format!("{}/{}.png", photo_dir, officer.photo_stem());
    format!(
        r##"    <div class="col-md-4 col-lg-3">
      <div class="card">
        <img src="{photo}" class="card-img-top" alt="{name}">
        <div class="card-body">
          <h2 class="card-title text-center fw-bold">{position}</h2>
          <h5 class="card-title text-center">{name}</h5>
          <div class="text-center">
            <button class="btn sase-blue text-white my-2" type="button" data-bs-toggle="collapse" data-bs-target="#{id}-info" aria-expanded="false" aria-controls="{id}-info">
              About
            </button>
          </div>
          <div class="collapse" id="{id}-info">
            <div class="card card-body">
              <p class="text-start my-auto">
                Year: {year}<br>
                Major: {major}<br>
                Email: <a href="mailto:{email}">{email}</a><br>
                Linkedin: <a href="{linkedin}" target="_blank">Connect</a></p>
            </div>
          </div>
        </div>
      </div>
    </div>

"##,
        photo = escape(&photo),
        name = escape(&officer.name),
        position = escape(&officer.position),
        id = escape(id),
        year = escape(&officer.year),
        major = escape(&officer.major),
        email = escape(&officer.email),
        linkedin = escape(&officer.linkedin),
    )
}

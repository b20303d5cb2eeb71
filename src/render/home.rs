// src/render/home.rs

use chrono::NaiveDate;
use tracing::debug;

use super::{escape, escape_lines};
use crate::config::Assets;
use crate::model::announcement::recent;
use crate::model::event::upcoming;
use crate::model::{Announcement, Event, Slide};
use crate::schema::date::{long_date, month_day};

const ANNOUNCEMENTS_SHOWN: usize = 2;
const PREVIEWS_SHOWN: usize = 3;

const TBD_NAME: &str = "TBD";
const TBD_DATE: &str = "X XX, XXXX";
const TBD_DESCRIPTION: &str = "Check back in for more information on upcoming events";

/// The two newest announcements already published by `today`.
pub fn announcements(list: &[Announcement], today: NaiveDate, assets: &Assets) -> String {
    let shown = recent(list, today, ANNOUNCEMENTS_SHOWN);
    let mut out = String::from("<div class=\"row\">\n");
    for a in &shown {
        let link = if a.link.is_empty() { "#" } else { a.link.as_str() };
        let button = if a.link_button.is_empty() {
            "Learn More"
        } else {
            a.link_button.as_str()
        };
        out.push_str(&format!(
            r#"  <div class="col-md-6">
    <div class="row g-0 border rounded overflow-hidden flex-md-row mb-2 shadow-sm h-md-250 position-relative sase-green">
      <div class="col p-4 d-flex flex-column position-static">
        <h3 class="mb-0">{name}</h3>
        <div class="mb-1 text-body-secondary">{date}</div>
        <p class="card-text mb-auto">{description}</p>
        <a href="{link}" target="_blank" class="btn btn-outline-light btn-lg my-2 rounded-0">
          {button}
        </a>
      </div>
      <div class="col-auto d-none d-lg-block">
        <img class="announcement-pic w-100" src="{image}" alt="Announcement Image">
      </div>
    </div>
  </div>
"#,
            name = escape(&a.name),
            date = escape(&long_date(a.date)),
            description = escape_lines(&a.description),
            link = escape(link),
            button = escape(button),
            image = escape(&format!("{}/{}", assets.announcement_images, a.image)),
        ));
    }
    out.push_str("</div>\n");
    debug!(total = list.len(), shown = shown.len(), "rendered announcements");
    out
}

/// Three upcoming-event previews, padded with placeholders.
pub fn event_previews(events: &[Event], today: NaiveDate, assets: &Assets) -> String {
    let next = upcoming(events, today);
    let mut out = String::from("<div class=\"row\">\n");
    for i in 0..PREVIEWS_SHOWN {
        let preview = match next.get(i) {
            Some(e) => preview(&escape(&e.name), &escape(&month_day(e.date)), &escape_lines(&e.description), assets),
            None => preview(TBD_NAME, TBD_DATE, TBD_DESCRIPTION, assets),
        };
        out.push_str(&preview);
    }
    out.push_str("</div>\n");
    debug!(upcoming = next.len(), "rendered event previews");
    out
}

fn preview(name: &str, date: &str, description: &str, assets: &Assets) -> String {
    format!(
        r#"  <div class="col-md-4 px-4">
    <h2 class="text-center mt-3">{name}</h2>
    <p class="text-center fs-5">{date}</p>
    <p class="py-3">{description}</p>
    <a href="{page}" class="btn sase-blue text-white" tabindex="-1" role="button" aria-disabled="false">Learn more</a>
  </div>
"#,
        page = escape(&assets.calendar_page),
    )
}

/// Home-page carousel slides; the first one starts active.
pub fn carousel(slides: &[Slide], assets: &Assets) -> String {
    slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            format!(
                r#"<div class="carousel-item{active}">
  <img src="{src}" class="d-block w-100" alt="{alt}">
  <div class="carousel-caption d-none d-md-block">
    <div class="container-fluid bg-custom">
      <h5>{title}</h5>
    </div>
  </div>
</div>
"#,
                active = if i == 0 { " active" } else { "" },
                src = escape(&format!("{}/{}", assets.carousel_images, slide.image)),
                alt = escape(&slide.image_title),
                title = escape(&slide.title),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::load;
    use crate::table::parse_table;
    use scraper::{Html, Selector};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 15).unwrap()
    }

    fn texts(html: &str, selector: &str) -> Vec<String> {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse(selector).unwrap();
        doc.select(&sel)
            .map(|e| e.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[test]
    fn test_announcements_top_two_with_defaults() {
        let table = parse_table(
            "Name,Date,Description,Image,Link Button,Link\n\
             Old,01-09-2024,a,a.png,,\n\
             Newest,14-10-2024,b,b.png,Sign up,https://x.org\n\
             Scheduled,01-12-2024,c,c.png,,\n\
             Middle,01-10-2024,d,d.png,,\n",
        );
        let list = load::<Announcement>(&table).unwrap();
        let html = announcements(&list, today(), &Assets::default());

        assert_eq!(texts(&html, "h3"), vec!["Newest", "Middle"]);
        assert_eq!(
            texts(&html, "div.text-body-secondary"),
            vec!["October 14, 2024", "October 1, 2024"]
        );
        assert_eq!(texts(&html, "a.btn"), vec!["Sign up", "Learn More"]);
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("src=\"images/Announcements/b.png\""));
    }

    #[test]
    fn test_previews_padded() {
        let table = parse_table(
            "Name,Date,Kind,Time,Location,Description\n\
             Fall Social,11/01/2024,Social,6 PM,Union,Food\n\
             Past,10/01/2024,Social,6 PM,Union,Gone\n",
        );
        let events = load::<Event>(&table).unwrap();
        let html = event_previews(&events, today(), &Assets::default());

        assert_eq!(texts(&html, "h2"), vec!["Fall Social", "TBD", "TBD"]);
        assert_eq!(
            texts(&html, "p.fs-5"),
            vec!["November 1", TBD_DATE, TBD_DATE]
        );
        assert_eq!(html.matches(TBD_DESCRIPTION).count(), 2);
        assert_eq!(html.matches("href=\"pages/calender.html\"").count(), 3);
    }

    #[test]
    fn test_carousel_first_active() {
        let table = parse_table(
            "Image,Image Title,Title\n\
             one.jpg,First,Welcome\n\
             two.jpg,Second,\"Join \"\"SASE\"\"\"\n",
        );
        let slides = load::<Slide>(&table).unwrap();
        let html = carousel(&slides, &Assets::default());

        let doc = Html::parse_fragment(&html);
        let active = Selector::parse("div.carousel-item.active img").unwrap();
        let imgs: Vec<_> = doc.select(&active).collect();
        assert_eq!(imgs.len(), 1);
        assert_eq!(imgs[0].value().attr("src"), Some("images/Carousel/one.jpg"));
        assert_eq!(texts(&html, "h5"), vec!["Welcome", "Join \"SASE\""]);
    }

    #[test]
    fn test_empty_carousel() {
        assert_eq!(carousel(&[], &Assets::default()), "");
    }
}

// src/render/calendar.rs

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::links::CalendarLinks;
use super::{escape, escape_lines};
use crate::model::event::{upcoming, Event};
use crate::schema::date::{month_day, month_year};

const CLOCK_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" x="0px" y="0px" width="15" height="15" viewBox="0,15,256,256">
                  <g fill="#000000" fill-rule="nonzero" stroke="none" stroke-width="1" stroke-linecap="butt" stroke-linejoin="miter" stroke-miterlimit="10" stroke-dasharray="" stroke-dashoffset="0" font-family="none" font-weight="none" font-size="none" text-anchor="none" style="mix-blend-mode: normal"><g transform="scale(8.53333,8.53333)"><path d="M15,3c-6.627,0 -12,5.373 -12,12c0,6.627 5.373,12 12,12c6.627,0 12,-5.373 12,-12c0,-6.627 -5.373,-12 -12,-12zM16,16h-8.005c-0.55,0 -0.995,-0.445 -0.995,-0.995v-0.011c0,-0.549 0.445,-0.994 0.995,-0.994h6.005v-8.005c0,-0.55 0.445,-0.995 0.995,-0.995h0.011c0.549,0 0.994,0.445 0.994,0.995z"></path></g></g>
                </svg>"##;

const WHEN_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 30 512 512" class="small-icon"><path d="M256 0a256 256 0 1 1 0 512A256 256 0 1 1 256 0zM232 120V256c0 8 4 15.5 10.7 20l96 64c11 7.4 25.9 4.4 33.3-6.7s4.4-25.9-6.7-33.3L280 243.2V120c0-13.3-10.7-24-24-24s-24 10.7-24 24z"/></svg>"#;

const WHERE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 384 512" class="small-icon"><path d="M215.7 499.2C267 435 384 279.4 384 192C384 86 298 0 192 0S0 86 0 192c0 87.4 117 243 168.3 307.2c12.3 15.3 35.1 15.3 47.4 0zM192 128a64 64 0 1 1 0 128 64 64 0 1 1 0-128z"/></svg>"#;

/// Fragments for the calendar page's two containers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub cards: String,
    pub modals: String,
}

/// Cards and modals for every event after `today`, soonest first, with a
/// heading each time the month changes.
pub fn calendar(events: &[Event], today: NaiveDate) -> Calendar {
    let mut out = Calendar::default();
    let mut current_month: Option<String> = None;
    let shown = upcoming(events, today);

    for (i, event) in shown.iter().enumerate() {
        let num = i + 1;
        let month = month_year(event.date);
        if current_month.as_deref() != Some(month.as_str()) {
            out.cards.push_str(&format!(
                "<h4 class=\"text-white mx-2 month-heading\" style=\"font-weight: bold;\">{}</h4>\n\n",
                escape(&month)
            ));
            current_month = Some(month);
        }
        out.cards.push_str(&event_card(num, event));
        out.cards.push_str("\n\n");
        out.modals.push_str(&event_modal(num, event));
        out.modals.push_str("\n\n");
    }

    debug!(events = events.len(), upcoming = shown.len(), "rendered calendar");
    out
}

fn event_card(num: usize, event: &Event) -> String {
    format!(
        r##"        <div class="row rounded-3 bg-white my-4 py-3 px-2 align-middle">
            <div class="col-sm-8 rounded-3 align-middle">
              <p class="text-uppercase sase-blue-text">{kind}</p>
              <h5 style="font-weight: bold; margin-top: -13px;">{name}</h5>
              <button type="button" class="btn bg-body-tertiary rounded-pill" data-bs-toggle="modal" data-bs-target="#event{num}Modal" style="font-size: small;">
                {icon}   {date}
              </button>
            </div>
            <div class="col-sm-4 rounded-3 d-flex align-items-center justify-content-end">
              <button type="button" class="btn btn-primary text-uppercase" data-bs-toggle="modal" data-bs-target="#event{num}Modal">
                Get Details
              </button>
            </div>
        </div>"##,
        kind = escape(&event.kind),
        name = escape(&event.name),
        num = num,
        icon = CLOCK_ICON,
        date = escape(&month_day(event.date)),
    )
}

fn event_modal(num: usize, event: &Event) -> String {
    let display_date = month_day(event.date);
    format!(
        r#"    <div class="modal fade" id="event{num}Modal" tabindex="-1" aria-labelledby="event{num}ModalLabel" aria-hidden="true">
      <div class="modal-dialog">
        <div class="modal-content">
          <div class="modal-header">
            <div class="text-center w-100">
              <p class="text-uppercase sase-blue-text">{kind}</p>
              <h1 class="modal-title fs-4" id="event{num}ModalLabel" style="font-weight: bold; margin-top: -13px;">{name}</h1>
            </div>
            <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button>
          </div>
          <div class="modal-body">
            <p>{description}</p>
            <p class="text-uppercase">{when_icon}   When</p>
            <p class="event-descript">{date} @ {time}</p>
            <p class="text-uppercase">{where_icon}  Where</p>
            <p class="event-descript">{location}</p>
{links}          </div>
          <div class="modal-footer">
            <button type="button" class="btn btn-secondary" data-bs-dismiss="modal">Close</button>
          </div>
        </div>
      </div>
    </div>"#,
        num = num,
        kind = escape(&event.kind),
        name = escape(&event.name),
        description = escape_lines(&event.description),
        when_icon = WHEN_ICON,
        date = escape(&display_date),
        time = escape(&event.time),
        where_icon = WHERE_ICON,
        location = escape(&event.location),
        links = export_links(event),
    )
}

/// The "add to calendar" line, or nothing when the time text is unreadable.
fn export_links(event: &Event) -> String {
    let range = match event.time_range() {
        Ok(range) => range,
        Err(e) => {
            warn!(event = %event.name, error = %e, "no calendar links");
            return String::new();
        }
    };
    let links = CalendarLinks::new(event, range);
    format!(
        r#"            <p class="sase-blue-text">
                <a href="{google}" target="_blank">Add to Google Calendar</a>
                |
                <a href="{ics}" download="{ics_name}">Add to iCalendar</a>
                |
                <a href="{outlook}" target="_blank">Add to Outlook</a>
            </p>
"#,
        google = escape(links.google.as_str()),
        ics = escape(&links.ics),
        ics_name = escape(&links.ics_filename),
        outlook = escape(links.outlook.as_str()),
    )
}

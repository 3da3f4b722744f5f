use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ics::{
    components::Property,
    escape_text,
    properties::{Categories, Description, DtEnd, DtStart, Location, Status, Summary},
    ICalendar,
};

use crate::{
    structs::ShowtimeRecord,
    time::{to_calendar_tuple, DateTuple},
    Error, Result,
};

const CALENDAR_NAME: &str = "BJIFF";
const PRODUCT_ID: &str = concat!(
    "-//",
    env!("CARGO_PKG_NAME"),
    "//",
    env!("CARGO_PKG_VERSION"),
    "//EN"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyStatus {
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub title: String,
    pub description: String,
    pub start: DateTuple,
    pub end: DateTuple,
    pub categories: Vec<String>,
    pub status: EventStatus,
    pub busy_status: BusyStatus,
    pub location: String,
}

impl CalendarEvent {
    pub fn from_record(record: &ShowtimeRecord) -> Result<Self> {
        let uid = format!("{}@{}", screening_key(record), env!("CARGO_PKG_NAME"));

        Ok(Self {
            uid,
            title: record.listing.movie_name.clone(),
            description: format!("{} {}", record.cinema_name, record.hall_name),
            start: to_calendar_tuple(record.show_time)?,
            end: to_calendar_tuple(record.show_end_time)?,
            categories: vec![record.cinema_name.clone()],
            status: EventStatus::Confirmed,
            busy_status: BusyStatus::Busy,
            location: format!(
                "{} {}{}",
                record.cinema_name, record.city_name, record.cinema_address
            ),
        })
    }

    // Appends the occurrence to the local part of the uid.
    fn nth_occurrence(mut self, occurrence: usize) -> Self {
        if occurrence > 1 {
            if let Some((local, domain)) = self.uid.split_once('@') {
                self.uid = format!("{local}#{occurrence}@{domain}");
            }
        }
        self
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason| Error::InvalidEvent {
            uid: self.uid.clone(),
            reason,
        };

        if self.title.trim().is_empty() {
            return Err(invalid("title is empty"));
        }

        if self.end < self.start {
            return Err(invalid("ends before it starts"));
        }

        Ok(())
    }

    #[must_use]
    pub fn to_ics(&self, stamp: &str) -> ics::Event<'_> {
        let mut ics_event = ics::Event::new(self.uid.as_str(), stamp.to_owned());

        ics_event.push(Summary::new(escape_text(self.title.as_str())));
        ics_event.push(Description::new(escape_text(self.description.as_str())));
        ics_event.push(DtStart::new(self.start.to_string()));
        ics_event.push(DtEnd::new(self.end.to_string()));

        let categories = self
            .categories
            .iter()
            .map(|category| escape_text(category.as_str()))
            .collect::<Vec<_>>()
            .join(",");
        ics_event.push(Categories::new(categories));

        ics_event.push(match self.status {
            EventStatus::Confirmed => Status::confirmed(),
        });
        ics_event.push(Property::new(
            "X-MICROSOFT-CDO-BUSYSTATUS",
            match self.busy_status {
                BusyStatus::Busy => "BUSY",
            },
        ));
        ics_event.push(Location::new(escape_text(self.location.as_str())));

        ics_event
    }
}

fn screening_key(record: &ShowtimeRecord) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        record.listing.theatre_id,
        record.listing.movie_id,
        record.show_time,
        record.cinema_name,
        record.hall_name,
    )
    .replace(' ', "-")
}

/// Maps records to events in order. A screening seen more than once (the
/// catalog may list a movie twice) gets a numbered uid per repeat.
pub fn events_from_records(records: &[ShowtimeRecord]) -> Result<Vec<CalendarEvent>> {
    let mut seen = HashMap::new();

    records
        .iter()
        .map(|record| -> Result<CalendarEvent> {
            let occurrence = seen.entry(screening_key(record)).or_insert(0);
            *occurrence += 1;
            Ok(CalendarEvent::from_record(record)?.nth_occurrence(*occurrence))
        })
        .collect()
}

/// Validates every event and assembles them into one calendar. Nothing is
/// returned if any event is invalid.
pub fn build_calendar(events: &[CalendarEvent], stamp: DateTime<Utc>) -> Result<ICalendar<'_>> {
    for event in events {
        event.validate()?;
    }

    let stamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    let mut icalendar = ICalendar::new("2.0", PRODUCT_ID);
    icalendar.push(Property::new("X-WR-CALNAME", CALENDAR_NAME));

    for event in events {
        icalendar.add_event(event.to_ics(&stamp));
    }

    Ok(icalendar)
}

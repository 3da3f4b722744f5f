mod client;
mod error;
mod harvest;
mod ics;
mod output;
mod structs;
mod time;

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

pub use crate::ics::{
    build_calendar, events_from_records, BusyStatus, CalendarEvent, EventStatus,
};
pub use client::{flatten_catalog, Client, UPSTREAM};
pub use error::{Error, Result};
pub use harvest::{fetch_all_schedules, FetchFailure, Harvest};
pub use output::write_calendar;
pub use structs::{
    CatalogResponse, DailySchedule, MovieListing, RecommendationGroup, ScheduleResponse,
    ShowtimeRecord, SubLayer,
};
pub use time::{to_calendar_tuple, DateTuple};

pub const THEATRE_ID: &str = "97";
pub const CONCURRENCY: usize = 5;
pub const OUTPUT_DIR: &str = "./dist";
pub const OUTPUT_FILE: &str = "bjiff.ics";

#[derive(Debug, Clone)]
pub struct Config {
    pub upstream: String,
    pub theatre_id: String,
    pub concurrency: usize,
    pub output_dir: PathBuf,
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UPSTREAM.into(),
            theatre_id: THEATRE_ID.into(),
            concurrency: CONCURRENCY,
            output_dir: OUTPUT_DIR.into(),
            output_file: OUTPUT_FILE.into(),
        }
    }
}

#[derive(Debug)]
pub struct Summary {
    pub movies: usize,
    pub events: usize,
    pub failures: Vec<FetchFailure>,
    pub path: PathBuf,
}

/// Runs the whole pipeline once: catalog, schedules, calendar, file.
///
/// A failed schedule fetch only drops that movie. A failed catalog fetch,
/// an invalid event or a write error aborts the run, and in the first two
/// cases the output directory is left untouched.
pub async fn run(config: &Config) -> Result<Summary> {
    let client = Client::new(config.upstream.as_str())?;

    let movies = client.fetch_all_movies(&config.theatre_id).await?;
    info!(
        theatre_id = %config.theatre_id,
        movies = movies.len(),
        "Fetched catalog"
    );

    let Harvest {
        mut records,
        failures,
    } = fetch_all_schedules(&client, &movies, config.concurrency).await;

    records.sort_by_key(|record| (record.show_time, record.show_end_time));

    let events = events_from_records(&records)?;

    let calendar = build_calendar(&events, Utc::now())?.to_string();

    let path = write_calendar(&config.output_dir, &config.output_file, &calendar).await?;

    info!(
        path = %path.display(),
        events = events.len(),
        failed_fetches = failures.len(),
        "Wrote calendar"
    );

    Ok(Summary {
        movies: movies.len(),
        events: events.len(),
        failures,
        path,
    })
}

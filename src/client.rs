use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    structs::{CatalogResponse, DailySchedule, MovieListing, ScheduleResponse},
    Error, Result,
};

pub const UPSTREAM: &str = "https://mt-m.maoyan.com";
const CATALOG_PATH: &str = "/mtrade/film-festival/home/getTheatreMovieInfo";
const SCHEDULE_PATH: &str = "/mtrade/filmfestival/getMovieShowInfo";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the festival's catalog and schedule endpoints.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::Request {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_all_movies(&self, theatre_id: &str) -> Result<Vec<MovieListing>> {
        let catalog: CatalogResponse = self
            .get_json(CATALOG_PATH, &[("theatreId", theatre_id)])
            .await?;

        Ok(flatten_catalog(catalog))
    }

    pub async fn fetch_movie_schedules(
        &self,
        theatre_id: &str,
        movie_id: &str,
    ) -> Result<Vec<DailySchedule>> {
        let schedule: ScheduleResponse = self
            .get_json(
                SCHEDULE_PATH,
                &[("theatreId", theatre_id), ("movieId", movie_id)],
            )
            .await?;

        Ok(schedule.data)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?query, "Sending HTTP request");

        let request_error = |source| Error::Request {
            url: url.clone(),
            source,
        };

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url, status });
        }

        let body = response.text().await.map_err(request_error)?;

        serde_json::from_str(&body).map_err(|source| Error::Parse { url, source })
    }
}

/// Flattens recommendation groups and their sub-layers into one list of
/// movies, preserving source order.
pub fn flatten_catalog(catalog: CatalogResponse) -> Vec<MovieListing> {
    catalog
        .data
        .into_iter()
        .flat_map(|group| group.theatre_sub_layer_list)
        .flat_map(|layer| layer.theatre_movie_list)
        .collect()
}

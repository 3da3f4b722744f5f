use serde::{Deserialize, Deserializer};

/// One film offered at a theatre, as listed by the festival catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieListing {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub theatre_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub movie_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub movie_name: String,
}

/// A single screening of a film. Times are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimeRecord {
    #[serde(flatten)]
    pub listing: MovieListing,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cinema_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cinema_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hall_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub meeting_info: String,
    pub show_time: i64,
    pub show_end_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySchedule {
    #[serde(default, deserialize_with = "lenient_string")]
    pub show_date: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub show_list: Vec<ShowtimeRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub data: Vec<RecommendationGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationGroup {
    #[serde(default, deserialize_with = "lenient_list")]
    pub theatre_sub_layer_list: Vec<SubLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubLayer {
    #[serde(default, deserialize_with = "lenient_list")]
    pub theatre_movie_list: Vec<MovieListing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub data: Vec<DailySchedule>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

// The festival API is inconsistent about quoting identifiers.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) => s,
        Some(StringOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

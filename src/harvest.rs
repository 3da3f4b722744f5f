use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::{
    client::Client,
    structs::{MovieListing, ShowtimeRecord},
    Error,
};

/// Everything collected from the per-movie schedule fetches.
#[derive(Debug, Default)]
pub struct Harvest {
    pub records: Vec<ShowtimeRecord>,
    pub failures: Vec<FetchFailure>,
}

#[derive(Debug)]
pub struct FetchFailure {
    /// Position of the movie in the flattened catalog.
    pub index: usize,
    pub movie: MovieListing,
    pub error: Error,
}

/// Fetches the schedule of every movie with at most `concurrency` requests
/// in flight. Returns once every fetch has settled. Failed fetches are
/// recorded and contribute no records.
pub async fn fetch_all_schedules(
    client: &Client,
    movies: &[MovieListing],
    concurrency: usize,
) -> Harvest {
    let mut outcomes = stream::iter(movies.iter().enumerate())
        .map(|(index, movie)| async move {
            let outcome = client
                .fetch_movie_schedules(&movie.theatre_id, &movie.movie_id)
                .await;
            (index, outcome)
        })
        .buffer_unordered(concurrency.max(1));

    let mut harvest = Harvest::default();

    while let Some((index, outcome)) = outcomes.next().await {
        let movie = &movies[index];

        match outcome {
            Ok(days) => {
                let before = harvest.records.len();
                harvest
                    .records
                    .extend(days.into_iter().flat_map(|day| day.show_list));

                debug!(
                    movie_id = %movie.movie_id,
                    movie = %movie.movie_name,
                    shows = harvest.records.len() - before,
                    "Fetched schedule"
                );
            }
            Err(error) => {
                warn!(
                    movie_id = %movie.movie_id,
                    movie = %movie.movie_name,
                    error = %error,
                    "Skipping movie, schedule fetch failed"
                );

                harvest.failures.push(FetchFailure {
                    index,
                    movie: movie.clone(),
                    error,
                });
            }
        }
    }

    harvest
}

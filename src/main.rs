mod cli;

use std::env;

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use bjiff_ics::Config;

const LOG_ENV: &str = "BJIFF_LOG";

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(concat!(env!("CARGO_CRATE_NAME"), "=info")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let config = Config {
        output_dir: args.output_dir,
        concurrency: args.concurrency,
        ..Config::default()
    };

    let summary = bjiff_ics::run(&config)
        .await
        .context("Failed to build the festival calendar")?;

    for failure in &summary.failures {
        warn!(
            index = failure.index,
            movie = %failure.movie.movie_name,
            "Schedule missing from calendar"
        );
    }

    eprintln!(
        "Wrote {} events for {} movies to {}",
        summary.events,
        summary.movies,
        summary.path.display()
    );

    Ok(())
}

//! Query OMDb and print the mapped card or detail overlay as pretty JSON.
//! Usage:
//!   cargo run --bin omdb_props -- search <title>
//!   cargo run --bin omdb_props -- detail <imdb_id>
//! Requires OMDB_API_KEY in the environment (.env supported).

use anyhow::{Context, Result};
use chrono::Utc;
use cineguide::config::Config;
use cineguide::omdb::{OmdbApi, OmdbClient};
use cineguide::view::{self, MovieCard};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Search,
    Detail,
}

impl FromStr for Mode {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "search" => Ok(Mode::Search),
            "detail" => Ok(Mode::Detail),
            _ => Err(anyhow::anyhow!("mode must be 'search' or 'detail'")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let mut args = env::args().skip(1);
    let mode: Mode = args
        .next()
        .context("Usage: omdb_props <search|detail> <title|imdb_id>")?
        .parse()?;
    let target = args.collect::<Vec<_>>().join(" ");
    if target.trim().is_empty() {
        anyhow::bail!("Missing title or imdb id");
    }

    let config = Config::from_env()?;
    let client = OmdbClient::from_config(&config)?;

    // Errors are surfaced here instead of degrading to empty output.
    let json = match mode {
        Mode::Search => {
            let results = client.search_titles(&target).await?;
            let cards: Vec<MovieCard> = results.iter().map(MovieCard::from).collect();
            serde_json::to_string_pretty(&cards)?
        }
        Mode::Detail => {
            let detail = client
                .fetch_detail(&target)
                .await?
                .with_context(|| format!("OMDb has no record for {target}"))?;
            let overlay = view::detail_view(&detail, Utc::now())
                .with_context(|| format!("OMDb has no record for {target}"))?;
            serde_json::to_string_pretty(&overlay)?
        }
    };
    println!("{json}");
    Ok(())
}

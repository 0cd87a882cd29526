use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{MovieDetail, MovieSummary};

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[async_trait]
pub trait OmdbApi: Send + Sync {
    /// Title search (`s=`). An OMDb "not found" answer is an empty list.
    async fn search_titles(&self, title: &str) -> Result<Vec<MovieSummary>>;
    /// Full record for one IMDb id (`i=`, `plot=full`). `None` when OMDb reports no match.
    async fn fetch_detail(&self, imdb_id: &str) -> Result<Option<MovieDetail>>;
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let user_agent = format!("cineguide/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .user_agent(user_agent)
            .build()
            .context("Failed to build OMDb HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    fn search_url(&self, title: &str) -> String {
        format!(
            "{}/?apikey={}&s={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(title)
        )
    }

    fn detail_url(&self, imdb_id: &str) -> String {
        format!(
            "{}/?apikey={}&i={}&plot=full",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(imdb_id)
        )
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("request failed")?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("reading body failed")?;
        // The api key is part of the url, so errors never carry it.
        if !status.is_success() {
            return Err(anyhow!("OMDb returned {} -> {}", status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl OmdbApi for OmdbClient {
    async fn search_titles(&self, title: &str) -> Result<Vec<MovieSummary>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(rename = "Search", default)]
            search: Option<Vec<MovieSummary>>,
            #[serde(rename = "Error", default)]
            error: Option<String>,
        }

        let data: SearchResponse = self.get_json(&self.search_url(title)).await?;
        if let Some(reason) = data.error.as_deref() {
            debug!("OMDb search for '{}' returned no results: {}", title, reason);
        }
        Ok(data.search.unwrap_or_default())
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<Option<MovieDetail>> {
        let detail: MovieDetail = self.get_json(&self.detail_url(imdb_id)).await?;
        if !detail.is_found() {
            debug!("OMDb has no record for '{}'", imdb_id);
            return Ok(None);
        }
        Ok(Some(detail))
    }
}

/// Title search that degrades to an empty list.
///
/// Blank titles never reach the network.
pub async fn search_or_empty(api: &dyn OmdbApi, title: &str) -> Vec<MovieSummary> {
    let title = title.trim();
    if title.is_empty() {
        return Vec::new();
    }
    match api.search_titles(title).await {
        Ok(results) => results,
        Err(e) => {
            warn!("Error fetching movies for '{}': {:#}", title, e);
            Vec::new()
        }
    }
}

/// Detail lookup that degrades to `None` on not-found and on any failure.
pub async fn detail_or_none(api: &dyn OmdbApi, imdb_id: &str) -> Option<MovieDetail> {
    let imdb_id = imdb_id.trim();
    if imdb_id.is_empty() {
        return None;
    }
    match api.fetch_detail(imdb_id).await {
        Ok(detail) => detail,
        Err(e) => {
            warn!("Error fetching movie details for '{}': {:#}", imdb_id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FailingApi {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl OmdbApi for FailingApi {
        async fn search_titles(&self, _title: &str) -> Result<Vec<MovieSummary>> {
            *self.calls.lock().unwrap() += 1;
            Err(anyhow!("connection reset"))
        }
        async fn fetch_detail(&self, _imdb_id: &str) -> Result<Option<MovieDetail>> {
            *self.calls.lock().unwrap() += 1;
            Err(anyhow!("JSON parse failed"))
        }
    }

    #[test]
    fn urls_encode_query_and_request_full_plot() {
        let client = OmdbClient::new("https://www.omdbapi.com", "abc").unwrap();
        assert_eq!(
            client.search_url("Star Wars & more"),
            "https://www.omdbapi.com/?apikey=abc&s=Star%20Wars%20%26%20more"
        );
        assert_eq!(
            client.detail_url("tt0076759"),
            "https://www.omdbapi.com/?apikey=abc&i=tt0076759&plot=full"
        );
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_api_key() {
        let client = OmdbClient::new("http://127.0.0.1:1", "SECRETKEY123").unwrap();
        let err = client
            .search_titles("Alien")
            .await
            .expect_err("nothing listens on port 1");
        let rendered = format!("{:#}", err);
        assert!(rendered.starts_with("request failed"), "{rendered}");
        assert!(!rendered.contains("SECRETKEY123"), "{rendered}");

        let err = client
            .fetch_detail("tt0078748")
            .await
            .expect_err("nothing listens on port 1");
        assert!(!format!("{:#}", err).contains("SECRETKEY123"));
    }

    #[tokio::test]
    async fn failures_degrade_to_empty() {
        let api = FailingApi {
            calls: Mutex::new(0),
        };
        assert!(search_or_empty(&api, "Alien").await.is_empty());
        assert!(detail_or_none(&api, "tt0078748").await.is_none());
        assert_eq!(*api.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn blank_input_skips_the_request() {
        let api = FailingApi {
            calls: Mutex::new(0),
        };
        assert!(search_or_empty(&api, "   ").await.is_empty());
        assert!(detail_or_none(&api, "").await.is_none());
        assert_eq!(*api.calls.lock().unwrap(), 0);
    }
}

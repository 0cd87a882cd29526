//! Render-ready shapes handed to the browser front end.
//!
//! Sentinel values are resolved here so the front end never sees `"N/A"`.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::links;
use crate::models::{present, MediaType, MovieDetail, MovieSummary};
use crate::release::{self, ReleaseStatus};
use crate::streaming::{self, StreamingEstimate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub imdb_id: String,
    pub title: String,
    pub poster: String,
    pub year: Option<String>,
    pub media_type: Option<MediaType>,
}

impl From<&MovieSummary> for MovieCard {
    fn from(summary: &MovieSummary) -> Self {
        Self {
            imdb_id: summary.imdb_id.clone(),
            title: summary.title.clone(),
            poster: links::poster_or(summary.poster.as_deref(), links::CARD_POSTER_PLACEHOLDER),
            year: owned(summary.year.as_deref()),
            media_type: summary.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseLine {
    pub caption: &'static str,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Links {
    pub imdb: String,
    pub trailer: String,
    pub streaming_search: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub imdb_id: String,
    pub title: String,
    pub backdrop: String,
    pub rating: Option<String>,
    pub year: Option<String>,
    pub runtime: Option<String>,
    pub rated: Option<String>,
    pub status: Option<ReleaseStatus>,
    pub release: Option<ReleaseLine>,
    pub plot: Option<String>,
    pub streaming: StreamingEstimate,
    pub links: Links,
    pub box_office: Option<String>,
    pub dvd: Option<String>,
    pub facts: Vec<Fact>,
}

/// Builds the detail overlay for `detail` as seen at `now`.
///
/// Returns `None` for a not-found record; the release classifier and the
/// streaming estimator only run on a found one.
pub fn detail_view(detail: &MovieDetail, now: DateTime<Utc>) -> Option<DetailView> {
    if !detail.is_found() {
        return None;
    }

    let status = release::classify(
        detail.released.as_deref(),
        detail.media_type.as_deref(),
        now,
    );
    let release = owned(detail.released.as_deref()).map(|date| ReleaseLine {
        caption: release::release_caption(status.as_ref()),
        date,
    });
    let streaming = streaming::estimate(&detail.title, detail.year.as_deref());

    let facts = [
        ("Genre", &detail.genre),
        ("Director", &detail.director),
        ("Cast", &detail.actors),
        ("Writer", &detail.writer),
        ("Language", &detail.language),
        ("Country", &detail.country),
        ("Awards", &detail.awards),
    ]
    .into_iter()
    .filter_map(|(label, value)| owned(value.as_deref()).map(|value| Fact { label, value }))
    .collect();

    Some(DetailView {
        imdb_id: detail.imdb_id.clone(),
        title: detail.title.clone(),
        backdrop: links::poster_or(detail.poster.as_deref(), links::BACKDROP_PLACEHOLDER),
        rating: owned(detail.imdb_rating.as_deref()),
        year: owned(detail.year.as_deref()),
        runtime: owned(detail.runtime.as_deref()),
        rated: owned(detail.rated.as_deref()),
        status,
        release,
        plot: owned(detail.plot.as_deref()),
        streaming,
        links: Links {
            imdb: links::imdb_url(&detail.imdb_id),
            trailer: links::trailer_search_url(&detail.title),
            streaming_search: links::justwatch_url(&detail.title),
        },
        box_office: owned(detail.box_office.as_deref()),
        dvd: owned(detail.dvd.as_deref()),
        facts,
    })
}

/// Heading above the result grid.
pub fn results_heading(query: Option<&str>) -> String {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => format!("Results for \"{q}\""),
        None => "Popular Movies".to_string(),
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    present(value).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::ReleaseTag;
    use chrono::TimeZone;
    use serde_json::json;

    fn detail(value: serde_json::Value) -> MovieDetail {
        serde_json::from_value(value).expect("detail deserialize")
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn builds_full_detail_overlay() {
        let d = detail(json!({
            "imdbID": "tt9999001",
            "Title": "Night Train",
            "Year": "2024",
            "Type": "movie",
            "Released": "05 Oct 2024",
            "Runtime": "101 min",
            "Rated": "R",
            "Genre": "Thriller",
            "Director": "A. Person",
            "Actors": "N/A",
            "Poster": "N/A",
            "imdbRating": "6.8",
            "BoxOffice": "N/A",
            "Response": "True"
        }));
        let view = detail_view(&d, now()).expect("found detail renders");
        assert_eq!(view.status.as_ref().map(|s| s.tag), Some(ReleaseTag::Theater));
        assert_eq!(
            view.release,
            Some(ReleaseLine {
                caption: "In Theaters Since:",
                date: "05 Oct 2024".to_string()
            })
        );
        assert_eq!(view.backdrop, links::BACKDROP_PLACEHOLDER);
        assert_eq!(view.streaming.platforms[0].name, "Netflix");
        assert!(view.box_office.is_none());
        let labels: Vec<_> = view.facts.iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Genre", "Director"]);
        assert_eq!(view.links.imdb, "https://www.imdb.com/title/tt9999001");
    }

    #[test]
    fn series_render_without_badge() {
        let d = detail(json!({
            "imdbID": "tt0944947",
            "Title": "Game of Thrones",
            "Year": "2011–2019",
            "Type": "series",
            "Released": "17 Apr 2011",
            "Response": "True"
        }));
        let view = detail_view(&d, now()).unwrap();
        assert!(view.status.is_none());
        assert_eq!(view.release.map(|r| r.caption), Some("Released:"));
        assert_eq!(view.streaming.platforms.len(), 2);
    }

    #[test]
    fn not_found_detail_renders_nothing() {
        let d = detail(json!({"Response": "False", "Error": "Incorrect IMDb ID."}));
        assert!(detail_view(&d, now()).is_none());
    }

    #[test]
    fn cards_hide_sentinels() {
        let summary = MovieSummary {
            imdb_id: "tt1".to_string(),
            title: "Untitled".to_string(),
            year: Some("N/A".to_string()),
            poster: Some("N/A".to_string()),
            media_type: Some("movie".to_string()),
        };
        let card = MovieCard::from(&summary);
        assert_eq!(card.poster, links::CARD_POSTER_PLACEHOLDER);
        assert!(card.year.is_none());
        assert_eq!(card.media_type, Some(MediaType::Movie));
    }

    #[test]
    fn card_media_type_serializes_as_enum() {
        let mut summary = MovieSummary {
            imdb_id: "tt0944947".to_string(),
            title: "Game of Thrones".to_string(),
            year: Some("2011–2019".to_string()),
            poster: None,
            media_type: Some("series".to_string()),
        };
        let card = MovieCard::from(&summary);
        assert_eq!(card.media_type, Some(MediaType::Series));
        assert_eq!(serde_json::to_value(&card).unwrap()["media_type"], "series");

        summary.media_type = Some("N/A".to_string());
        assert_eq!(MovieCard::from(&summary).media_type, None);
    }

    #[test]
    fn heading_depends_on_query() {
        assert_eq!(results_heading(Some("Alien")), "Results for \"Alien\"");
        assert_eq!(results_heading(Some(" ")), "Popular Movies");
        assert_eq!(results_heading(None), "Popular Movies");
    }
}

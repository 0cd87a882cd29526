use serde::{Deserialize, Serialize};

/// OMDb's marker for a field it has no value for.
pub const NOT_AVAILABLE: &str = "N/A";

/// Treats the OMDb sentinel and empty strings as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
}

impl MediaType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "movie" => Some(MediaType::Movie),
            "series" => Some(MediaType::Series),
            "episode" => Some(MediaType::Episode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }
}

/// One entry of an OMDb title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
}

impl MovieSummary {
    pub fn kind(&self) -> Option<MediaType> {
        present(self.media_type.as_deref()).and_then(MediaType::parse)
    }
}

/// Full OMDb record for a single identifier (`plot=full`).
///
/// Every optional field may carry the `"N/A"` sentinel; read them through
/// [`present`] before using them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Awards", default)]
    pub awards: Option<String>,
    #[serde(rename = "BoxOffice", default)]
    pub box_office: Option<String>,
    #[serde(rename = "DVD", default)]
    pub dvd: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
}

impl MovieDetail {
    /// `false` when OMDb answered with `"Response": "False"`.
    pub fn is_found(&self) -> bool {
        self.response.as_deref() != Some("False")
    }
}

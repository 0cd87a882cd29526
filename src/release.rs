//! Release-timing badge for movie detail records.
//!
//! Elapsed time is measured in fixed 30-day months. This drifts from calendar
//! months by a day or two around the thresholds and is accepted as-is.
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::models::{present, MediaType};

const SECS_PER_MONTH: f64 = 60.0 * 60.0 * 24.0 * 30.0;
const THEATER_MONTHS: f64 = 2.0;
const RECENT_MONTHS: f64 = 4.0;

/// Formats OMDb and friends use for `Released`. `%b` also accepts full month names.
const DATE_FORMATS: [&str; 3] = ["%d %b %Y", "%Y-%m-%d", "%b %d, %Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseTag {
    Upcoming,
    Theater,
    Recent,
    Released,
}

impl ReleaseTag {
    pub fn label(&self) -> &'static str {
        match self {
            ReleaseTag::Upcoming => "Coming Soon",
            ReleaseTag::Theater => "In Theaters",
            ReleaseTag::Recent => "Recently Released",
            ReleaseTag::Released => "Released",
        }
    }

    pub fn style_class(&self) -> &'static str {
        match self {
            ReleaseTag::Upcoming => "status-upcoming",
            ReleaseTag::Theater => "status-theater",
            ReleaseTag::Recent => "status-recent",
            ReleaseTag::Released => "status-released",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseStatus {
    #[serde(rename = "status")]
    pub tag: ReleaseTag,
    pub label: &'static str,
    #[serde(rename = "class")]
    pub style_class: &'static str,
}

impl From<ReleaseTag> for ReleaseStatus {
    fn from(tag: ReleaseTag) -> Self {
        Self {
            tag,
            label: tag.label(),
            style_class: tag.style_class(),
        }
    }
}

/// Classifies a release date relative to `now`.
///
/// Only `"movie"` records get a status; series and episodes always yield `None`,
/// as do missing or unparseable dates.
pub fn classify(
    released: Option<&str>,
    media_type: Option<&str>,
    now: DateTime<Utc>,
) -> Option<ReleaseStatus> {
    let released = present(released)?;
    if present(media_type).and_then(MediaType::parse) != Some(MediaType::Movie) {
        return None;
    }
    let release_at = parse_release_instant(released)?;

    let tag = if release_at > now {
        ReleaseTag::Upcoming
    } else {
        let months = (now - release_at).num_seconds() as f64 / SECS_PER_MONTH;
        if months < THEATER_MONTHS {
            ReleaseTag::Theater
        } else if months < RECENT_MONTHS {
            ReleaseTag::Recent
        } else {
            ReleaseTag::Released
        }
    };
    Some(tag.into())
}

/// Caption shown in front of the release date.
pub fn release_caption(status: Option<&ReleaseStatus>) -> &'static str {
    match status.map(|s| s.tag) {
        Some(ReleaseTag::Upcoming) => "Releases:",
        Some(ReleaseTag::Theater) => "In Theaters Since:",
        _ => "Released:",
    }
}

/// Midnight UTC of the release day.
pub fn parse_release_instant(input: &str) -> Option<DateTime<Utc>> {
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input.trim(), fmt).ok())?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

//! Placeholder "where to watch" data.
//!
//! Nothing here comes from a real availability provider. The platform list is
//! picked from the release year alone and must be shown with [`DISCLAIMER`].
use serde::Serialize;

pub const DISCLAIMER: &str =
    "Availability shown is estimated. Click below for accurate streaming info.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformAvailability {
    pub name: &'static str,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamingEstimate {
    /// Display order.
    pub platforms: Vec<PlatformAvailability>,
    pub simulated: bool,
    pub note: &'static str,
}

const RECENT: [(&str, bool); 3] = [("Netflix", true), ("Prime Video", false), ("Disney+", false)];
const MIDDLE: [(&str, bool); 3] = [("Netflix", false), ("Prime Video", true), ("Hulu", false)];
const OLDER: [(&str, bool); 2] = [("Prime Video", true), ("HBO Max", false)];

/// Guesses platform availability from `year`.
///
/// `title` is not consulted. A missing or unparseable year lands in the
/// oldest bracket.
pub fn estimate(_title: &str, year: Option<&str>) -> StreamingEstimate {
    let bracket: &[(&'static str, bool)] = match year.and_then(leading_year) {
        Some(y) if y >= 2020.0 => &RECENT,
        Some(y) if y >= 2015.0 => &MIDDLE,
        _ => &OLDER,
    };
    StreamingEstimate {
        platforms: bracket
            .iter()
            .map(|&(name, available)| PlatformAvailability { name, available })
            .collect(),
        simulated: true,
        note: DISCLAIMER,
    }
}

/// Integer prefix of `raw`, so ranges like `2011–2019` read as their start year.
///
/// Read as `f64` so arbitrarily long digit runs stay ordered instead of failing.
fn leading_year(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<f64>().ok().map(|n| sign * n)
}

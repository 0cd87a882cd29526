//! Outbound links and image fallbacks shown next to a title.
use crate::models::present;

pub const CARD_POSTER_PLACEHOLDER: &str =
    "https://via.placeholder.com/400x600/141414/666666?text=No+Poster";
pub const BACKDROP_PLACEHOLDER: &str =
    "https://via.placeholder.com/1920x1080/141414/666666?text=No+Image";

pub fn imdb_url(imdb_id: &str) -> String {
    format!("https://www.imdb.com/title/{imdb_id}")
}

pub fn trailer_search_url(title: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(&format!("{title} official trailer"))
    )
}

pub fn justwatch_url(title: &str) -> String {
    format!(
        "https://www.justwatch.com/us/search?q={}",
        urlencoding::encode(title)
    )
}

pub fn poster_or(poster: Option<&str>, placeholder: &str) -> String {
    present(poster).unwrap_or(placeholder).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_search_links() {
        assert_eq!(imdb_url("tt0848228"), "https://www.imdb.com/title/tt0848228");
        assert_eq!(
            trailer_search_url("The Avengers"),
            "https://www.youtube.com/results?search_query=The%20Avengers%20official%20trailer"
        );
        assert_eq!(
            justwatch_url("Amélie"),
            "https://www.justwatch.com/us/search?q=Am%C3%A9lie"
        );
    }

    #[test]
    fn missing_posters_use_placeholder() {
        assert_eq!(
            poster_or(Some("N/A"), CARD_POSTER_PLACEHOLDER),
            CARD_POSTER_PLACEHOLDER
        );
        assert_eq!(
            poster_or(Some("https://m.media-amazon.com/x.jpg"), BACKDROP_PLACEHOLDER),
            "https://m.media-amazon.com/x.jpg"
        );
    }
}

use anyhow::{anyhow, Context, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";
pub const DEFAULT_PORT: u16 = 3146;
pub const DEFAULT_INITIAL_QUERY: &str = "Avengers";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub port: u16,
    /// Search shown before the user has typed anything.
    pub initial_query: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OMDB_API_KEY").ok_or_else(|| anyhow!("OMDB_API_KEY must be set"))?;
        let base_url = get("OMDB_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let port = match get("CINEGUIDE_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("CINEGUIDE_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };
        let initial_query =
            get("CINEGUIDE_INITIAL_QUERY").unwrap_or_else(|| DEFAULT_INITIAL_QUERY.to_string());

        Ok(Self {
            api_key,
            base_url,
            port,
            initial_query,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn requires_api_key() {
        assert!(config(&[]).is_err());
        assert!(config(&[("OMDB_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn fills_defaults() {
        let cfg = config(&[("OMDB_API_KEY", "k")]).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.initial_query, "Avengers");
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("OMDB_API_KEY", "k"),
            ("OMDB_BASE_URL", "http://localhost:9000/"),
            ("CINEGUIDE_PORT", "8080"),
            ("CINEGUIDE_INITIAL_QUERY", "Alien"),
        ])
        .unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.initial_query, "Alien");
    }

    #[test]
    fn rejects_bad_port() {
        assert!(config(&[("OMDB_API_KEY", "k"), ("CINEGUIDE_PORT", "http")]).is_err());
    }
}

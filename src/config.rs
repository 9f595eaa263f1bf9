use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// TMDB v3 API key. Without one, genre lookups are always empty.
    pub tmdb_api_key: Option<String>,
    pub tmdb_api_base: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let tmdb_api_key = lookup("TMDB_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let tmdb_api_base = lookup("TMDB_API_BASE")
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        if !tmdb_api_base.starts_with("http://") && !tmdb_api_base.starts_with("https://") {
            anyhow::bail!("TMDB_API_BASE must be an http(s) URL, got {}", tmdb_api_base);
        }

        let timeout_secs = lookup("TMDB_TIMEOUT_SECS")
            .and_then(|t| t.parse::<u64>().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            port,
            tmdb_api_key,
            tmdb_api_base,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config pointing at a custom upstream, mainly for tests.
    pub fn with_upstream(api_base: impl Into<String>, api_key: Option<&str>) -> Self {
        Self {
            port: DEFAULT_PORT,
            tmdb_api_key: api_key.map(str::to_string),
            tmdb_api_base: api_base.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

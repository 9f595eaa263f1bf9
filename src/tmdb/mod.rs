//! TMDB (The Movie Database) v3 API client.
//!
//! Authenticates with the `api_key` query parameter on every request.

pub mod genres;

use std::collections::BTreeMap;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::TmdbError;
use crate::query::UpstreamQuery;

use self::genres::GenreTable;

const GENRE_LIST_PATH: &str = "/genre/movie/list";

/// TMDB API client. Cheap to clone.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            api_base: config.tmdb_api_base.clone(),
            api_key: config.tmdb_api_key.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &BTreeMap<&'static str, String>,
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.api_base, path);

        let mut req = self.client.get(&url);
        if let Some(ref key) = self.api_key {
            req = req.query(&[("api_key", key.as_str())]);
        }

        // Errors drop the URL so the api_key never ends up in logs.
        let res = req
            .query(params)
            .send()
            .await
            .map_err(|e| TmdbError::Request {
                endpoint: path.to_string(),
                source: e.without_url(),
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(TmdbError::Status {
                endpoint: path.to_string(),
                status,
                body,
            });
        }

        res.json().await.map_err(|e| TmdbError::Decode {
            endpoint: path.to_string(),
            source: e.without_url(),
        })
    }

    /// Fetch the full movie genre list.
    pub async fn fetch_genres(&self) -> Result<GenreTable, TmdbError> {
        let body: GenreListResponse = self.get_json(GENRE_LIST_PATH, &BTreeMap::new()).await?;
        Ok(body.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    /// Fetch one page of a movie listing.
    pub async fn fetch_page(&self, query: &UpstreamQuery) -> Result<MoviePage, TmdbError> {
        debug!(endpoint = query.endpoint.path(), params = ?query.params, "querying TMDB");
        self.get_json(query.endpoint.path(), &query.params).await
    }

    /// Fetch a listing page, answering with an empty page on any failure.
    pub async fn fetch_movies(&self, query: &UpstreamQuery) -> RecommendationResponse {
        match self.fetch_page(query).await {
            Ok(page) => RecommendationResponse {
                movies: page.results.unwrap_or_default(),
                total_pages: page.total_pages.unwrap_or(1),
                current_page: query.page,
            },
            Err(e) => {
                warn!(error = %e, "movie listing failed, returning empty page");
                RecommendationResponse::empty(query.page)
            }
        }
    }
}

#[derive(Deserialize)]
struct GenreListResponse {
    genres: Vec<Genre>,
}

#[derive(Deserialize)]
struct Genre {
    id: u64,
    name: String,
}

/// A page of `/discover/movie` or `/movie/now_playing` results.
///
/// Movie records are kept as raw JSON and forwarded untouched.
#[derive(Debug, Deserialize)]
pub struct MoviePage {
    pub results: Option<Vec<Value>>,
    pub total_pages: Option<u64>,
}

/// Body of a `/recommend` answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub movies: Vec<Value>,
    pub total_pages: u64,
    pub current_page: u32,
}

impl RecommendationResponse {
    pub fn empty(page: u32) -> Self {
        Self {
            movies: Vec::new(),
            total_pages: 1,
            current_page: page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_response_shape() {
        let body = serde_json::to_value(RecommendationResponse::empty(3)).unwrap();
        assert_eq!(body, json!({ "movies": [], "total_pages": 1, "current_page": 3 }));
    }

    #[test]
    fn movie_page_tolerates_missing_fields() {
        let page: MoviePage = serde_json::from_value(json!({ "page": 1 })).unwrap();
        assert!(page.results.is_none());
        assert!(page.total_pages.is_none());

        let page: MoviePage = serde_json::from_value(json!({
            "results": [{ "id": 550, "title": "Fight Club", "vote_average": 8.4 }],
            "total_pages": 12,
        }))
        .unwrap();
        assert_eq!(page.total_pages, Some(12));
        assert_eq!(page.results.unwrap()[0]["title"], "Fight Club");
    }
}

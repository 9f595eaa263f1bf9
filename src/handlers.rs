//! HTTP handlers for the mood-based movie picker.

use axum::{
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::moods::{self, ANY};
use crate::query::{RecommendationRequest, UpstreamQuery};
use crate::tmdb::genres::{GenreCache, GenreTable};
use crate::tmdb::{RecommendationResponse, TmdbClient};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub tmdb: TmdbClient,
    pub genres: GenreCache,
}

impl AppState {
    pub fn new(tmdb: TmdbClient) -> Self {
        Self {
            genres: GenreCache::new(tmdb.clone()),
            tmdb,
        }
    }
}

/// Choices for the genre and mood pickers, each led by "Any".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsResponse {
    pub genres: Vec<String>,
    pub moods: Vec<String>,
}

impl OptionsResponse {
    pub fn from_genres(table: &GenreTable) -> Self {
        let genres = std::iter::once(ANY.to_string())
            .chain(table.names_sorted())
            .collect();
        let moods = std::iter::once(ANY)
            .chain(moods::mood_labels())
            .map(String::from)
            .collect();
        Self { genres, moods }
    }
}

/// GET /health - Health check.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET / - Genre and mood options.
pub async fn options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let genres = state.genres.get_all().await;
    Json(OptionsResponse::from_genres(&genres))
}

/// POST /recommend - One page of movies for a mood/genre selection.
///
/// Never fails: a body that is not JSON counts as an empty selection, and
/// upstream trouble yields an empty page.
pub async fn recommend(State(state): State<AppState>, body: Bytes) -> Json<RecommendationResponse> {
    let body: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!(error = %e, "unreadable recommend body, using defaults");
        Value::Null
    });
    let req = RecommendationRequest::from_json(&body);

    let query = UpstreamQuery::resolve(&req, &state.genres).await;
    Json(state.tmdb.fetch_movies(&query).await)
}

/// POST /genres/refresh - Drop and reload the cached genre list.
pub async fn refresh_genres(State(state): State<AppState>) -> impl IntoResponse {
    state.genres.invalidate().await;
    let genres = state.genres.get_all().await;
    Json(json!({ "genres": genres.len() }))
}

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(options))
        .route("/recommend", post(recommend))
        .route("/health", get(health))
        .route("/genres/refresh", post(refresh_genres))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_lead_with_any() {
        let table: GenreTable = [(18, "Drama".to_string()), (28, "Action".to_string())]
            .into_iter()
            .collect();
        let options = OptionsResponse::from_genres(&table);
        assert_eq!(options.genres, vec!["Any", "Action", "Drama"]);
        assert_eq!(options.moods.first().map(String::as_str), Some("Any"));
        assert_eq!(options.moods.len(), 7);
    }

    #[test]
    fn options_without_genres() {
        let options = OptionsResponse::from_genres(&GenreTable::default());
        assert_eq!(options.genres, vec!["Any"]);
        assert_eq!(
            options.moods,
            vec!["Any", "Happy", "Sad", "Romantic", "Excited", "Scared", "Thoughtful"]
        );
    }
}

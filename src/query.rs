//! Turns a mood/genre/sort/page selection into a TMDB listing query.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::debug;

use crate::moods::{self, ANY};
use crate::tmdb::genres::{GenreCache, GenreTable};

pub const DEFAULT_SORT: &str = "popularity.desc";

/// Quality floor applied whenever a genre filter was asked for.
const MIN_VOTE_COUNT: u32 = 100;

/// TMDB listing endpoints a recommendation can be served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/discover/movie`, accepts sorting and genre filters.
    Discover,
    /// `/movie/now_playing`, used when nothing was filtered. Takes no `sort_by`.
    NowPlaying,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Discover => "/discover/movie",
            Endpoint::NowPlaying => "/movie/now_playing",
        }
    }
}

/// A submitted recommendation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub genre: String,
    pub mood: String,
    pub sort_by: String,
    pub page: u32,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            genre: ANY.to_string(),
            mood: ANY.to_string(),
            sort_by: DEFAULT_SORT.to_string(),
            page: 1,
        }
    }
}

impl RecommendationRequest {
    /// Reads a request body, defaulting every missing or unusable field.
    pub fn from_json(body: &Value) -> Self {
        let defaults = Self::default();
        Self {
            genre: string_field(body, "genre").unwrap_or(defaults.genre),
            mood: string_field(body, "mood").unwrap_or(defaults.mood),
            sort_by: string_field(body, "sort_by").unwrap_or(defaults.sort_by),
            page: page_field(body).unwrap_or(defaults.page),
        }
    }

    /// Genre names selected directly or implied by the mood.
    pub fn requested_genres(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        if self.genre != ANY {
            names.insert(self.genre.clone());
        }
        if self.mood != ANY {
            names.extend(moods::genres_for_mood(&self.mood).into_iter().map(String::from));
        }
        names
    }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn page_field(body: &Value) -> Option<u32> {
    let page = match body.get("page")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(page).ok().filter(|p| *p >= 1)
}

/// Endpoint plus query parameters for one upstream call.
///
/// The API key is not part of `params`; the client adds it on send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub endpoint: Endpoint,
    pub page: u32,
    pub params: BTreeMap<&'static str, String>,
}

impl UpstreamQuery {
    /// Builds the query, loading genres only when a filter needs them.
    pub async fn resolve(req: &RecommendationRequest, genres: &GenreCache) -> Self {
        if req.requested_genres().is_empty() {
            build_query(req, &GenreTable::default())
        } else {
            let table = genres.get_all().await;
            build_query(req, &table)
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Assembles endpoint and parameters for a request against a genre table.
pub fn build_query(req: &RecommendationRequest, genres: &GenreTable) -> UpstreamQuery {
    let mut params = BTreeMap::new();
    params.insert("page", req.page.to_string());
    params.insert("sort_by", req.sort_by.clone());

    let wanted = req.requested_genres();
    if wanted.is_empty() {
        params.remove("sort_by");
        return UpstreamQuery {
            endpoint: Endpoint::NowPlaying,
            page: req.page,
            params,
        };
    }

    params.insert("vote_count.gte", MIN_VOTE_COUNT.to_string());

    let lookup = genres.id_lookup();
    let ids: BTreeSet<u64> = wanted
        .iter()
        .filter_map(|name| lookup.get(name.as_str()).copied())
        .collect();

    if ids.is_empty() {
        // Falls through to an unfiltered discover query.
        debug!(?wanted, "no requested genre matched a known TMDB genre");
    } else {
        let joined = ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",");
        params.insert("with_genres", joined);
    }

    UpstreamQuery {
        endpoint: Endpoint::Discover,
        page: req.page,
        params,
    }
}

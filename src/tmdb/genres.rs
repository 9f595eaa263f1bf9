//! TMDB genre table, fetched once and shared across requests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::TmdbClient;

/// Genre id to name, exactly as TMDB reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreTable {
    by_id: BTreeMap<u64, String>,
}

impl GenreTable {
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All genre names in byte-wise lexicographic order.
    pub fn names_sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_id.values().cloned().collect();
        names.sort();
        names
    }

    /// Reverse name to id lookup.
    pub fn id_lookup(&self) -> HashMap<&str, u64> {
        self.by_id
            .iter()
            .map(|(id, name)| (name.as_str(), *id))
            .collect()
    }
}

impl FromIterator<(u64, String)> for GenreTable {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        Self {
            by_id: iter.into_iter().collect(),
        }
    }
}

/// Lazily populated genre table.
///
/// The first caller fetches from TMDB while holding the write lock, so
/// concurrent first requests wait for that single fetch. Failures are cached
/// as an empty table until [`GenreCache::invalidate`] is called.
#[derive(Clone)]
pub struct GenreCache {
    client: TmdbClient,
    table: Arc<RwLock<Option<Arc<GenreTable>>>>,
}

impl GenreCache {
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            table: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the genre table, fetching it on first use.
    pub async fn get_all(&self) -> Arc<GenreTable> {
        {
            let guard = self.table.read().await;
            if let Some(ref table) = *guard {
                return table.clone();
            }
        }

        let mut guard = self.table.write().await;
        if let Some(ref table) = *guard {
            return table.clone();
        }
        let table = Arc::new(self.load().await);
        *guard = Some(table.clone());
        table
    }

    /// Forget the cached table; the next [`get_all`](Self::get_all) refetches.
    pub async fn invalidate(&self) {
        *self.table.write().await = None;
    }

    async fn load(&self) -> GenreTable {
        if !self.client.has_api_key() {
            warn!("no TMDB API key configured, genre list unavailable");
            return GenreTable::default();
        }

        match self.client.fetch_genres().await {
            Ok(table) => {
                info!(count = table.len(), "loaded TMDB genres");
                table
            }
            Err(e) => {
                warn!(error = %e, "genre lookup failed, continuing without genres");
                GenreTable::default()
            }
        }
    }
}

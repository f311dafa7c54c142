// SPDX-License-Identifier: AGPL-3.0
// Happy Tails Core - Favorites coordinator
//
// The favorite set is an ordered, duplicate-free list of dog ids,
// mirrored in memory and persisted as a JSON array under one storage
// key. Every mutation persists before returning, so memory and storage
// only diverge if the process dies mid-write; reload() recovers.

use crate::api::ApiClient;
use crate::storage::{KvStore, FAVORITES_KEY};
use crate::types::{AppError, Dog};
use std::sync::{Arc, RwLock};

/// Owns the in-memory favorite set and keeps it synchronized with the
/// local store. Single-writer: only this process mutates the key.
pub struct FavoritesCoordinator {
    ids: RwLock<Vec<String>>,
    store: KvStore,
    client: Arc<ApiClient>,
}

impl FavoritesCoordinator {
    /// Create a coordinator, loading the persisted set from the store.
    /// A missing key yields an empty set; a corrupt one is logged and
    /// also yields an empty set.
    pub fn new(store: KvStore, client: Arc<ApiClient>) -> Result<Self, AppError> {
        let ids = match store.get(FAVORITES_KEY)? {
            Some(content) => match serde_json::from_str::<Vec<String>>(&content) {
                Ok(ids) => dedup_preserving_order(ids),
                Err(e) => {
                    tracing::warn!("Failed to parse favorites, starting empty: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            ids: RwLock::new(ids),
            store,
            client,
        })
    }

    /// Persist the full set as a JSON array
    fn persist(&self) -> Result<(), AppError> {
        let ids = self.ids.read().unwrap();
        let content = serde_json::to_string(&*ids)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize favorites: {}", e)))?;
        self.store.set(FAVORITES_KEY, &content)
    }

    /// Current favorite ids, in insertion order
    pub fn ids(&self) -> Vec<String> {
        self.ids.read().unwrap().clone()
    }

    /// Whether the given dog is currently favorited
    pub fn contains(&self, id: &str) -> bool {
        self.ids.read().unwrap().iter().any(|i| i == id)
    }

    pub fn count(&self) -> usize {
        self.ids.read().unwrap().len()
    }

    /// Flip membership for `id` and persist. Returns the new
    /// membership state (true = now favorited).
    pub fn toggle(&self, id: &str) -> Result<bool, AppError> {
        let now_favorited = {
            let mut ids = self.ids.write().unwrap();
            if let Some(pos) = ids.iter().position(|i| i == id) {
                ids.remove(pos);
                false
            } else {
                ids.push(id.to_string());
                true
            }
        };

        self.persist()?;
        Ok(now_favorited)
    }

    /// Remove `id` from the set and persist. Removing an absent id is
    /// a no-op.
    pub fn remove(&self, id: &str) -> Result<(), AppError> {
        {
            let mut ids = self.ids.write().unwrap();
            ids.retain(|i| i != id);
        }

        self.persist()
    }

    /// Clear the set and remove the persisted key
    pub fn clear(&self) -> Result<(), AppError> {
        {
            let mut ids = self.ids.write().unwrap();
            ids.clear();
        }

        self.store.remove(FAVORITES_KEY)
    }

    /// Re-read the persisted set, replacing the in-memory mirror.
    /// Idempotent; recovers from a crash during a previous persist.
    pub fn reload(&self) -> Result<Vec<String>, AppError> {
        let loaded = match self.store.get(FAVORITES_KEY)? {
            Some(content) => match serde_json::from_str::<Vec<String>>(&content) {
                Ok(ids) => dedup_preserving_order(ids),
                Err(e) => {
                    tracing::warn!("Failed to parse favorites on reload: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut ids = self.ids.write().unwrap();
        *ids = loaded;
        Ok(ids.clone())
    }

    /// Resolve the current favorite set to full records for the
    /// favorites review screen. An empty set skips the network call.
    pub async fn favorite_dogs(&self) -> Result<Vec<Dog>, AppError> {
        let ids = self.ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.client.fetch_dogs(&ids).await
    }

    /// Ask the server to pick a match among the current favorites and
    /// resolve it to a full record.
    pub async fn find_match(&self) -> Result<Dog, AppError> {
        let ids = self.ids();
        if ids.is_empty() {
            return Err(AppError::Fetch(
                "Cannot match with no favorites selected".to_string(),
            ));
        }

        let matched = self.client.match_dogs(&ids).await?;
        let dogs = self.client.fetch_dogs(&[matched.match_id.clone()]).await?;

        dogs.into_iter()
            .find(|d| d.id == matched.match_id)
            .ok_or_else(|| {
                AppError::Fetch(format!("Matched dog {} not found", matched.match_id))
            })
    }
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

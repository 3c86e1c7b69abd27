//! Favorites store and the dog records derived from it.
//!
//! [`FavoritesStore`] owns the [`FavoriteSet`] and keeps it in durable
//! storage under [`FAVORITES_KEY`] as a JSON array of id strings. Every
//! mutation rewrites the whole entry before the in-memory set changes, so
//! memory and storage never disagree after a call returns.
//!
//! [`FavoriteDogs`] is the favorites panel: full records for the current set,
//! resolved through the [`AdoptionApi`]. Each mutation bumps the store's
//! revision and resolutions for an older revision are dropped.

use dogmatch_core::{Dog, DogId, FavoriteSet};
use tracing::{debug, error, instrument, warn};

use crate::api::{AdoptionApi, ApiError, arrange_by_ids};
use crate::outcome::Outcome;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized favorite ids.
pub const FAVORITES_KEY: &str = "favorites";

/// The favorited dog ids, backed by durable storage.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    favorites: FavoriteSet,
    revision: u64,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load the persisted favorites.
    ///
    /// A missing entry means no favorites. An unreadable or unparsable entry
    /// is logged and also treated as no favorites; the user is not told.
    pub fn hydrate(storage: S) -> Self {
        let favorites = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unparsable favorites entry");
                FavoriteSet::new()
            }),
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                warn!(error = %e, "Could not read favorites, starting empty");
                FavoriteSet::new()
            }
        };

        debug!(count = favorites.len(), "Favorites hydrated");

        Self {
            storage,
            favorites,
            revision: 0,
        }
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Favorite ids in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[DogId] {
        self.favorites.ids()
    }

    #[must_use]
    pub fn contains(&self, id: &DogId) -> bool {
        self.favorites.contains(id)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Counter bumped on every mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Current ids tagged with the current revision.
    #[must_use]
    pub fn snapshot(&self) -> FavoritesSnapshot {
        FavoritesSnapshot {
            revision: self.revision,
            favorites: self.favorites.clone(),
        }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add `id` if absent, remove it if present, then persist the whole set.
    ///
    /// Returns `true` if `id` is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns error if the set cannot be persisted; the in-memory set is
    /// left unchanged in that case.
    #[instrument(skip(self), fields(id = %id))]
    pub fn toggle(&mut self, id: DogId) -> Result<bool, StorageError> {
        let next = self.favorites.toggled(id.clone());
        let raw = serde_json::to_string(&next)?;
        self.storage.set(FAVORITES_KEY, &raw)?;

        self.favorites = next;
        self.revision += 1;

        let added = self.favorites.contains(&id);
        debug!(added, count = self.favorites.len(), "Favorite toggled");
        Ok(added)
    }

    /// Empty the set and delete the storage entry, as on a fresh install.
    ///
    /// # Errors
    ///
    /// Returns error if the entry cannot be removed; the in-memory set is
    /// left unchanged in that case.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(FAVORITES_KEY)?;

        self.favorites = FavoriteSet::new();
        self.revision += 1;

        debug!("Favorites cleared");
        Ok(())
    }
}

/// A favorite set as of one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesSnapshot {
    pub revision: u64,
    pub favorites: FavoriteSet,
}

impl FavoritesSnapshot {
    /// Full records for the snapshot's ids, in favorites order.
    ///
    /// An empty snapshot resolves to nothing without calling the service.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged.
    pub async fn resolve<A: AdoptionApi>(&self, api: &A) -> Result<Vec<Dog>, ApiError> {
        if self.favorites.is_empty() {
            return Ok(Vec::new());
        }

        let ids = self.favorites.ids();
        let dogs = api.fetch_dogs(ids).await?;
        Ok(arrange_by_ids(ids, dogs))
    }
}

/// Full records for the favorites, as last resolved.
#[derive(Debug, Clone, Default)]
pub struct FavoriteDogs {
    /// Revision the records were resolved for; `None` before the first refresh.
    revision: Option<u64>,
    dogs: Vec<Dog>,
}

impl FavoriteDogs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    /// Whether the records match the store's current revision.
    #[must_use]
    pub fn is_current<S: KeyValueStore>(&self, store: &FavoritesStore<S>) -> bool {
        self.revision == Some(store.revision())
    }

    /// Install records resolved for `snapshot`, unless the store has moved on.
    ///
    /// Returns `false` if the records were discarded as stale.
    pub fn apply<S: KeyValueStore>(
        &mut self,
        store: &FavoritesStore<S>,
        snapshot: &FavoritesSnapshot,
        dogs: Vec<Dog>,
    ) -> bool {
        if snapshot.revision != store.revision() {
            debug!(
                resolved = snapshot.revision,
                current = store.revision(),
                "Discarding stale favorites resolution"
            );
            return false;
        }

        self.revision = Some(snapshot.revision);
        self.dogs = dogs;
        true
    }

    /// Resolve the store's current set and install the records.
    ///
    /// On failure the error is logged and the previous records stay.
    pub async fn refresh<A: AdoptionApi, S: KeyValueStore>(
        &mut self,
        api: &A,
        store: &FavoritesStore<S>,
    ) -> Outcome {
        let snapshot = store.snapshot();

        match snapshot.resolve(api).await {
            Ok(dogs) => {
                if self.apply(store, &snapshot, dogs) {
                    Outcome::Applied
                } else {
                    Outcome::Superseded
                }
            }
            Err(e) => {
                error!(error = %e, "Error fetching favorite dog details");
                Outcome::Failed
            }
        }
    }
}

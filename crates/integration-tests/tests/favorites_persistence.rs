//! Integration tests for favorites persisted through `FileStore`.
//!
//! Each test gets its own temporary data directory, so a "restart" is a new
//! `FavoritesStore` hydrated from the same directory.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::fs;

use dogmatch_client::{FAVORITES_KEY, FavoritesStore, FileStore, KeyValueStore, MemoryStore};
use dogmatch_core::{DogId, FavoriteSet};
use proptest::prelude::*;

fn id(raw: &str) -> DogId {
    DogId::new(raw)
}

fn ids(set: &FavoriteSet) -> Vec<&str> {
    set.iter().map(DogId::as_str).collect()
}

#[test]
fn test_toggle_scenario_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FavoritesStore::hydrate(FileStore::new(dir.path()));
    store.toggle(id("3")).unwrap();
    store.toggle(id("7")).unwrap();

    store.toggle(id("3")).unwrap();
    assert_eq!(ids(store.favorites()), ["7"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("favorites.json")).unwrap(),
        r#"["7"]"#
    );

    store.toggle(id("3")).unwrap();
    assert_eq!(ids(store.favorites()), ["7", "3"]);
    let occurrences = store.favorites().iter().filter(|fav| fav.as_str() == "3").count();
    assert_eq!(occurrences, 1);
}

#[test]
fn test_favorites_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = FavoritesStore::hydrate(FileStore::new(dir.path()));
        store.toggle(id("a")).unwrap();
        store.toggle(id("b")).unwrap();
    }

    let reopened = FavoritesStore::hydrate(FileStore::new(dir.path()));
    assert_eq!(ids(reopened.favorites()), ["a", "b"]);
}

#[test]
fn test_clear_matches_fresh_install() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FavoritesStore::hydrate(FileStore::new(dir.path()));
    store.toggle(id("a")).unwrap();

    store.clear().unwrap();

    assert!(store.is_empty());
    assert_eq!(store.storage().get(FAVORITES_KEY).unwrap(), None);

    let fresh_dir = tempfile::tempdir().unwrap();
    let fresh = FavoritesStore::hydrate(FileStore::new(fresh_dir.path()));
    let reopened = FavoritesStore::hydrate(FileStore::new(dir.path()));
    assert_eq!(reopened.favorites(), fresh.favorites());
}

#[test]
fn test_corrupt_file_hydrates_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("favorites.json"), "{not json").unwrap();

    let mut store = FavoritesStore::hydrate(FileStore::new(dir.path()));
    assert!(store.is_empty());

    // The next toggle overwrites the bad entry
    store.toggle(id("a")).unwrap();
    let raw = store.storage().get(FAVORITES_KEY).unwrap().unwrap();
    let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, ["a"]);
}

#[test]
fn test_duplicate_ids_on_disk_are_collapsed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("favorites.json"), r#"["a","b","a"]"#).unwrap();

    let store = FavoritesStore::hydrate(FileStore::new(dir.path()));
    assert_eq!(ids(store.favorites()), ["a", "b"]);
}

// ============================================================================
// Toggle sequences
// ============================================================================

fn arb_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("1".to_string()),
        Just("2".to_string()),
        Just("3".to_string()),
        Just("4".to_string()),
        "[a-z0-9]{1,6}",
    ]
}

proptest! {
    #[test]
    fn toggles_match_set_model(sequence in prop::collection::vec(arb_id(), 0..40)) {
        let mut store = FavoritesStore::hydrate(MemoryStore::new());
        let mut model = BTreeSet::new();

        for raw in &sequence {
            store.toggle(DogId::new(raw.as_str())).unwrap();
            if !model.remove(raw) {
                model.insert(raw.clone());
            }
        }

        let held: BTreeSet<String> = store.favorites().iter().map(ToString::to_string).collect();
        prop_assert_eq!(&held, &model);
        prop_assert_eq!(store.len(), model.len());

        let restored = match store.storage().get(FAVORITES_KEY).unwrap() {
            Some(raw) => serde_json::from_str::<FavoriteSet>(&raw).unwrap(),
            None => FavoriteSet::new(),
        };
        prop_assert_eq!(&restored, store.favorites());
    }

    #[test]
    fn file_store_matches_memory_store(sequence in prop::collection::vec(arb_id(), 0..20)) {
        let dir = tempfile::tempdir().unwrap();
        let mut on_disk = FavoritesStore::hydrate(FileStore::new(dir.path()));
        let mut in_memory = FavoritesStore::hydrate(MemoryStore::new());

        for raw in &sequence {
            let a = on_disk.toggle(DogId::new(raw.as_str())).unwrap();
            let b = in_memory.toggle(DogId::new(raw.as_str())).unwrap();
            prop_assert_eq!(a, b);
        }

        let reopened = FavoritesStore::hydrate(FileStore::new(dir.path()));
        prop_assert_eq!(reopened.favorites(), in_memory.favorites());
    }
}

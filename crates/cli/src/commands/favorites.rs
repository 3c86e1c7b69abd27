//! Offline favorites commands.
//!
//! These read and reset the persisted set directly, without a session.

use std::io::Write;

use dogmatch_client::{FavoritesStore, KeyValueStore};

/// Print every favorite id, one per line, in insertion order.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list<S: KeyValueStore>(
    storage: S,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FavoritesStore::hydrate(storage);

    if store.is_empty() {
        writeln!(out, "No favorites yet.")?;
        return Ok(());
    }

    for id in store.ids() {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

/// Delete the persisted set.
///
/// # Errors
///
/// Returns an error if the storage entry cannot be removed.
pub fn clear<S: KeyValueStore>(
    storage: S,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FavoritesStore::hydrate(storage);
    let removed = store.len();

    store.clear()?;
    tracing::info!(removed, "Favorites cleared");
    writeln!(out, "Cleared {removed} favorite(s).")?;
    Ok(())
}

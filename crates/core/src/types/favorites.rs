//! The user's set of favorited dog ids.

use serde::{Deserialize, Serialize};

use super::id::DogId;

/// Insertion-ordered set of favorited dog ids.
///
/// Each id appears at most once. Serializes as a plain JSON array of id
/// strings (`["7","3"]`), which is the persisted format. Duplicates in
/// deserialized input are dropped, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<DogId>", into = "Vec<DogId>")]
pub struct FavoriteSet {
    ids: Vec<DogId>,
}

impl FavoriteSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    #[must_use]
    pub fn contains(&self, id: &DogId) -> bool {
        self.ids.contains(id)
    }

    /// Remove `id` if present, otherwise append it.
    ///
    /// Returns `true` if the id is a favorite after the call.
    pub fn toggle(&mut self, id: DogId) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| *existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Copy of the set with `id` toggled.
    #[must_use]
    pub fn toggled(&self, id: DogId) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[DogId] {
        &self.ids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DogId> {
        self.ids.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<DogId>> for FavoriteSet {
    fn from(ids: Vec<DogId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }
}

impl From<FavoriteSet> for Vec<DogId> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

impl FromIterator<DogId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = DogId>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a DogId;
    type IntoIter = std::slice::Iter<'a, DogId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn set(ids: &[&str]) -> FavoriteSet {
        ids.iter().map(|id| DogId::new(*id)).collect()
    }

    #[test]
    fn test_toggle_removes_then_appends() {
        let mut favorites = set(&["3", "7"]);

        assert!(!favorites.toggle(DogId::new("3")));
        assert_eq!(favorites, set(&["7"]));
        assert_eq!(serde_json::to_string(&favorites).unwrap(), r#"["7"]"#);

        assert!(favorites.toggle(DogId::new("3")));
        assert_eq!(favorites, set(&["7", "3"]));
        assert_eq!(
            favorites
                .iter()
                .filter(|id| id.as_str() == "3")
                .count(),
            1
        );
    }

    #[test]
    fn test_toggled_leaves_original_untouched() {
        let favorites = set(&["1"]);
        let next = favorites.toggled(DogId::new("2"));
        assert_eq!(favorites, set(&["1"]));
        assert_eq!(next, set(&["1", "2"]));
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let favorites: FavoriteSet = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(favorites, set(&["a", "b"]));
    }

    #[test]
    fn test_empty_serializes_as_empty_array() {
        assert_eq!(serde_json::to_string(&FavoriteSet::new()).unwrap(), "[]");
    }

    proptest! {
        #[test]
        fn prop_toggle_sequence_matches_set_model(
            toggles in prop::collection::vec("[a-e]", 0..40)
        ) {
            let mut favorites = FavoriteSet::new();
            let mut model = BTreeSet::new();

            for raw in &toggles {
                let id = DogId::new(raw.as_str());
                favorites.toggle(id.clone());
                if !model.remove(&id) {
                    model.insert(id);
                }
            }

            let members: BTreeSet<DogId> = favorites.iter().cloned().collect();
            prop_assert_eq!(&members, &model);
            prop_assert_eq!(favorites.len(), model.len());

            let json = serde_json::to_string(&favorites).unwrap();
            let restored: FavoriteSet = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(restored, favorites);
        }
    }
}

use std::collections::HashSet;

use crate::store::{self, FAVORITES_KEY, Store, StoreError};

/// Set of favorite track ids.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: HashSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn Store) -> Self {
        let ids: Vec<String> = store::load_or_default(store, FAVORITES_KEY);
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Stored as a JSON array, sorted so repeated saves are byte-stable.
    pub fn save(&self, store: &mut dyn Store) -> Result<(), StoreError> {
        let mut ids: Vec<&String> = self.ids.iter().collect();
        ids.sort();
        store::save(store, FAVORITES_KEY, &ids)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership of `id` and return the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

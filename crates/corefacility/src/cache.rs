use crate::Record;

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// Raw list results kept for the lifetime of a [`Client`](crate::Client).
///
/// Used for reference data that rarely changes, such as access levels. Keys
/// combine the entity type name with the search parameters.
#[derive(Debug, Default)]
pub struct Cache {
    entries: Mutex<HashMap<String, Vec<Record>>>,
}

impl Cache {
    pub fn get(&self, key: &str) -> Option<Vec<Record>> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, records: Vec<Record>) {
        self.lock().insert(key.into(), records);
    }

    /// Drops one entry. Returns `true` if it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Record>>> {
        // Entries are only ever replaced whole, so poisoning is ignored
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ring::placement::ReplicaRole;

/// A single versioned value held by a replica.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub value: String,
    /// Harness tick at which this replica wrote the entry.
    pub timestamp: u64,
    /// How this node saw its position for the key at write time. Advisory:
    /// it may lag reality after churn until stabilization catches up.
    pub role: ReplicaRole,
}

impl Entry {
    pub fn new(value: impl Into<String>, timestamp: u64, role: ReplicaRole) -> Self {
        Self {
            value: value.into(),
            timestamp,
            role,
        }
    }
}

/// The local keyspace. Single-threaded by design: the owning node applies
/// every operation to completion before touching the next message.
#[derive(Debug, Default)]
pub struct LocalStore {
    entries: HashMap<String, Entry>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh key. Fails if the key already exists.
    pub fn create(&mut self, key: &str, entry: Entry) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), entry);
        true
    }

    pub fn read(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Overwrites an existing key. Fails if the key is absent.
    pub fn update(&mut self, key: &str, entry: Entry) -> bool {
        match self.entries.get_mut(key) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => false,
        }
    }

    /// Removes a key. Fails if the key is absent.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }
}

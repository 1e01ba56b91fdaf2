//! The authoritative flat arrangement of grid keys.
//!
//! [`KeyOrder`] pairs the ordered key sequence (`index -> key`) with its
//! inverse (`key -> index`). The inverse is rebuilt whenever a sequence is
//! constructed, so the two views can never drift apart. Orders are immutable:
//! every transform produces a fresh value.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::key::GridKey;

/// Errors while building a [`KeyOrder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrderError {
    DuplicateKey { key: GridKey, first: usize, second: usize },
}

impl fmt::Display for KeyOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key, first, second } => {
                write!(f, "key {key} appears at both index {first} and index {second}")
            }
        }
    }
}

impl std::error::Error for KeyOrderError {}

/// Ordered key sequence with its key index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<GridKey>", into = "Vec<GridKey>")]
pub struct KeyOrder {
    keys: Vec<GridKey>,
    index: FxHashMap<GridKey, usize>,
}

impl KeyOrder {
    /// Build an order from a key sequence, rejecting duplicate keys.
    pub fn new(keys: Vec<GridKey>) -> Result<Self, KeyOrderError> {
        let mut index = FxHashMap::with_capacity_and_hasher(keys.len(), Default::default());
        for (position, key) in keys.iter().enumerate() {
            if let Some(first) = index.insert(*key, position) {
                return Err(KeyOrderError::DuplicateKey {
                    key: *key,
                    first,
                    second: position,
                });
            }
        }
        Ok(Self { keys, index })
    }

    /// Build an order from keys that are unique by construction, such as a
    /// permutation of an existing order.
    pub(crate) fn from_unique(keys: Vec<GridKey>) -> Self {
        let index = keys
            .iter()
            .enumerate()
            .map(|(position, key)| (*key, position))
            .collect();
        Self { keys, index }
    }

    #[must_use]
    pub fn keys(&self) -> &[GridKey] {
        &self.keys
    }

    #[must_use]
    pub fn into_keys(self) -> Vec<GridKey> {
        self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<GridKey> {
        self.keys.get(index).copied()
    }

    /// Index of `key` (the `keyToIndex` view).
    #[must_use]
    pub fn index_of(&self, key: &GridKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    #[must_use]
    pub fn contains(&self, key: &GridKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, GridKey)> + '_ {
        self.keys.iter().copied().enumerate()
    }

    /// Return a new order with the entries at `a` and `b` exchanged.
    ///
    /// Returns `None` when either index is out of range.
    #[must_use]
    pub fn with_swapped(&self, a: usize, b: usize) -> Option<Self> {
        if a >= self.keys.len() || b >= self.keys.len() {
            return None;
        }
        let mut keys = self.keys.clone();
        keys.swap(a, b);
        let mut index = self.index.clone();
        index.insert(keys[a], a);
        index.insert(keys[b], b);
        Some(Self { keys, index })
    }

    /// Return a new order that is a rearrangement of this one.
    ///
    /// `keys` must hold exactly the keys of `self`; anything else is rejected.
    pub fn permuted(&self, keys: Vec<GridKey>) -> Option<Self> {
        if keys.len() != self.keys.len() || !keys.iter().all(|key| self.contains(key)) {
            return None;
        }
        let order = Self::from_unique(keys);
        (order.index.len() == order.keys.len()).then_some(order)
    }
}

impl PartialEq for KeyOrder {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl Eq for KeyOrder {}

impl TryFrom<Vec<GridKey>> for KeyOrder {
    type Error = KeyOrderError;

    fn try_from(keys: Vec<GridKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<KeyOrder> for Vec<GridKey> {
    fn from(order: KeyOrder) -> Self {
        order.keys
    }
}

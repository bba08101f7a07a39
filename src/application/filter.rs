//! Leaf filter selections: single active value per key.

use std::collections::BTreeMap;

/// Active filter selections, independent of the drill path.
///
/// Backed by a BTreeMap so iteration (and therefore share-URL
/// serialization) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    entries: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a filter. If `key` already holds `value`, the key is removed
    /// (toggle off) and `None` is returned; otherwise the value is set,
    /// replacing any prior value for that key, and `Some(value)` is returned.
    /// At most one active value per key.
    pub fn toggle(&mut self, key: &str, value: &str) -> Option<String> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            self.entries.remove(key);
            None
        } else {
            self.entries.insert(key.to_string(), value.to_string());
            Some(value.to_string())
        }
    }

    /// Remove `key` unconditionally, regardless of current value.
    pub fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Remove all selections.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }
}

impl FromIterator<(String, String)> for FilterState {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

//! Optional cache for derived attributes.
//!
//! The engine is stateless, so hosts that query the critical damage
//! attribute often can keep results here and invalidate them whenever a
//! battler's equipment, states or stats change.

use std::collections::HashMap;
use std::hash::Hash;

/// Per-battler cache of a derived value.
///
/// # Examples
///
/// ```rust
/// use critstat::AttributeCache;
///
/// let mut cache = AttributeCache::new();
/// assert_eq!(cache.get_or_compute(1u32, || 3.0), 3.0);
/// assert_eq!(cache.get_or_compute(1u32, || 9.0), 3.0); // cached
///
/// cache.invalidate(&1);
/// assert_eq!(cache.get_or_compute(1u32, || 9.0), 9.0);
/// ```
#[derive(Debug, Clone)]
pub struct AttributeCache<K> {
    entries: HashMap<K, f64>,
}

impl<K: Hash + Eq> AttributeCache<K> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Return the cached value for `key`, computing and storing it if absent.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> f64) -> f64 {
        *self.entries.entry(key).or_insert_with(compute)
    }

    /// Get the cached value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Drop the cached value of one battler.
    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }

    /// Drop every cached value.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Number of cached values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Hash + Eq> Default for AttributeCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

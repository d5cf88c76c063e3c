//! Bounded memo table for row layouts.

use super::layout::LayoutResult;
use crate::model::RowId;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Capacity used when the configured capacity is zero.
pub const DEFAULT_LAYOUT_CACHE_CAPACITY: usize = 1000;

/// Key for layout lookups.
///
/// Includes everything that affects a layout: row identity, content fingerprint and the exact
/// available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    /// Row identity.
    pub row: RowId,
    /// Content fingerprint of the descriptor.
    pub fingerprint: u64,
    /// `max_width.to_bits()`.
    pub width_bits: u64,
}

impl LayoutKey {
    /// Build a key for `row` at `max_width`.
    pub fn new(row: RowId, fingerprint: u64, max_width: f64) -> Self {
        Self {
            row,
            fingerprint,
            width_bits: max_width.to_bits(),
        }
    }
}

/// LRU cache of computed layouts.
#[derive(Debug)]
pub struct LayoutCache {
    cache: LruCache<LayoutKey, LayoutResult>,
}

impl LayoutCache {
    /// Cache holding at most `capacity` layouts. Zero selects the default capacity.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or_else(|| NonZeroUsize::new(DEFAULT_LAYOUT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Cached layout, marking it most recently used.
    pub fn get(&mut self, key: &LayoutKey) -> Option<LayoutResult> {
        self.cache.get(key).copied()
    }

    /// Store a layout, evicting the least recently used one at capacity.
    pub fn put(&mut self, key: LayoutKey, layout: LayoutResult) {
        self.cache.put(key, layout);
    }

    /// Drop every cached layout.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Maximum number of cached layouts.
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_CACHE_CAPACITY)
    }
}

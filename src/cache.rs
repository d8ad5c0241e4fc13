//! Most-recently-used cache for symbolic name resolution.
//!
//! Each entry records the exact input scheme set a name was resolved under
//! together with the winning named-color entry. An entry only answers a
//! lookup made under the *same* scheme set: a superset may contain a
//! higher-priority scheme that resolves the name to a different value.

use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::dataset::{Dataset, ValueRef};
use crate::scheme::SchemeSet;

/// Default number of cached resolutions per session.
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Bounded LRU map from (scheme set, name entry) to the resolved value.
pub struct NameCache {
    entries: LruCache<(SchemeSet, usize), ValueRef>,
    stats: CacheStats,
}

impl fmt::Debug for NameCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

impl NameCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Number of occupied entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit and miss counters since creation.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Look up `name` resolved under exactly `schemes`.
    ///
    /// Entries are scanned most-recent first; a hit becomes most recent.
    pub fn lookup(&mut self, dataset: &Dataset, schemes: SchemeSet, name: &str) -> Option<ValueRef> {
        let found = self
            .entries
            .iter()
            .find(|((set, entry), _)| *set == schemes && dataset.name_str(*entry) == name)
            .map(|(key, value)| (*key, *value));

        match found {
            Some((key, value)) => {
                self.entries.promote(&key);
                self.stats.hits += 1;
                log::trace!("name cache hit: {name}");
                Some(value)
            }
            None => {
                self.stats.misses += 1;
                log::trace!("name cache miss: {name}");
                None
            }
        }
    }

    /// Record a resolution, evicting the least recently used entry if full.
    pub fn insert(&mut self, schemes: SchemeSet, entry: usize, value: ValueRef) {
        let key = (schemes, entry);
        if let Some((evicted, _)) = self.entries.push(key, value)
            && evicted != key
        {
            log::trace!("name cache evicted entry {}", evicted.1);
        }
    }
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetBuilder;
    use crate::space::Rgba;

    fn dataset() -> Dataset {
        DatasetBuilder::new()
            .named_scheme("a", "c0")
            .named_scheme("b", "c0")
            .colors(
                "a",
                &[
                    ("c0", Rgba::opaque(0, 0, 0)),
                    ("c1", Rgba::opaque(1, 0, 0)),
                    ("c2", Rgba::opaque(2, 0, 0)),
                    ("c3", Rgba::opaque(3, 0, 0)),
                ],
            )
            .color("b", "c0", Rgba::opaque(0, 0, 0))
            .build()
            .unwrap()
    }

    fn entry(ds: &Dataset, name: &str) -> (usize, ValueRef) {
        let (index, e) = ds.name_run(name).next().unwrap();
        (index, ValueRef::Named(e.value()))
    }

    #[test]
    fn test_exact_scheme_match_required() {
        let ds = dataset();
        let a = SchemeSet::single(0);
        let ab = a | SchemeSet::single(1);
        let mut cache = NameCache::new(4);
        let (index, value) = entry(&ds, "c1");
        cache.insert(a, index, value);

        assert_eq!(cache.lookup(&ds, a, "c1"), Some(value));
        assert_eq!(cache.lookup(&ds, ab, "c1"), None);
        assert_eq!(cache.lookup(&ds, a, "c2"), None);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2 });
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let ds = dataset();
        let a = SchemeSet::single(0);
        let mut cache = NameCache::new(2);
        for name in ["c0", "c1"] {
            let (index, value) = entry(&ds, name);
            cache.insert(a, index, value);
        }
        // Touch c0 so c1 becomes the eviction candidate.
        assert!(cache.lookup(&ds, a, "c0").is_some());
        let (index, value) = entry(&ds, "c2");
        cache.insert(a, index, value);

        assert_eq!(cache.len(), 2);
        assert!(cache.lookup(&ds, a, "c0").is_some());
        assert!(cache.lookup(&ds, a, "c1").is_none());
        assert!(cache.lookup(&ds, a, "c2").is_some());
    }

    #[test]
    fn test_same_entry_under_different_sets_occupies_two_slots() {
        let ds = dataset();
        let a = SchemeSet::single(0);
        let ab = a | SchemeSet::single(1);
        let mut cache = NameCache::new(4);
        let (index, value) = entry(&ds, "c0");
        cache.insert(a, index, value);
        cache.insert(ab, index, value);
        cache.insert(ab, index, value);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = NameCache::new(0);
        assert_eq!(cache.capacity(), 1);
        assert!(cache.is_empty());
    }
}

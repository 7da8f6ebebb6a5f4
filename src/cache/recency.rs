//! Bounded recency ranking with dense integer weights.
//!
//! Unlike [`BoundedOrderedMap`](super::BoundedOrderedMap), reading a rank
//! does not promote the entry. Only [`put`](RecencyCache::put) counts as an
//! access. Listing a project's files reads every rank; if reads promoted,
//! the act of sorting would shuffle the order it is sorting by.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Rank returned for keys the cache has never seen.
pub const ABSENT_RANK: i64 = -1;

/// A bounded set of keys ranked by recency of insertion.
///
/// Ranks are dense integers in `[0, len)`, higher meaning more recent.
/// Re-inserting a key moves it to the top rank and closes the gap it left;
/// inserting into a full cache evicts the rank-0 (oldest) key.
///
/// # Examples
///
/// ```
/// use trailhead::cache::RecencyCache;
///
/// let mut cache = RecencyCache::new(10);
/// cache.put("x".to_string());
/// cache.put("y".to_string());
///
/// assert!(cache.rank("y") > cache.rank("x"));
/// assert_eq!(cache.rank("z"), -1);
/// ```
pub struct RecencyCache<T> {
    capacity: usize,
    // Position in `order` is the rank: index 0 = oldest retained.
    order: Vec<T>,
    ranks: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> RecencyCache<T> {
    /// Creates a cache retaining at most `capacity` keys.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RecencyCache capacity must be non-zero");
        Self {
            capacity,
            order: Vec::with_capacity(capacity),
            ranks: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the dense rank of `key`, or [`ABSENT_RANK`] when unknown.
    ///
    /// Ranks are only comparable against other ranks from the same cache.
    /// Looking up a rank never changes the order.
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> i64
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ranks
            .get(key)
            .map_or(ABSENT_RANK, |&position| position as i64)
    }

    /// Inserts `key` at the top rank.
    ///
    /// An existing key is removed first and every rank above its old slot is
    /// decremented, keeping ranks dense in `[0, len)`. A new key arriving at
    /// capacity evicts the rank-0 entry.
    pub fn put(&mut self, key: T) {
        if let Some(position) = self.ranks.remove(&key) {
            self.remove_at(position);
        } else if self.order.len() == self.capacity {
            let evicted = self.order.remove(0);
            self.ranks.remove(&evicted);
            self.reindex_from(0);
        }

        self.order.push(key.clone());
        self.ranks.insert(key, self.order.len() - 1);
    }

    /// Number of keys retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the cache holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maximum number of keys retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates `(key, rank)` pairs in ascending rank order.
    ///
    /// This is the serialization order of the recency ledger: index 0 is the
    /// least recent retained key.
    pub fn iter(&self) -> impl Iterator<Item = (&T, i64)> {
        self.order
            .iter()
            .enumerate()
            .map(|(position, key)| (key, position as i64))
    }

    fn remove_at(&mut self, position: usize) {
        self.order.remove(position);
        self.reindex_from(position);
    }

    fn reindex_from(&mut self, position: usize) {
        for (offset, key) in self.order[position..].iter().enumerate() {
            self.ranks.insert(key.clone(), position + offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_of(keys: &[&str], capacity: usize) -> RecencyCache<String> {
        let mut cache = RecencyCache::new(capacity);
        for key in keys {
            cache.put((*key).to_string());
        }
        cache
    }

    fn assert_ranks_dense(cache: &RecencyCache<String>) {
        let mut ranks: Vec<i64> = cache.iter().map(|(_, rank)| rank).collect();
        ranks.sort_unstable();
        let expected: Vec<i64> = (0..cache.len() as i64).collect();
        assert_eq!(ranks, expected);
        for (key, rank) in cache.iter() {
            assert_eq!(cache.rank(key), rank);
        }
    }

    #[test]
    fn ranks_stay_dense_through_reinserts_and_eviction() {
        let cache = cache_of(&["a", "b", "c", "a", "d", "b", "e"], 4);
        assert_ranks_dense(&cache);
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn later_put_outranks_earlier() {
        let cache = cache_of(&["x", "y"], 10);
        assert!(cache.rank("y") > cache.rank("x"));
    }

    #[test]
    fn descending_rank_sort_puts_most_recent_first() {
        let cache = cache_of(&["x", "y"], 10);
        let mut files = vec!["x".to_string(), "y".to_string()];
        files.sort_by(|a, b| cache.rank(b).cmp(&cache.rank(a)));
        assert_eq!(files, vec!["y".to_string(), "x".to_string()]);
    }

    #[test]
    fn absent_keys_rank_below_everything() {
        let cache = cache_of(&["a"], 10);
        assert_eq!(cache.rank("missing"), ABSENT_RANK);
        assert!(cache.rank("a") > ABSENT_RANK);
    }

    #[test]
    fn reinsert_bumps_to_top_and_decrements_above() {
        let mut cache = cache_of(&["a", "b", "c"], 10);
        // "a" is reinserted: b and c each drop one slot.
        cache.put("a".to_string());
        assert_eq!(cache.rank("b"), 0);
        assert_eq!(cache.rank("c"), 1);
        assert_eq!(cache.rank("a"), 2);
    }

    #[test]
    fn capacity_evicts_lowest_rank() {
        let cache = cache_of(&["a", "b", "c", "d"], 3);
        assert_eq!(cache.rank("a"), ABSENT_RANK);
        assert_eq!(cache.rank("b"), 0);
        assert_eq!(cache.rank("d"), 2);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn iteration_is_ascending_recency() {
        let cache = cache_of(&["a", "b", "a"], 10);
        let order: Vec<&String> = cache.iter().map(|(key, _)| key).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn rank_lookup_does_not_promote() {
        let mut cache = cache_of(&["a", "b"], 10);
        let _ = cache.rank("a");
        cache.put("c".to_string());
        // "a" stayed at the bottom despite the lookup.
        assert_eq!(cache.rank("a"), 0);
        assert_eq!(cache.rank("b"), 1);
        assert_eq!(cache.rank("c"), 2);
    }
}

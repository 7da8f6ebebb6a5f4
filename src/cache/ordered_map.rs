//! Bounded access-ordered map with O(1) promotion and eviction.
//!
//! The map tracks recency with an intrusive doubly linked list threaded
//! through an arena of nodes addressed by `usize` index, plus a hash index
//! from key to arena slot. Using arena indices instead of pointers keeps the
//! structure free of ownership cycles; freed slots are recycled through a
//! free list so a long-lived map does not grow past its capacity.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Sentinel arena index meaning "no node".
const NIL: usize = usize::MAX;

struct Node<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// A bounded map whose iteration order is most-recently-used first.
///
/// Both [`get`](Self::get) and [`insert`](Self::insert) count as an access
/// and move the entry to the head of the order. Inserting a new key into a
/// full map evicts exactly the least recently used entry.
///
/// # Examples
///
/// ```
/// use trailhead::cache::BoundedOrderedMap;
///
/// let mut map = BoundedOrderedMap::new(3);
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.insert("c", 3);
/// map.insert("d", 4);
///
/// assert!(!map.contains_key(&"a"));
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["d", "c", "b"]);
/// ```
pub struct BoundedOrderedMap<K, V> {
    capacity: usize,
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    head: usize,
    tail: usize,
}

impl<K: Eq + Hash + Clone, V> BoundedOrderedMap<K, V> {
    /// Creates a map holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero; a map that can hold nothing is a
    /// programmer error, not a runtime condition.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedOrderedMap capacity must be non-zero");
        Self {
            capacity,
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            head: NIL,
            tail: NIL,
        }
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `key` is present, without touching recency order.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Looks up `key` and promotes the entry to most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Like [`get`](Self::get) but with mutable access to the value.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.nodes[idx].as_mut().map(|node| &mut node.value)
    }

    /// Looks up `key` without promoting it.
    #[must_use]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Inserts or updates `key`, promoting it to most recently used.
    ///
    /// Returns the previous value when `key` was already present. When a new
    /// key would push the map past capacity, exactly one entry (the least
    /// recently used) is evicted first.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            self.promote(idx);
            return self.nodes[idx]
                .as_mut()
                .map(|node| std::mem::replace(&mut node.value, value));
        }

        if self.index.len() == self.capacity {
            self.evict_tail();
        }

        let node = Node {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        };
        let idx = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.index.insert(key, idx);
        self.push_front(idx);
        None
    }

    /// Removes `key`; returns whether it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(idx) = self.index.remove(key) else {
            return false;
        };
        self.unlink(idx);
        self.nodes[idx] = None;
        self.free.push(idx);
        true
    }

    /// Drops every entry. The arena is reset, so slot indices start over.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.index.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Iterates entries from most to least recently used.
    ///
    /// Each call walks the list afresh; the shared borrow keeps the order
    /// stable for the iterator's lifetime.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Values from most to least recently used.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    fn promote(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes[idx] {
            Some(ref node) => (node.prev, node.next),
            None => return,
        };

        if prev == NIL {
            self.head = next;
        } else if let Some(node) = self.nodes[prev].as_mut() {
            node.next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else if let Some(node) = self.nodes[next].as_mut() {
            node.prev = prev;
        }

        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = NIL;
            node.next = NIL;
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head == NIL {
            self.tail = idx;
        } else if let Some(node) = self.nodes[old_head].as_mut() {
            node.prev = idx;
        }
        self.head = idx;
    }

    fn evict_tail(&mut self) -> Option<(K, V)> {
        let idx = self.tail;
        if idx == NIL {
            return None;
        }
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.index.remove(&node.key);
        self.free.push(idx);
        Some((node.key, node.value))
    }
}

/// Head-to-tail iterator over a [`BoundedOrderedMap`].
pub struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    cursor: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = self.nodes[self.cursor].as_ref()?;
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}

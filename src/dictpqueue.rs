//! Keyed view over a [`PQueue`](crate::pqueue::PQueue).
//!
//! `DictPQueue` layers a hash index on top of a `PQueue` so that, in addition
//! to operating on the top of the queue, a caller can address any entry
//! directly by its key: look it up, replace its priority, or remove it,
//! all in O(1) average plus the O(log N) heap fixup the underlying queue
//! needs. This is the same pairing of a hash index with an ordered
//! structure used throughout this crate's cache layer (a `HashMap` from key
//! to a handle into an ordered backing store).

extern crate alloc;

use crate::pqueue::{Handle, PQueue};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A priority queue addressable by key.
///
/// `K` must be `Clone` because the key lives in two places at once: once as
/// the map index, once inside the backing [`PQueue`] slot (so that `peek`
/// without a key can still report which key is on top).
pub struct DictPQueue<K, V, S = DefaultHashBuilder> {
    queue: PQueue<K, V>,
    index: HashMap<K, Handle, S>,
}

impl<K: Hash + Eq + Clone, V> DictPQueue<K, V, DefaultHashBuilder> {
    /// Creates an empty queue using the default hasher.
    pub fn new() -> Self {
        Self {
            queue: PQueue::new(),
            index: HashMap::default(),
        }
    }

    /// Creates an empty queue with room for `cap` entries without
    /// reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            queue: PQueue::with_capacity(cap),
            index: HashMap::with_capacity_and_hasher(cap, DefaultHashBuilder::default()),
        }
    }
}

impl<K: Hash + Eq + Clone, V> Default for DictPQueue<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> core::fmt::Debug for DictPQueue<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DictPQueue")
            .field("len", &self.index.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Default> DictPQueue<K, V, S> {
    /// Creates an empty queue using a caller-supplied hash builder.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            queue: PQueue::new(),
            index: HashMap::with_hasher(hasher),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> DictPQueue<K, V, S> {
    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is currently indexed.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns `(value, priority)` for `key`, without modifying order.
    /// `None` signals key-missing.
    pub fn peek_key<Q>(&self, key: &Q) -> Option<(&V, f64)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        let (_, v, p) = self.queue.peek_at(handle)?;
        Some((v, p))
    }

    /// Returns `(key, value, priority)` for the top of the queue, without
    /// modifying order.
    pub fn peek_top(&self) -> Option<(&K, &V, f64)> {
        let (_, k, v, p) = self.queue.peek()?;
        Some((k, v, p))
    }

    /// Returns a mutable reference to the value stored at `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.queue.value_at_mut(handle)
    }

    /// Inserts `key` with `value` and `priority`.
    ///
    /// If `key` is already indexed, its priority is overwritten and the
    /// queue is re-sorted around it (equivalent to `push` + `move`); its
    /// value is replaced too. Otherwise the pair is pushed fresh and
    /// indexed.
    pub fn put(&mut self, key: K, value: V, priority: f64) {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(slot) = self.queue.value_at_mut(handle) {
                *slot = value;
            }
            self.queue.set_priority(handle, priority);
        } else {
            let handle = self.queue.push(key.clone(), value, priority);
            self.index.insert(key, handle);
        }
    }

    /// Overwrites the priority of `key` without touching its value, and
    /// restores heap order. `None` signals key-missing.
    pub fn set_priority<Q>(&mut self, key: &Q, priority: f64) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.queue.set_priority(handle, priority)
    }

    /// Removes and returns `(value, priority)` for `key`. `None` signals
    /// key-missing.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(V, f64)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        let (_, v, p) = self.queue.pop_at(handle)?;
        Some((v, p))
    }

    /// Removes and returns `(key, value, priority)` for the top of the
    /// queue.
    pub fn pop_top(&mut self) -> Option<(K, V, f64)> {
        let (k, v, p) = self.queue.pop()?;
        self.index.remove(&k);
        Some((k, v, p))
    }

    /// Inserts `(key, value, priority)`, evicting `evict_key` (or the top,
    /// if `evict_key` is `None`) in the same operation. Equivalent to
    /// `put` + `remove`/`pop_top`, but performs a single pair of heap
    /// fixups and never transiently holds more than one extra entry.
    pub fn swap<Q>(
        &mut self,
        key: K,
        value: V,
        priority: f64,
        evict_key: Option<&Q>,
    ) -> Option<(K, V, f64)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let evict_handle = match evict_key {
            Some(ek) => self.index.remove(ek),
            None => {
                let (_, k, _, _) = self.queue.peek()?;
                let h = self.index.remove(k);
                h
            }
        };
        let (new_handle, removed) = self.queue.swap(key.clone(), value, priority, evict_handle);
        self.index.insert(key, new_handle);
        removed.map(|(rk, rv, rp)| (rk, rv, rp))
    }

    /// Multiplies every stored priority by `m`. Delegates directly to the
    /// backing queue; the key index is untouched since priorities don't
    /// affect it.
    pub fn scale(&mut self, m: f64) {
        self.queue.scale(m);
    }

    /// Iterates over all `(key, value, priority)` triples in arbitrary
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, f64)> {
        self.queue.iter().map(|(_, k, v, p)| (k, v, p))
    }
}

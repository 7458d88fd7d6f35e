//! Generic priority queue over an arena of slots.
//!
//! `PQueue<K, V>` is a min-oriented binary heap: the top of the queue is
//! always the entry with the smallest priority. Entries are addressed either
//! by position (`peek`/`pop` act on the top) or by a stable [`Handle`]
//! returned from `push`, which remains valid until that entry is pulled.
//!
//! # Implementation
//!
//! Entries live in a `Vec` of slots (an arena); a handle is a slot index plus
//! a generation counter, so a handle from a removed entry can never alias a
//! slot that was later reused for something else. A second `Vec<usize>`
//! holds the heap order as slot indices, and each occupied slot remembers its
//! own position in that array, so a handle can locate and reposition its
//! entry in O(log N) without a linear scan. This is the arena-plus-index
//! layout: one backing array per tier, handles as indices, avoiding the
//! per-node heap allocations and pointer chasing of a linked structure.
//!
//! # Ordering and ties
//!
//! Priorities are compared as `f64`; entries are never pushed with a NaN
//! priority (callers are expected to uphold this, and debug builds assert
//! it). Ties are broken by insertion/bump sequence number: the entry that
//! was pushed or last had its priority changed *least recently* among equal
//! priorities sorts first (and is therefore pulled first by `pop`). This
//! gives every priority level an LRU-within-priority ordering, which is the
//! documented tie-breaker for the whole crate.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

/// A stable reference to an entry in a [`PQueue`].
///
/// Valid from the moment it is returned by `push` (or `swap`) until the
/// entry is pulled by `pop_at` (or by `pop`, if it happened to be on top).
/// Using a handle after its entry has been removed returns `None` rather
/// than touching unrelated data, because the generation stored in the handle
/// can never match a slot that has since been reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

struct Slot<K, V> {
    generation: u32,
    occupant: Option<Occupant<K, V>>,
}

struct Occupant<K, V> {
    key: K,
    value: V,
    priority: f64,
    seq: u64,
    /// Current position of this slot's index within `PQueue::order`.
    heap_pos: usize,
}

/// A min-oriented priority queue keyed by an arbitrary, possibly-duplicated
/// `K`, carrying an arbitrary payload `V`.
///
/// `K` here is not required to be unique, and `PQueue` performs no hashing or
/// key-based lookup of its own — that is the job of [`crate::dictpqueue::DictPQueue`],
/// which layers a key index on top of a `PQueue`.
pub struct PQueue<K, V> {
    slots: Vec<Slot<K, V>>,
    /// Heap-ordered slot indices; `order[0]` is always the minimum.
    order: Vec<usize>,
    free: Vec<usize>,
    next_seq: u64,
}

impl<K, V> Default for PQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> core::fmt::Debug for PQueue<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PQueue").field("len", &self.len()).finish()
    }
}

impl<K, V> PQueue<K, V> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
            free: Vec::new(),
            next_seq: 0,
        }
    }

    /// Creates an empty queue with room for `cap` entries without
    /// reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
            order: Vec::with_capacity(cap),
            free: Vec::new(),
            next_seq: 0,
        }
    }

    /// Builds a queue from an initial set of (key, value, priority) triples.
    ///
    /// The final structure satisfies the heap property; construction is
    /// O(N) via bottom-up sift-down, not O(N log N) via repeated `push`.
    pub fn init<I: IntoIterator<Item = (K, V, f64)>>(items: I) -> Self {
        let mut q = Self::new();
        for (k, v, p) in items {
            let idx = q.slots.len();
            q.slots.push(Slot {
                generation: 0,
                occupant: Some(Occupant {
                    key: k,
                    value: v,
                    priority: p,
                    seq: q.next_seq,
                    heap_pos: q.order.len(),
                }),
            });
            q.order.push(idx);
            q.next_seq += 1;
        }
        let n = q.order.len();
        if n > 1 {
            for start in (0..n / 2).rev() {
                q.sift_down(start);
            }
        }
        q
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn key_of(&self, i: usize) -> (f64, u64) {
        let occ = self.slots[self.order[i]].occupant.as_ref().unwrap();
        (occ.priority, occ.seq)
    }

    fn heap_less(&self, a: usize, b: usize) -> bool {
        self.key_of(a).partial_cmp(&self.key_of(b)).unwrap_or(Ordering::Equal) == Ordering::Less
    }

    fn heap_swap(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
        let ia = self.order[a];
        let ib = self.order[b];
        self.slots[ia].occupant.as_mut().unwrap().heap_pos = a;
        self.slots[ib].occupant.as_mut().unwrap().heap_pos = b;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap_less(i, parent) {
                self.heap_swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.order.len();
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut smallest = i;
            if l < n && self.heap_less(l, smallest) {
                smallest = l;
            }
            if r < n && self.heap_less(r, smallest) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.heap_swap(i, smallest);
            i = smallest;
        }
    }

    fn alloc_slot(&mut self, key: K, value: V, priority: f64) -> Handle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let heap_pos = self.order.len();
        let occupant = Occupant {
            key,
            value,
            priority,
            seq,
            heap_pos,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.occupant = Some(occupant);
            self.order.push(index);
            Handle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                occupant: Some(occupant),
            });
            self.order.push(index);
            Handle {
                index,
                generation: 0,
            }
        }
    }

    /// Inserts `(key, value)` with the given priority and returns a stable
    /// handle to it.
    pub fn push(&mut self, key: K, value: V, priority: f64) -> Handle {
        debug_assert!(!priority.is_nan(), "pushed priority must not be NaN");
        let handle = self.alloc_slot(key, value, priority);
        self.sift_up(self.order.len() - 1);
        handle
    }

    fn resolve(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        if slot.occupant.is_some() {
            Some(handle.index)
        } else {
            None
        }
    }

    /// Returns the top `(handle, key, value, priority)` without removing it.
    pub fn peek(&self) -> Option<(Handle, &K, &V, f64)> {
        let top = *self.order.first()?;
        let occ = self.slots[top].occupant.as_ref().unwrap();
        Some((
            Handle {
                index: top,
                generation: self.slots[top].generation,
            },
            &occ.key,
            &occ.value,
            occ.priority,
        ))
    }

    /// Returns `(key, value, priority)` for a specific handle, without
    /// modifying order. Returns `None` if the handle has been pulled.
    pub fn peek_at(&self, handle: Handle) -> Option<(&K, &V, f64)> {
        let index = self.resolve(handle)?;
        let occ = self.slots[index].occupant.as_ref().unwrap();
        Some((&occ.key, &occ.value, occ.priority))
    }

    /// Returns a mutable reference to the value at `handle`, without
    /// touching its priority or position.
    pub fn value_at_mut(&mut self, handle: Handle) -> Option<&mut V> {
        let index = self.resolve(handle)?;
        Some(&mut self.slots[index].occupant.as_mut().unwrap().value)
    }

    fn remove_at(&mut self, index: usize) -> (K, V, f64) {
        let slot = &mut self.slots[index];
        let occ = slot.occupant.take().unwrap();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);

        let pos = occ.heap_pos;
        let last = self.order.len() - 1;
        if pos != last {
            self.order.swap(pos, last);
            let moved = self.order[pos];
            self.slots[moved].occupant.as_mut().unwrap().heap_pos = pos;
        }
        self.order.pop();
        if pos < self.order.len() {
            self.sift_down(pos);
            self.sift_up(pos);
        }
        (occ.key, occ.value, occ.priority)
    }

    /// Removes and returns the top `(key, value, priority)`. The handle that
    /// pointed at it is invalidated.
    pub fn pop(&mut self) -> Option<(K, V, f64)> {
        let top = *self.order.first()?;
        Some(self.remove_at(top))
    }

    /// Removes and returns the entry at `handle`, wherever it currently sits
    /// in the queue.
    pub fn pop_at(&mut self, handle: Handle) -> Option<(K, V, f64)> {
        let index = self.resolve(handle)?;
        Some(self.remove_at(index))
    }

    /// Inserts `(key, value, priority)` and removes `other` (or the top, if
    /// `other` is `None`) in a single operation.
    ///
    /// Equivalent to `push` followed by `pop`/`pop_at`, but never transiently
    /// holds more than one extra entry and costs a single pair of
    /// O(log N) heap fixups.
    pub fn swap(
        &mut self,
        key: K,
        value: V,
        priority: f64,
        other: Option<Handle>,
    ) -> (Handle, Option<(K, V, f64)>) {
        let removed = match other {
            Some(h) => self.pop_at(h),
            None => self.pop(),
        };
        let handle = self.push(key, value, priority);
        (handle, removed)
    }

    /// Overwrites the priority stored at `handle` and restores heap order.
    ///
    /// This also refreshes the entry's tie-break sequence number, so it
    /// becomes the most-recently-touched entry among any others sharing its
    /// new priority.
    pub fn set_priority(&mut self, handle: Handle, new_priority: f64) -> Option<f64> {
        debug_assert!(!new_priority.is_nan(), "priority must not be NaN");
        let index = self.resolve(handle)?;
        let seq = self.next_seq;
        self.next_seq += 1;
        let (old, pos) = {
            let occ = self.slots[index].occupant.as_mut().unwrap();
            let old = occ.priority;
            occ.priority = new_priority;
            occ.seq = seq;
            (old, occ.heap_pos)
        };
        self.reheapify(pos);
        Some(old)
    }

    /// Restores heap order around `pos` after the priority of the entry that
    /// *was* there has changed, in either direction.
    ///
    /// `sift_up` alone handles a decrease: the entry walks toward the root,
    /// and whatever gets swapped down into `pos` along the way keeps the
    /// same value it had before, so it's still valid against its unchanged
    /// children. `sift_down` alone handles an increase. Running both from
    /// the same starting position handles either direction: whichever one
    /// doesn't apply is a no-op.
    fn reheapify(&mut self, pos: usize) {
        self.sift_up(pos);
        self.sift_down(pos.min(self.order.len() - 1));
    }

    /// Restores heap order around `handle` after its priority was mutated
    /// directly via [`PQueue::priority_mut`]. Prefer [`PQueue::set_priority`]
    /// unless you need to compute the new priority in place.
    pub fn reheapify_handle(&mut self, handle: Handle) {
        if let Some(index) = self.resolve(handle) {
            let pos = self.slots[index].occupant.as_ref().unwrap().heap_pos;
            self.reheapify(pos);
        }
    }

    /// Direct mutable access to the priority at `handle`, for callers that
    /// need to compute a new priority from the old one. The caller must call
    /// [`PQueue::reheapify_handle`] afterward.
    pub fn priority_mut(&mut self, handle: Handle) -> Option<&mut f64> {
        let index = self.resolve(handle)?;
        Some(&mut self.slots[index].occupant.as_mut().unwrap().priority)
    }

    /// Multiplies every stored priority by `m`.
    ///
    /// `m` must be strictly positive: a non-positive multiplier could invert
    /// or collapse the priority order, which no caller of this crate ever
    /// wants, so it is treated as a programmer error rather than propagated.
    /// Order is preserved by construction, so no heap restructuring is
    /// needed — this is an O(N) pass over the slots, not the heap array.
    pub fn scale(&mut self, m: f64) {
        debug_assert!(m > 0.0, "scale factor must be positive");
        for slot in &mut self.slots {
            if let Some(occ) = slot.occupant.as_mut() {
                occ.priority *= m;
            }
        }
    }

    /// Iterates over all entries in arbitrary (heap-array) order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &K, &V, f64)> {
        self.order.iter().map(move |&idx| {
            let slot = &self.slots[idx];
            let occ = slot.occupant.as_ref().unwrap();
            (
                Handle {
                    index: idx,
                    generation: slot.generation,
                },
                &occ.key,
                &occ.value,
                occ.priority,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::vec;

    #[test]
    fn test_push_pop_min_order() {
        let mut q: PQueue<&str, i32> = PQueue::new();
        q.push("c", 3, 3.0);
        q.push("a", 1, 1.0);
        q.push("b", 2, 2.0);

        assert_eq!(q.pop(), Some(("a", 1, 1.0)));
        assert_eq!(q.pop(), Some(("b", 2, 2.0)));
        assert_eq!(q.pop(), Some(("c", 3, 3.0)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_init_heapifies() {
        let q: PQueue<i32, ()> =
            PQueue::init(vec![(5, (), 5.0), (1, (), 1.0), (3, (), 3.0), (2, (), 2.0)]);
        assert_eq!(q.len(), 4);
        assert_eq!(q.peek().map(|(_, k, _, _)| *k), Some(1));
    }

    #[test]
    fn test_handle_survives_unrelated_mutation() {
        let mut q: PQueue<&str, i32> = PQueue::new();
        let ha = q.push("a", 1, 5.0);
        q.push("b", 2, 1.0);
        // "b" is on top; popping it should not disturb ha.
        assert_eq!(q.pop(), Some(("b", 2, 1.0)));
        assert_eq!(q.peek_at(ha), Some((&"a", &1, 5.0)));
    }

    #[test]
    fn test_pop_at_arbitrary_handle() {
        let mut q: PQueue<&str, i32> = PQueue::new();
        let ha = q.push("a", 1, 5.0);
        q.push("b", 2, 1.0);
        q.push("c", 3, 9.0);
        assert_eq!(q.pop_at(ha), Some(("a", 1, 5.0)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(("b", 2, 1.0)));
    }

    #[test]
    fn test_stale_handle_returns_none() {
        let mut q: PQueue<&str, i32> = PQueue::new();
        let ha = q.push("a", 1, 5.0);
        q.pop_at(ha);
        // A new push may reuse a's slot; the old handle must not resolve to it.
        q.push("z", 9, 0.5);
        assert_eq!(q.peek_at(ha), None);
    }

    #[test]
    fn test_set_priority_reorders() {
        let mut q: PQueue<&str, i32> = PQueue::new();
        let ha = q.push("a", 1, 5.0);
        q.push("b", 2, 1.0);
        q.set_priority(ha, 0.0);
        assert_eq!(q.peek().map(|(_, k, _, _)| *k), Some("a"));
    }

    #[test]
    fn test_scale_preserves_order() {
        let mut q: PQueue<&str, i32> = PQueue::new();
        q.push("a", 1, 1.0);
        q.push("b", 2, 2.0);
        q.push("c", 3, 3.0);
        q.scale(10.0);
        assert_eq!(q.pop(), Some(("a", 1, 10.0)));
        assert_eq!(q.pop(), Some(("b", 2, 20.0)));
        assert_eq!(q.pop(), Some(("c", 3, 30.0)));
    }

    #[test]
    fn test_tie_break_is_fifo_by_recency() {
        let mut q: PQueue<&str, ()> = PQueue::new();
        q.push("first", (), 1.0);
        q.push("second", (), 1.0);
        // Equal priority: the one pushed first sorts first (pulled first).
        assert_eq!(q.pop().map(|(k, ..)| k), Some("first"));
        assert_eq!(q.pop().map(|(k, ..)| k), Some("second"));
    }

    #[test]
    fn test_swap_top() {
        let mut q: PQueue<&str, i32> = PQueue::new();
        q.push("a", 1, 1.0);
        q.push("b", 2, 2.0);
        let (_h, removed) = q.swap("c", 3, 0.5, None);
        assert_eq!(removed, Some(("a", 1, 1.0)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.peek().map(|(_, k, _, _)| *k), Some("c"));
    }
}

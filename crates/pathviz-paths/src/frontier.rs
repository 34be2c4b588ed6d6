//! Min-priority frontier with decrease-key by reinsertion.
//!
//! Entries live in a binary heap keyed by `(priority, insertion_order)`.
//! Lower priorities are popped first and ties are broken by insertion order
//! (FIFO), which keeps exploration order deterministic.
//!
//! Improving an item's priority pushes a fresh entry; the old one stays in
//! the heap and is skipped when it surfaces. Once an item has been popped it
//! is closed: later pushes for it are refused and leftover entries are
//! discarded, so no item is ever extracted twice.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug)]
struct Entry<T, P> {
    item: T,
    priority: P,
    /// Monotonically increasing; lower = inserted earlier.
    seq: u64,
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A priority frontier for best-first search.
#[derive(Debug)]
pub struct Frontier<T, P = i32> {
    heap: BinaryHeap<Reverse<Entry<T, P>>>,
    /// Current priority and entry sequence of every item still waiting.
    live: FxHashMap<T, (P, u64)>,
    closed: FxHashSet<T>,
    seq: u64,
}

impl<T, P> Frontier<T, P>
where
    T: Copy + Eq + Hash,
    P: Copy + Ord,
{
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: FxHashMap::default(),
            closed: FxHashSet::default(),
            seq: 0,
        }
    }

    /// Insert `item`, or lower its priority if it is already waiting.
    ///
    /// Returns `false` (and changes nothing) if the item was already popped
    /// or is waiting with a priority no worse than `priority`.
    pub fn push(&mut self, item: T, priority: P) -> bool {
        if self.closed.contains(&item) {
            return false;
        }
        if let Some(&(current, _)) = self.live.get(&item) {
            if current <= priority {
                return false;
            }
        }
        self.insert(item, priority);
        true
    }

    /// Decrease-key: lower the priority of an item that is still waiting.
    ///
    /// Returns `false` if the item is not waiting or `priority` is not an
    /// improvement.
    pub fn update_priority(&mut self, item: T, priority: P) -> bool {
        match self.live.get(&item) {
            Some(&(current, _)) if priority < current => {
                self.insert(item, priority);
                true
            }
            _ => false,
        }
    }

    fn insert(&mut self, item: T, priority: P) {
        let seq = self.seq;
        self.seq += 1;
        self.live.insert(item, (priority, seq));
        self.heap.push(Reverse(Entry {
            item,
            priority,
            seq,
        }));
    }

    /// Pop the waiting item with the lowest priority (ties broken FIFO) and
    /// close it.
    pub fn pop_min(&mut self) -> Option<(T, P)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if !self.is_current(&entry) {
                continue;
            }
            self.live.remove(&entry.item);
            self.closed.insert(entry.item);
            return Some((entry.item, entry.priority));
        }
        None
    }

    /// Priority of the item [`pop_min`](Self::pop_min) would return next.
    ///
    /// Discards stale entries sitting on top of the heap.
    pub fn peek_priority(&mut self) -> Option<P> {
        loop {
            let Reverse(top) = self.heap.peek()?;
            if self.is_current(top) {
                return Some(top.priority);
            }
            self.heap.pop();
        }
    }

    #[inline]
    fn is_current(&self, entry: &Entry<T, P>) -> bool {
        self.live
            .get(&entry.item)
            .is_some_and(|&(_, seq)| seq == entry.seq)
    }

    /// Current priority of a waiting item.
    pub fn priority_of(&self, item: T) -> Option<P> {
        self.live.get(&item).map(|&(p, _)| p)
    }

    /// Whether `item` is waiting in the frontier.
    pub fn contains(&self, item: T) -> bool {
        self.live.contains_key(&item)
    }

    /// Whether `item` has already been popped.
    pub fn is_closed(&self, item: T) -> bool {
        self.closed.contains(&item)
    }

    /// Number of waiting items (stale entries are not counted).
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Remove every entry and forget closed items.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.closed.clear();
        self.seq = 0;
    }
}

impl<T, P> Default for Frontier<T, P>
where
    T: Copy + Eq + Hash,
    P: Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

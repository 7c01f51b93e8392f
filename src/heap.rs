//! A binary min-heap over arena keys with in-place decrease-key.
//!
//! [std::collections::BinaryHeap] cannot tell whether it already holds an element, nor move an
//! element after its priority improved, so searches built on it push duplicates and skip stale
//! entries when popping. This heap instead keeps every element informed of its current slot
//! through [HeapItem], which makes [contains](BinaryMinHeap::contains) O(1) and
//! [update_improved](BinaryMinHeap::update_improved) O(log n).
//!
//! Elements live in an external arena (a slice of `T: HeapItem`) and the heap stores their arena
//! keys. Every operation that may move elements takes that arena as an argument.
use std::cmp::Ordering;

/// An element that can be stored in a [BinaryMinHeap].
pub trait HeapItem {
    /// Slot currently occupied in the heap, if the element was inserted.
    fn heap_index(&self) -> Option<usize>;
    fn set_heap_index(&mut self, index: Option<usize>);
    /// [Ordering::Greater] if `self` should be closer to the root than `other`.
    fn compare_priority(&self, other: &Self) -> Ordering;
}

#[derive(Clone, Debug)]
pub struct BinaryMinHeap {
    slots: Vec<Option<usize>>,
    count: usize,
}

impl BinaryMinHeap {
    /// Creates a heap able to hold up to `capacity` elements, which is usually the number of nodes
    /// in the arena.
    pub fn with_capacity(capacity: usize) -> BinaryMinHeap {
        BinaryMinHeap {
            slots: vec![None; capacity],
            count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Key at the root, without removing it.
    pub fn peek(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            self.slots[0]
        }
    }

    /// Adds `key` to the heap.
    ///
    /// # Panics
    /// If the heap is already filled to capacity.
    pub fn insert<T: HeapItem>(&mut self, items: &mut [T], key: usize) {
        assert!(
            self.count < self.slots.len(),
            "heap capacity of {} exceeded",
            self.slots.len()
        );
        let slot = self.count;
        self.slots[slot] = Some(key);
        items[key].set_heap_index(Some(slot));
        self.count += 1;
        self.sift_up(items, slot);
    }

    /// Removes and returns the key with the highest priority, or [None] if the heap is empty.
    pub fn extract_min<T: HeapItem>(&mut self, items: &mut [T]) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let first = self.slots[0].take()?;
        self.count -= 1;
        if self.count > 0 {
            let last = self.slots[self.count].take()?;
            self.slots[0] = Some(last);
            items[last].set_heap_index(Some(0));
            self.sift_down(items, 0);
        }
        items[first].set_heap_index(None);
        Some(first)
    }

    /// Whether `key` is currently stored in the heap.
    pub fn contains<T: HeapItem>(&self, items: &[T], key: usize) -> bool {
        match items[key].heap_index() {
            Some(slot) => slot < self.count && self.slots[slot] == Some(key),
            None => false,
        }
    }

    /// Restores the heap order after the priority of `key` increased (its cost decreased).
    /// An improved element can only move towards the root.
    pub fn update_improved<T: HeapItem>(&mut self, items: &mut [T], key: usize) {
        if let Some(slot) = items[key].heap_index() {
            debug_assert_eq!(self.slots[slot], Some(key));
            self.sift_up(items, slot);
        }
    }

    /// Empties the heap without releasing its storage.
    pub fn clear(&mut self) {
        for slot in &mut self.slots[..self.count] {
            *slot = None;
        }
        self.count = 0;
    }

    /// Keys in slot order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots[..self.count].iter().flatten().copied()
    }

    fn key_at(&self, slot: usize) -> usize {
        match self.slots[slot] {
            Some(key) => key,
            None => unreachable!("occupied heap slot {} is empty", slot),
        }
    }

    fn sift_up<T: HeapItem>(&mut self, items: &mut [T], mut slot: usize) {
        let key = self.key_at(slot);
        while slot > 0 {
            let parent_slot = (slot - 1) / 2;
            let parent = self.key_at(parent_slot);
            if items[key].compare_priority(&items[parent]) == Ordering::Greater {
                self.swap(items, slot, parent_slot);
                slot = parent_slot;
            } else {
                break;
            }
        }
    }

    fn sift_down<T: HeapItem>(&mut self, items: &mut [T], mut slot: usize) {
        let key = self.key_at(slot);
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            if left >= self.count {
                return;
            }
            let mut child = left;
            if right < self.count {
                let (l, r) = (self.key_at(left), self.key_at(right));
                if items[r].compare_priority(&items[l]) == Ordering::Greater {
                    child = right;
                }
            }
            let child_key = self.key_at(child);
            if items[child_key].compare_priority(&items[key]) == Ordering::Greater {
                self.swap(items, slot, child);
                slot = child;
            } else {
                return;
            }
        }
    }

    fn swap<T: HeapItem>(&mut self, items: &mut [T], a: usize, b: usize) {
        self.slots.swap(a, b);
        let (key_a, key_b) = (self.key_at(a), self.key_at(b));
        items[key_a].set_heap_index(Some(a));
        items[key_b].set_heap_index(Some(b));
    }
}

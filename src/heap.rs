//! Bounded min-heap over `f64` selection keys.
//!
//! Used by the key-based weighted samplers to keep the `k` largest keys seen so far:
//! the root is always the weakest retained key, so deciding whether a new key gets in
//! is one comparison and admitting it is one O(log k) sift.

use crate::error::Result;
use crate::reservoir::check_capacity;

/// Min-heap of `(key, item)` pairs holding at most `capacity` entries.
///
/// Keys and items live in parallel vectors so the retained items can be read as a
/// slice. Keys are compared with `f64::total_cmp`.
#[derive(Debug, Clone)]
pub struct KeyHeap<T> {
    capacity: usize,
    keys: Vec<f64>,
    items: Vec<T>,
}

impl<T> KeyHeap<T> {
    /// Create an empty heap holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        let reserve = capacity.min(4096);
        Ok(Self {
            capacity,
            keys: Vec::with_capacity(reserve),
            items: Vec::with_capacity(reserve),
        })
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether the heap is at capacity.
    pub fn is_full(&self) -> bool {
        self.keys.len() == self.capacity
    }

    /// Smallest retained key and its item.
    pub fn peek_min(&self) -> Option<(f64, &T)> {
        Some((*self.keys.first()?, self.items.first()?))
    }

    /// Smallest retained key.
    pub fn min_key(&self) -> Option<f64> {
        self.keys.first().copied()
    }

    /// Insert into a heap that still has room. A full heap hands the pair back.
    pub fn insert(&mut self, key: f64, item: T) -> std::result::Result<(), (f64, T)> {
        if self.is_full() {
            return Err((key, item));
        }
        self.keys.push(key);
        self.items.push(item);
        self.sift_up(self.keys.len() - 1);
        Ok(())
    }

    /// Remove and return the smallest entry.
    pub fn extract_min(&mut self) -> Option<(f64, T)> {
        if self.keys.is_empty() {
            return None;
        }
        let last = self.keys.len() - 1;
        self.swap(0, last);
        let key = self.keys.pop()?;
        let item = self.items.pop()?;
        if !self.keys.is_empty() {
            self.sift_down(0);
        }
        Some((key, item))
    }

    /// Overwrite the root with a new entry and restore heap order, returning the old
    /// root. On an empty heap the entry is inserted and `None` returned.
    pub fn replace_min(&mut self, key: f64, item: T) -> Option<(f64, T)> {
        if self.keys.is_empty() {
            self.keys.push(key);
            self.items.push(item);
            return None;
        }
        let old_key = std::mem::replace(&mut self.keys[0], key);
        let old_item = std::mem::replace(&mut self.items[0], item);
        self.sift_down(0);
        Some((old_key, old_item))
    }

    /// Admit `(key, item)` if there is room or if `key` beats the current minimum.
    /// Returns whether the entry was retained.
    pub fn offer(&mut self, key: f64, item: T) -> bool {
        if !self.is_full() {
            self.keys.push(key);
            self.items.push(item);
            self.sift_up(self.keys.len() - 1);
            return true;
        }
        match self.min_key() {
            Some(min) if key > min => {
                self.replace_min(key, item);
                true
            }
            _ => false,
        }
    }

    /// Retained items, in heap order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Retained keys, aligned with [`items`](Self::items).
    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    /// Consume the heap and return the retained items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.keys.swap(a, b);
        self.items.swap(a, b);
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.keys[a].total_cmp(&self.keys[b]).is_lt()
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.keys.len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let child = if right < n && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, i) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }
}

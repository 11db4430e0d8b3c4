//! Ordered offer pool.
//!
//! ## Architecture
//!
//! - **Slab**: arena storage; a key stays valid until that entry is removed
//! - **Linked list**: head/tail pointers preserve submission order
//!
//! Stable keys let the matching pass collect processed sells by key and sweep
//! them after the scan, without index shifting between removals.
//!
//! ## Example
//!
//! ```
//! use offer_market::pool::OfferPool;
//! use offer_market::types::{Offer, Side};
//!
//! let mut pool = OfferPool::with_capacity(16);
//! pool.push_back(Offer::new(1, 0, 0, 500, Side::Sell));
//! pool.push_back(Offer::new(2, 0, 0, 400, Side::Sell));
//!
//! assert_eq!(pool.len(), 2);
//! assert_eq!(pool.remove_by_id(1).map(|o| o.id), Some(1));
//! assert_eq!(pool.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2]);
//! ```

use slab::Slab;

use crate::pool::OfferNode;
use crate::types::{Offer, OfferId};

#[derive(Debug, Default)]
pub struct OfferPool {
    nodes: Slab<OfferNode>,

    /// Oldest offer (slab key)
    head: Option<usize>,

    /// Newest offer (slab key)
    tail: Option<usize>,
}

impl OfferPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    // ========================================================================
    // Insertion and removal
    // ========================================================================

    /// Append `offer` at the tail; returns its slab key
    pub fn push_back(&mut self, offer: Offer) -> usize {
        let key = self.nodes.insert(OfferNode::new(offer));

        if let Some(tail_key) = self.tail {
            self.nodes[key].prev = Some(tail_key);
            self.nodes[tail_key].next = Some(key);
        } else {
            self.head = Some(key);
        }
        self.tail = Some(key);

        key
    }

    /// Unlink and remove the entry at `key`
    pub fn remove(&mut self, key: usize) -> Option<Offer> {
        let node = self.nodes.try_remove(key)?;

        match node.prev {
            Some(prev_key) => self.nodes[prev_key].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next_key) => self.nodes[next_key].prev = node.prev,
            None => self.tail = node.prev,
        }

        Some(node.offer)
    }

    /// Remove the first offer (in pool order) with `offer_id`.
    ///
    /// Linear scan; `None` when no offer carries that id.
    pub fn remove_by_id(&mut self, offer_id: OfferId) -> Option<Offer> {
        let key = self.find_first(|offer| offer.id == offer_id)?;
        self.remove(key)
    }

    /// Keep only offers for which `keep` returns true, preserving order
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Offer) -> bool,
    {
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            cursor = node.next;
            if !keep(&node.offer) {
                self.remove(key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    // ========================================================================
    // Ordered access
    // ========================================================================

    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Key following `key` in pool order
    #[inline]
    pub fn next_key(&self, key: usize) -> Option<usize> {
        self.nodes.get(key).and_then(|node| node.next)
    }

    #[inline]
    pub fn get(&self, key: usize) -> Option<&Offer> {
        self.nodes.get(key).map(|node| &node.offer)
    }

    /// Key of the first offer (in pool order) matching `predicate`
    pub fn find_first<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Offer) -> bool,
    {
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            if predicate(&node.offer) {
                return Some(key);
            }
            cursor = node.next;
        }
        None
    }

    pub fn contains(&self, offer_id: OfferId) -> bool {
        self.find_first(|offer| offer.id == offer_id).is_some()
    }

    /// Offers from oldest to newest
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }
}

/// Iterator over a pool in submission order
pub struct Iter<'a> {
    nodes: &'a Slab<OfferNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Offer;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.offer)
    }
}

impl<'a> IntoIterator for &'a OfferPool {
    type Item = &'a Offer;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn sell(id: u64, sender: u64) -> Offer {
        Offer::new(id, sender, 0, 1_000_000_000, Side::Sell)
    }

    fn ids(pool: &OfferPool) -> Vec<u64> {
        pool.iter().map(|offer| offer.id).collect()
    }

    #[test]
    fn test_pool_new() {
        let pool = OfferPool::with_capacity(64);
        assert!(pool.is_empty());
        assert!(pool.capacity() >= 64);
        assert!(pool.head().is_none());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut pool = OfferPool::new();
        for id in [5, 3, 9] {
            pool.push_back(sell(id, 0));
        }
        assert_eq!(ids(&pool), vec![5, 3, 9]);
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut pool = OfferPool::new();
        let keys: Vec<usize> = (1..=4).map(|id| pool.push_back(sell(id, 0))).collect();

        pool.remove(keys[1]);
        assert_eq!(ids(&pool), vec![1, 3, 4]);

        pool.remove(keys[0]);
        assert_eq!(ids(&pool), vec![3, 4]);

        pool.remove(keys[3]);
        assert_eq!(ids(&pool), vec![3]);

        pool.push_back(sell(7, 0));
        assert_eq!(ids(&pool), vec![3, 7]);
    }

    #[test]
    fn test_remove_stale_key() {
        let mut pool = OfferPool::new();
        let key = pool.push_back(sell(1, 0));
        assert!(pool.remove(key).is_some());
        assert!(pool.remove(key).is_none());
    }

    #[test]
    fn test_remove_by_id_first_match_only() {
        let mut pool = OfferPool::new();
        pool.push_back(Offer::new(1, 10, 0, 100, Side::Sell));
        pool.push_back(Offer::new(2, 11, 0, 100, Side::Sell));
        pool.push_back(Offer::new(1, 12, 0, 100, Side::Sell));

        let removed = pool.remove_by_id(1).unwrap();
        assert_eq!(removed.sender, 10);
        assert_eq!(ids(&pool), vec![2, 1]);
    }

    #[test]
    fn test_remove_by_id_missing_is_noop() {
        let mut pool = OfferPool::new();
        pool.push_back(sell(1, 0));
        assert!(pool.remove_by_id(99).is_none());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_retain() {
        let mut pool = OfferPool::new();
        for id in 1..=6 {
            pool.push_back(sell(id, id % 2));
        }
        pool.retain(|offer| offer.sender == 0);
        assert_eq!(ids(&pool), vec![2, 4, 6]);
    }

    #[test]
    fn test_find_first_and_walk() {
        let mut pool = OfferPool::new();
        pool.push_back(sell(1, 0));
        let second = pool.push_back(sell(2, 1));
        pool.push_back(sell(3, 1));

        assert_eq!(pool.find_first(|offer| offer.sender == 1), Some(second));
        assert!(pool.contains(3));
        assert!(!pool.contains(4));

        let head = pool.head().unwrap();
        assert_eq!(pool.next_key(head), Some(second));
        assert_eq!(pool.get(second).map(|o| o.id), Some(2));
    }

    #[test]
    fn test_clear() {
        let mut pool = OfferPool::new();
        pool.push_back(sell(1, 0));
        pool.push_back(sell(2, 0));
        pool.clear();

        assert!(pool.is_empty());
        assert_eq!(pool.iter().count(), 0);
        pool.push_back(sell(3, 0));
        assert_eq!(ids(&pool), vec![3]);
    }
}

//! Offer node for slab-based pool storage.
//!
//! ## Design
//!
//! `OfferNode` wraps an `Offer` with doubly-linked list pointers so a pool
//! keeps submission order while any entry can be unlinked in O(1) by its
//! slab key.
//!
//! ```text
//! head (oldest) <-> offer2 <-> offer3 <-> tail (newest)
//! ```

use crate::types::Offer;

/// Offer node stored in a pool slab.
///
/// `next`/`prev` are slab keys, not references.
#[derive(Debug, Clone)]
pub struct OfferNode {
    pub offer: Offer,

    /// Next (newer) offer; None at the tail
    pub next: Option<usize>,

    /// Previous (older) offer; None at the head
    pub prev: Option<usize>,
}

impl OfferNode {
    #[inline]
    pub fn new(offer: Offer) -> Self {
        Self {
            offer,
            next: None,
            prev: None,
        }
    }
}

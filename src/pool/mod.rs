//! Offer pools for the market engine.
//!
//! Each side of the market is an [`OfferPool`]: offers stored in a slab and
//! threaded on a linked list in submission order. There is no price sorting;
//! the matching pass walks both pools front to back.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Append | O(1) |
//! | Remove by key | O(1) |
//! | Remove by offer id | O(n) |
//! | Ordered walk | O(n) |

pub mod node;
pub mod offer_pool;

pub use node::OfferNode;
pub use offer_pool::OfferPool;

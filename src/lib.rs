//! # Offer Market
//!
//! A double-auction marketplace for discrete, uniquely identified assets.
//!
//! ## Architecture
//!
//! - **Types**: Offer, Asset, Trade, PassReceipt, fixed-point prices
//! - **Registry**: asset minting and ownership transfer
//! - **Participants**: dealers (issuers) and traders
//! - **Pool**: ordered, slab-backed offer pools
//! - **Engine**: first-fit matching, settlement, clearing, last-price tracking
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical inputs give identical trades and state roots
//! 2. **No Floating Point**: prices are `u64` scaled by 10^8
//! 3. **Explicit collaborators**: the registry is injected at construction
//! 4. **Synchronous Execution**: one caller drives passes and clearing serially

/// Core data types: Offer, Asset, Trade, PassReceipt
pub mod types;

pub mod error;

pub mod config;

/// Asset registry: minting and ownership
pub mod registry;

/// Dealers and traders
pub mod participant;

/// Ordered offer pools
pub mod pool;

/// Market engine: matching, settlement, clearing
pub mod engine;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::MarketConfig;
pub use engine::{Market, MatchResult, PriceTracker};
pub use error::MarketError;
pub use participant::{Dealer, Participant, Trader};
pub use pool::OfferPool;
pub use registry::{AssetRegistry, InMemoryRegistry};
pub use types::{Asset, Offer, OfferFactory, PassReceipt, Side, Trade};

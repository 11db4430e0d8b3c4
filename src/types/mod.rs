//! Core data types for the offer market
//!
//! ## Types
//!
//! - [`Offer`]: an immutable sell or buy offer for one asset unit
//! - [`OfferFactory`]: builds offers with unique ids
//! - [`Asset`]: a uniquely identified unit with a single owner
//! - [`Trade`]: a settled offer pair
//! - [`PassReceipt`]: summary of one matching pass
//!
//! Prices are `u64` fixed-point values scaled by 10^8 (see [`price`]).

mod asset;
mod offer;
mod receipt;
mod trade;
pub mod price;

pub use asset::Asset;
pub use offer::{Offer, OfferFactory, Side};
pub use receipt::PassReceipt;
pub use trade::Trade;

/// Unique offer identifier
pub type OfferId = u64;

/// Participant (dealer or trader) identifier
pub type ParticipantId = u64;

/// Unique asset unit identifier
pub type AssetId = u64;

/// Fungible asset class identifier, allocated by the registry
pub type AssetTypeId = u64;

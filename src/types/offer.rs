//! Offers posted into the market pools.
//!
//! ## SSZ Serialization
//!
//! `Offer` derives `SimpleSerialize` so pool contents hash to the same state
//! root on every run. The side is stored as a raw `u8` for SSZ compatibility,
//! the same way price bounds are stored as fixed-point `u64`.

use ssz_rs::prelude::*;

use crate::error::MarketError;
use crate::types::{AssetTypeId, OfferId, ParticipantId};

// ============================================================================
// Side enum
// ============================================================================

/// Offer side
///
/// Represented as u8 for SSZ compatibility:
/// - Sell = 0
/// - Buy = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Sell offer - `price_bound` is the minimum acceptable price
    #[default]
    Sell,
    /// Buy offer - `price_bound` is the maximum acceptable price
    Buy,
}

impl Side {
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Sell => 0,
            Side::Buy => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Sell),
            1 => Some(Side::Buy),
            _ => None,
        }
    }
}

// ============================================================================
// Offer struct
// ============================================================================

/// An immutable sell or buy offer for one unit of an asset type.
///
/// Offers are built by [`OfferFactory`], which guarantees unique ids and a
/// non-zero price bound. The market consumes them as-is.
///
/// ## SSZ Layout
///
/// Fixed-size container of 33 bytes (8+8+8+8+1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Offer {
    /// Unique offer identifier
    pub id: u64,

    /// Participant that posted the offer
    pub sender: u64,

    /// Fungible asset class the offer refers to
    pub asset_type: u64,

    /// Minimum price for a sell, maximum price for a buy (fixed-point)
    pub price_bound: u64,

    /// Offer side as u8 (0=Sell, 1=Buy)
    pub side_raw: u8,
}

impl Offer {
    pub fn new(
        id: OfferId,
        sender: ParticipantId,
        asset_type: AssetTypeId,
        price_bound: u64,
        side: Side,
    ) -> Self {
        Self {
            id,
            sender,
            asset_type,
            price_bound,
            side_raw: side.to_u8(),
        }
    }

    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or_default()
    }

    /// First-fit eligibility of `self` (a sell) against `buy`:
    /// same asset type and `sell_min <= buy_max`.
    #[inline]
    pub fn crosses(&self, buy: &Offer) -> bool {
        self.asset_type == buy.asset_type && self.price_bound <= buy.price_bound
    }
}

// ============================================================================
// OfferFactory
// ============================================================================

/// Builds validated offers with unique, increasing ids.
#[derive(Debug, Clone)]
pub struct OfferFactory {
    next_offer_id: OfferId,
}

impl Default for OfferFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferFactory {
    pub fn new() -> Self {
        Self { next_offer_id: 1 }
    }

    /// Sell offer with a minimum acceptable price
    pub fn sell(
        &mut self,
        sender: ParticipantId,
        asset_type: AssetTypeId,
        min_price: u64,
    ) -> crate::error::Result<Offer> {
        self.create(sender, asset_type, min_price, Side::Sell)
    }

    /// Buy offer with a maximum acceptable price
    pub fn buy(
        &mut self,
        sender: ParticipantId,
        asset_type: AssetTypeId,
        max_price: u64,
    ) -> crate::error::Result<Offer> {
        self.create(sender, asset_type, max_price, Side::Buy)
    }

    pub fn create(
        &mut self,
        sender: ParticipantId,
        asset_type: AssetTypeId,
        price_bound: u64,
        side: Side,
    ) -> crate::error::Result<Offer> {
        if price_bound == 0 {
            return Err(MarketError::InvalidPrice(format!(
                "{:?} offer from participant {} needs a non-zero price bound",
                side, sender
            )));
        }

        let id = self.next_offer_id;
        self.next_offer_id += 1;
        Ok(Offer::new(id, sender, asset_type, price_bound, side))
    }

    /// Id the next offer will receive
    #[inline]
    pub fn peek_next_id(&self) -> OfferId {
        self.next_offer_id
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

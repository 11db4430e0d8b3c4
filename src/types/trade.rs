//! Settled trades produced by a matching pass.

use ssz_rs::prelude::*;

/// A settled match between one buy offer and one sell offer.
///
/// ## Price Discovery
///
/// The trade settles at the midpoint of the buy offer's maximum and the sell
/// offer's minimum, not at either side's bound.
///
/// ## Example
///
/// ```
/// use offer_market::types::Trade;
///
/// let trade = Trade {
///     id: 1,
///     buy_offer_id: 4,
///     sell_offer_id: 2,
///     buyer: 7,
///     seller: 0,
///     asset_id: 1,
///     asset_type: 0,
///     price: 1_100_000_000,
/// };
/// assert_eq!(ssz_rs::serialize(&trade).unwrap().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Trade {
    /// Trade sequence number (per market, starting at 1)
    pub id: u64,

    pub buy_offer_id: u64,
    pub sell_offer_id: u64,

    pub buyer: u64,
    pub seller: u64,

    /// The asset unit that changed hands
    pub asset_id: u64,
    pub asset_type: u64,

    /// Settlement price (fixed-point, scaled by 10^8)
    pub price: u64,
}

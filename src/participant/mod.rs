//! Market participants.
//!
//! Two variants share one interface:
//!
//! - [`Dealer`]: mints an asset type and seeds the market with standing sell
//!   offers. Keeps no sell-side ledger.
//! - [`Trader`]: buys and resells, tracking cash and fill counts on both sides.
//!
//! The engine dispatches on [`Participant::supports_sell_tracking`] rather
//! than on the concrete variant when deciding whether to report a sell fill.

mod dealer;
mod trader;

pub use dealer::Dealer;
pub use trader::Trader;

use std::collections::{BTreeMap, VecDeque};

use crate::types::{AssetId, AssetTypeId, ParticipantId};

// ============================================================================
// Inventory
// ============================================================================

/// Free asset units per asset type, oldest first.
///
/// "Free" means owned and not yet handed to a settlement. Taking a unit out
/// commits it; the registry is updated by the caller.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    units: BTreeMap<AssetTypeId, VecDeque<AssetId>>,
}

impl Inventory {
    pub fn push(&mut self, asset_type: AssetTypeId, asset_id: AssetId) {
        self.units.entry(asset_type).or_default().push_back(asset_id);
    }

    /// Oldest free unit of `asset_type`, left in place
    pub fn peek(&self, asset_type: AssetTypeId) -> Option<AssetId> {
        self.units.get(&asset_type)?.front().copied()
    }

    /// Remove and return the oldest free unit of `asset_type`
    pub fn take(&mut self, asset_type: AssetTypeId) -> Option<AssetId> {
        let queue = self.units.get_mut(&asset_type)?;
        let asset_id = queue.pop_front();
        if queue.is_empty() {
            self.units.remove(&asset_type);
        }
        asset_id
    }

    pub fn count(&self, asset_type: AssetTypeId) -> usize {
        self.units.get(&asset_type).map_or(0, VecDeque::len)
    }

    pub fn contains(&self, asset_type: AssetTypeId, asset_id: AssetId) -> bool {
        self.units
            .get(&asset_type)
            .is_some_and(|queue| queue.contains(&asset_id))
    }

    pub fn total(&self) -> usize {
        self.units.values().map(VecDeque::len).sum()
    }

    /// `(asset_type, asset_id)` pairs, by type then oldest first
    pub fn iter(&self) -> impl Iterator<Item = (AssetTypeId, AssetId)> + '_ {
        self.units
            .iter()
            .flat_map(|(&asset_type, queue)| queue.iter().map(move |&id| (asset_type, id)))
    }
}

// ============================================================================
// Participant
// ============================================================================

#[derive(Debug, Clone)]
pub enum Participant {
    Dealer(Dealer),
    Trader(Trader),
}

impl Participant {
    pub fn id(&self) -> ParticipantId {
        match self {
            Participant::Dealer(dealer) => dealer.id,
            Participant::Trader(trader) => trader.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Participant::Dealer(dealer) => &dealer.name,
            Participant::Trader(trader) => &trader.name,
        }
    }

    #[inline]
    pub fn is_dealer(&self) -> bool {
        matches!(self, Participant::Dealer(_))
    }

    /// Whether this participant keeps a sell-side ledger
    #[inline]
    pub fn supports_sell_tracking(&self) -> bool {
        match self {
            Participant::Dealer(_) => false,
            Participant::Trader(_) => true,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        match self {
            Participant::Dealer(dealer) => &dealer.inventory,
            Participant::Trader(trader) => &trader.inventory,
        }
    }

    /// Unit the next `take_free_asset` call would hand out
    pub fn peek_free_asset(&self, asset_type: AssetTypeId) -> Option<AssetId> {
        self.inventory().peek(asset_type)
    }

    /// Commit one free unit of `asset_type` to a settlement
    pub fn take_free_asset(&mut self, asset_type: AssetTypeId) -> Option<AssetId> {
        match self {
            Participant::Dealer(dealer) => dealer.inventory.take(asset_type),
            Participant::Trader(trader) => trader.inventory.take(asset_type),
        }
    }

    pub fn process_buy_order(&mut self, asset_type: AssetTypeId, asset_id: AssetId, price: u64) {
        match self {
            Participant::Dealer(dealer) => dealer.process_buy_order(asset_type, asset_id, price),
            Participant::Trader(trader) => trader.process_buy_order(asset_type, asset_id, price),
        }
    }

    /// Record a filled sell. Dealers keep no sell ledger, so this only reaches traders.
    pub fn process_sell_order(&mut self, asset_type: AssetTypeId, asset_id: AssetId, price: u64) {
        if let Participant::Trader(trader) = self {
            trader.process_sell_order(asset_type, asset_id, price);
        }
    }

    pub fn as_trader(&self) -> Option<&Trader> {
        match self {
            Participant::Trader(trader) => Some(trader),
            Participant::Dealer(_) => None,
        }
    }

    pub fn as_dealer(&self) -> Option<&Dealer> {
        match self {
            Participant::Dealer(dealer) => Some(dealer),
            Participant::Trader(_) => None,
        }
    }
}

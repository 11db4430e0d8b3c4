use rust_decimal::Decimal;

use crate::participant::Inventory;
use crate::types::price::fixed_to_decimal;
use crate::types::{AssetId, AssetTypeId, ParticipantId};

/// Ordinary participant that buys and resells.
///
/// Cash starts at zero and may go negative; budgets belong to whatever
/// constructs the trader's offers.
#[derive(Debug, Clone)]
pub struct Trader {
    pub id: ParticipantId,
    pub name: String,

    /// Owned units not yet committed to a settlement
    pub inventory: Inventory,

    /// Net cash from fills
    pub cash: Decimal,

    pub buy_fills: u64,
    pub sell_fills: u64,
}

impl Trader {
    pub fn new(id: ParticipantId, name: String) -> Self {
        Self {
            id,
            name,
            inventory: Inventory::default(),
            cash: Decimal::ZERO,
            buy_fills: 0,
            sell_fills: 0,
        }
    }

    pub fn process_buy_order(&mut self, asset_type: AssetTypeId, asset_id: AssetId, price: u64) {
        self.inventory.push(asset_type, asset_id);
        self.cash -= fixed_to_decimal(price);
        self.buy_fills += 1;
    }

    /// The unit was already taken out of `inventory` when it was committed.
    pub fn process_sell_order(&mut self, _asset_type: AssetTypeId, _asset_id: AssetId, price: u64) {
        self.cash += fixed_to_decimal(price);
        self.sell_fills += 1;
    }

    /// Units of `asset_type` currently held
    pub fn position(&self, asset_type: AssetTypeId) -> usize {
        self.inventory.count(asset_type)
    }
}

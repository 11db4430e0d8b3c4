use crate::participant::Inventory;
use crate::types::{AssetId, AssetTypeId, ParticipantId};

/// Issuer and initial market-maker for one asset type.
///
/// Every minted unit starts in `inventory` with a standing sell offer. The
/// dealer is told about buys but never about sells.
#[derive(Debug, Clone)]
pub struct Dealer {
    pub id: ParticipantId,
    pub name: String,

    /// Asset type this dealer issued
    pub asset_type: AssetTypeId,

    /// Units still available to sell
    pub inventory: Inventory,

    pub units_bought: u64,
}

impl Dealer {
    pub fn new(id: ParticipantId, name: String, asset_type: AssetTypeId) -> Self {
        Self {
            id,
            name,
            asset_type,
            inventory: Inventory::default(),
            units_bought: 0,
        }
    }

    /// List a freshly minted unit for sale
    pub fn stock(&mut self, asset_id: AssetId) {
        self.inventory.push(self.asset_type, asset_id);
    }

    pub fn process_buy_order(&mut self, asset_type: AssetTypeId, asset_id: AssetId, _price: u64) {
        self.inventory.push(asset_type, asset_id);
        self.units_bought += 1;
    }
}

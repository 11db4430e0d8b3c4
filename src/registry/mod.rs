//! Asset registry: minting, identity and ownership.
//!
//! The market never owns assets itself. It is handed a registry at
//! construction and goes through [`AssetRegistry`] for every mint and every
//! ownership transfer.

mod memory;

pub use memory::InMemoryRegistry;

use crate::error::Result;
use crate::types::{Asset, AssetId, AssetTypeId, ParticipantId};

/// Ownership ledger consumed by the market engine.
pub trait AssetRegistry {
    /// Allocate a fresh asset type issued by `issuer`
    fn register_asset_type(&mut self, issuer: ParticipantId) -> AssetTypeId;

    /// Mint one unit of `asset_type` owned by `owner`
    fn create_asset(&mut self, owner: ParticipantId, asset_type: AssetTypeId) -> Result<Asset>;

    /// Reassign `asset_id` to `new_owner` in a single step
    fn change_owner(&mut self, asset_id: AssetId, new_owner: ParticipantId) -> Result<()>;

    fn asset(&self, asset_id: AssetId) -> Option<&Asset>;

    fn issuer_of(&self, asset_type: AssetTypeId) -> Option<ParticipantId>;

    /// Current owner of `asset_id`, if it exists
    fn owner_of(&self, asset_id: AssetId) -> Option<ParticipantId> {
        self.asset(asset_id).map(|asset| asset.owner)
    }
}

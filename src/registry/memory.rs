//! Slab-backed in-process registry.
//!
//! Assets are never burned, so slab keys are never reused and double as
//! asset ids.

use slab::Slab;
use tracing::debug;

use crate::error::{MarketError, Result};
use crate::registry::AssetRegistry;
use crate::types::{Asset, AssetId, AssetTypeId, ParticipantId};

#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    /// Asset storage, key = asset id
    assets: Slab<Asset>,

    /// Issuer per asset type, index = asset type id
    issuers: Vec<ParticipantId>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(asset_capacity: usize) -> Self {
        Self {
            assets: Slab::with_capacity(asset_capacity),
            issuers: Vec::new(),
        }
    }

    /// Number of assets minted so far
    #[inline]
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    #[inline]
    pub fn asset_type_count(&self) -> usize {
        self.issuers.len()
    }

    /// All assets of `asset_type` currently owned by `owner`
    pub fn holdings_of(&self, owner: ParticipantId, asset_type: AssetTypeId) -> Vec<AssetId> {
        self.assets
            .iter()
            .filter(|(_, asset)| asset.owner == owner && asset.asset_type == asset_type)
            .map(|(key, _)| key as AssetId)
            .collect()
    }
}

impl AssetRegistry for InMemoryRegistry {
    fn register_asset_type(&mut self, issuer: ParticipantId) -> AssetTypeId {
        self.issuers.push(issuer);
        (self.issuers.len() - 1) as AssetTypeId
    }

    fn create_asset(&mut self, owner: ParticipantId, asset_type: AssetTypeId) -> Result<Asset> {
        if asset_type as usize >= self.issuers.len() {
            return Err(MarketError::UnknownAssetType(asset_type));
        }

        let entry = self.assets.vacant_entry();
        let asset = Asset::new(entry.key() as AssetId, asset_type, owner);
        entry.insert(asset);
        Ok(asset)
    }

    fn change_owner(&mut self, asset_id: AssetId, new_owner: ParticipantId) -> Result<()> {
        let asset = self
            .assets
            .get_mut(asset_id as usize)
            .ok_or(MarketError::UnknownAsset(asset_id))?;

        debug!(asset_id, from = asset.owner, to = new_owner, "ownership transfer");
        asset.owner = new_owner;
        Ok(())
    }

    fn asset(&self, asset_id: AssetId) -> Option<&Asset> {
        self.assets.get(asset_id as usize)
    }

    fn issuer_of(&self, asset_type: AssetTypeId) -> Option<ParticipantId> {
        self.issuers.get(asset_type as usize).copied()
    }
}

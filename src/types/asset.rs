//! Asset records held by the registry.

use crate::types::{AssetId, AssetTypeId, ParticipantId};

/// One unique, indivisible unit of an asset type.
///
/// The registry holds the authoritative copy; `owner` changes only through
/// [`AssetRegistry::change_owner`](crate::registry::AssetRegistry::change_owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    pub id: AssetId,
    pub asset_type: AssetTypeId,
    pub owner: ParticipantId,
}

impl Asset {
    pub fn new(id: AssetId, asset_type: AssetTypeId, owner: ParticipantId) -> Self {
        Self { id, asset_type, owner }
    }

    #[inline]
    pub fn is_owned_by(&self, participant: ParticipantId) -> bool {
        self.owner == participant
    }
}

//! Last settled price per asset type.

use std::collections::BTreeMap;

use crate::error::{MarketError, Result};
use crate::types::AssetTypeId;

/// Asset type → last settlement price (fixed-point).
///
/// Keys are only ever added; each trade overwrites the value. No history is
/// kept.
#[derive(Debug, Clone, Default)]
pub struct PriceTracker {
    prices: BTreeMap<AssetTypeId, u64>,
}

impl PriceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_latest_price(&mut self, asset_type: AssetTypeId, price: u64) {
        self.prices.insert(asset_type, price);
    }

    /// Fails when nothing has ever been recorded for `asset_type`
    pub fn latest_price(&self, asset_type: AssetTypeId) -> Result<u64> {
        self.get(asset_type)
            .ok_or(MarketError::UntrackedAssetType { asset_type })
    }

    #[inline]
    pub fn get(&self, asset_type: AssetTypeId) -> Option<u64> {
        self.prices.get(&asset_type).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Entries in ascending asset type order
    pub fn iter(&self) -> impl Iterator<Item = (AssetTypeId, u64)> + '_ {
        self.prices.iter().map(|(&asset_type, &price)| (asset_type, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_lookup_fails() {
        let tracker = PriceTracker::new();
        assert_eq!(
            tracker.latest_price(4),
            Err(MarketError::UntrackedAssetType { asset_type: 4 })
        );
    }

    #[test]
    fn test_overwrite() {
        let mut tracker = PriceTracker::new();
        tracker.set_latest_price(0, 500);
        tracker.set_latest_price(0, 700);

        assert_eq!(tracker.latest_price(0), Ok(700));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_iter_sorted() {
        let mut tracker = PriceTracker::new();
        tracker.set_latest_price(3, 30);
        tracker.set_latest_price(1, 10);

        assert_eq!(tracker.iter().collect::<Vec<_>>(), vec![(1, 10), (3, 30)]);
    }
}

//! Summary of one matching pass.
//!
//! A `PassReceipt` is stamped with the market's state root after the pass,
//! so two runs over the same input can be compared by receipt alone.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

/// Receipt for a single `process_all_offers` call.
///
/// ## Example
///
/// ```
/// use offer_market::types::PassReceipt;
///
/// let receipt = PassReceipt::new(1, 2, 3, 0, [0xAB; 32]);
/// assert_eq!(receipt.state_root_hex().len(), 64);
/// assert!(!receipt.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct PassReceipt {
    /// Pass sequence number (per market, starting at 1)
    pub pass_id: u64,

    /// Trades settled in this pass
    pub trades_executed: u64,

    /// Pool sizes once processed sells were swept
    pub sell_offers_remaining: u64,
    pub buy_offers_remaining: u64,

    /// SHA-256 over pools and price tracker after the pass
    pub state_root: [u8; 32],
}

impl PassReceipt {
    pub fn new(
        pass_id: u64,
        trades_executed: u64,
        sell_offers_remaining: u64,
        buy_offers_remaining: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            pass_id,
            trades_executed,
            sell_offers_remaining,
            buy_offers_remaining,
            state_root,
        }
    }

    /// SHA-256 of arbitrary bytes as a 32-byte root
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// True when the pass settled nothing
    pub fn is_empty(&self) -> bool {
        self.trades_executed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_hex() {
        let receipt = PassReceipt::new(1, 0, 0, 0, [0xAB; 32]);
        let hex = receipt.state_root_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abab"));
    }

    #[test]
    fn test_receipt_is_empty() {
        assert!(PassReceipt::new(1, 0, 5, 5, [0u8; 32]).is_empty());
        assert!(!PassReceipt::new(1, 1, 5, 5, [0u8; 32]).is_empty());
    }

    #[test]
    fn test_hash_determinism() {
        let a = PassReceipt::compute_hash(b"pool state");
        let b = PassReceipt::compute_hash(b"pool state");
        let c = PassReceipt::compute_hash(b"other state");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_receipt_ssz_size() {
        let bytes = ssz_rs::serialize(&PassReceipt::default()).expect("Failed to serialize");
        // 8 + 8 + 8 + 8 + 32
        assert_eq!(bytes.len(), 64);
    }
}

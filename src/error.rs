//! Error taxonomy for the offer market.
//!
//! Lookup failures are returned to the caller. Settlement failures mean the
//! pools and participant inventories disagree, so they are fatal: the market
//! halts and refuses further matching passes.

use thiserror::Error;

use crate::types::Trade;

/// Top-level market error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// No trade has ever settled (or been seeded) for this asset type
    #[error("no price recorded for asset type {asset_type}")]
    UntrackedAssetType { asset_type: u64 },

    /// A matched seller holds no free unit of the matched asset type
    #[error("participant {participant} has no free asset of type {asset_type}")]
    NoFreeAsset { participant: u64, asset_type: u64 },

    #[error("unknown participant: {0}")]
    UnknownParticipant(u64),

    #[error("unknown asset: {0}")]
    UnknownAsset(u64),

    #[error("unknown asset type: {0}")]
    UnknownAssetType(u64),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A matching pass stopped on a fatal settlement error. `trades` holds
    /// the settlements applied before `cause`; they are not rolled back.
    #[error("pass {pass_id} aborted after {} settled trades: {cause}", .trades.len())]
    PassAborted {
        pass_id: u64,
        trades: Vec<Trade>,
        cause: Box<MarketError>,
    },

    /// Matching refused after an earlier fatal settlement error
    #[error("market halted: {0}")]
    Halted(String),

    #[error("state encoding failed: {0}")]
    Encoding(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MarketError {
    /// Whether this error leaves the market in a state that must not be matched again
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MarketError::NoFreeAsset { .. }
                | MarketError::UnknownParticipant(_)
                | MarketError::UnknownAsset(_)
                | MarketError::PassAborted { .. }
                | MarketError::Halted(_)
        )
    }

    /// The error that stopped a pass, or `self` for any other variant
    pub fn root_cause(&self) -> &MarketError {
        match self {
            MarketError::PassAborted { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MarketError>;

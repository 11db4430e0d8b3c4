//! Market configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```
//! use offer_market::config::MarketConfig;
//!
//! let config = MarketConfig::from_toml_str(r#"
//!     initial_market_size = 3
//!     initial_price = "10.0"
//! "#).unwrap();
//!
//! assert_eq!(config.initial_market_size, 3);
//! assert_eq!(config.initial_price_fixed().unwrap(), 1_000_000_000);
//! assert_eq!(config.transaction_limit, 10);
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{MarketError, Result};
use crate::types::price::decimal_to_fixed;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Units minted by `initialize_market`
    pub initial_market_size: usize,

    /// Price of the dealer's seed offers and the tracker's first entry
    pub initial_price: Decimal,

    /// Upper bound on trades per matching pass
    pub transaction_limit: usize,

    /// Pre-allocated slots per offer pool
    pub pool_capacity: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            initial_market_size: 20,
            initial_price: Decimal::new(5, 0),
            transaction_limit: 10,
            pool_capacity: 1024,
        }
    }
}

impl MarketConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MarketError::Config(e.to_string()))
    }

    /// `initial_price` as a fixed-point value
    pub fn initial_price_fixed(&self) -> Result<u64> {
        match decimal_to_fixed(self.initial_price) {
            Some(price) if price > 0 => Ok(price),
            _ => Err(MarketError::InvalidPrice(self.initial_price.to_string())),
        }
    }
}

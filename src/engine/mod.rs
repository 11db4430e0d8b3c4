//! Market engine for the offer market.
//!
//! ## Matching Rules
//!
//! - **First-fit, not best-price**: each sell offer (in pool order) takes the
//!   first buy offer (in pool order) with the same asset type and a maximum
//!   at or above the sell's minimum
//! - **One unit per offer**: a matched buy is removed at once; matched sells
//!   are swept when the pass ends
//! - **Midpoint settlement**: price = (buy max + sell min) / 2
//! - **Clearing**: drops all buys and every non-dealer sell
//!
//! ## Example
//!
//! ```
//! use offer_market::engine::Market;
//! use offer_market::types::price::to_fixed;
//!
//! let mut market: Market = Market::default();
//! let (_, asset_type) = market.initialize_market(3, to_fixed("10.0").unwrap()).unwrap();
//!
//! let alice = market.register_trader("alice");
//! let bid = market
//!     .offer_factory_mut()
//!     .buy(alice, asset_type, to_fixed("12.0").unwrap())
//!     .unwrap();
//! market.submit_buy(bid);
//!
//! let result = market.process_all_offers(10).unwrap();
//! assert_eq!(result.trades.len(), 1);
//! assert_eq!(market.latest_price(asset_type), Ok(to_fixed("11.0").unwrap()));
//! assert_eq!(market.sell_offers().len(), 2);
//! ```

pub mod market;
pub mod tracker;

pub use market::{Market, MatchResult};
pub use tracker::PriceTracker;

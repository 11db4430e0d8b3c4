//! Offer market - demo driver
//!
//! Seeds a dealer, registers a handful of traders and runs a few market
//! cycles with stepped bids and trader resales.
//!
//! ```bash
//! RUST_LOG=debug cargo run -- market.toml
//! ```

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use offer_market::types::price::{from_fixed_trimmed, SCALE};
use offer_market::{Market, MarketConfig, MarketError, Participant};

const TRADERS: [&str; 4] = ["alice", "bob", "carol", "dave"];
const CYCLES: u64 = 5;

fn load_config() -> Result<MarketConfig, MarketError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| MarketError::Config(format!("{}: {}", path, e)))?;
            MarketConfig::from_toml_str(&text)
        }
        None => Ok(MarketConfig::default()),
    }
}

fn main() -> Result<(), MarketError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let initial_price = config.initial_price_fixed()?;

    let mut market = Market::from_config(offer_market::InMemoryRegistry::new(), &config);
    let (_, asset_type) = market.initialize_market(config.initial_market_size, initial_price)?;
    let traders: Vec<u64> = TRADERS.iter().map(|name| market.register_trader(*name)).collect();

    for cycle in 0..CYCLES {
        let last = market.latest_price(asset_type)?;

        for (i, &trader) in traders.iter().enumerate() {
            // Bids step from 10% under to 20% over the last price
            let step = last / 10;
            let bid = last - step + step * (i as u64 + cycle % 2);
            let offer = market.offer_factory_mut().buy(trader, asset_type, bid)?;
            market.submit_buy(offer);

            let held = market
                .participant(trader)
                .and_then(Participant::as_trader)
                .map_or(0, |t| t.position(asset_type));
            if held > 0 {
                let ask = last + SCALE / 4;
                let offer = market.offer_factory_mut().sell(trader, asset_type, ask)?;
                market.submit_sell(offer);
            }
        }

        for line in market.sell_offer_lines().iter().chain(market.buy_offer_lines().iter()) {
            debug!("{}", line);
        }

        let result = market.run_cycle()?;
        let last_price = market.latest_price(asset_type)?;
        info!(
            cycle,
            trades = result.trades.len(),
            last_price = %from_fixed_trimmed(last_price),
            state_root = %result.receipt.state_root_hex(),
            "cycle complete"
        );
    }

    for participant in market.participants() {
        if let Some(trader) = participant.as_trader() {
            info!(
                name = %trader.name,
                units = trader.position(asset_type),
                cash = %trader.cash,
                "final position"
            );
        }
    }

    Ok(())
}

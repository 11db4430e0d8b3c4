//! End-to-end market scenarios: seeding, matching, settlement and clearing.

use offer_market::types::price::to_fixed;
use offer_market::{AssetRegistry, Market, MarketConfig, MarketError, Participant};

fn fx(s: &str) -> u64 {
    to_fixed(s).unwrap()
}

fn post_buy(market: &mut Market, sender: u64, asset_type: u64, max: &str) -> u64 {
    let offer = market.offer_factory_mut().buy(sender, asset_type, fx(max)).unwrap();
    market.submit_buy(offer);
    offer.id
}

fn post_sell(market: &mut Market, sender: u64, asset_type: u64, min: &str) -> u64 {
    let offer = market.offer_factory_mut().sell(sender, asset_type, fx(min)).unwrap();
    market.submit_sell(offer);
    offer.id
}

#[test]
fn seeded_market_settles_at_midpoint() {
    let mut market: Market = Market::default();
    let (dealer, asset_type) = market.initialize_market(3, fx("10.0")).unwrap();
    assert_eq!(market.sell_offers().len(), 3);

    let alice = market.register_trader("alice");
    post_buy(&mut market, alice, asset_type, "12.0");

    let result = market.process_all_offers(10).unwrap();

    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].price, fx("11.0"));
    assert_eq!(market.latest_price(asset_type), Ok(fx("11.0")));
    assert_eq!(market.sell_offers().len(), 2);
    assert!(market.sell_offers().iter().all(|offer| offer.sender == dealer));
    assert!(market.buy_offers().is_empty());

    assert_eq!(result.receipt.trades_executed, 1);
    assert_eq!(result.receipt.sell_offers_remaining, 2);
    assert_eq!(result.receipt.buy_offers_remaining, 0);
}

#[test]
fn incompatible_prices_leave_pools_unchanged() {
    let mut market: Market = Market::default();
    let (dealer, asset_type) = market.initialize_market(1, fx("9.0")).unwrap();
    let alice = market.register_trader("alice");
    post_buy(&mut market, alice, asset_type, "8.0");

    let sells_before: Vec<_> = market.sell_offers().iter().copied().collect();
    let buys_before: Vec<_> = market.buy_offers().iter().copied().collect();

    let result = market.process_all_offers(10).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(market.sell_offers().iter().copied().collect::<Vec<_>>(), sells_before);
    assert_eq!(market.buy_offers().iter().copied().collect::<Vec<_>>(), buys_before);
    assert_eq!(market.latest_price(asset_type), Ok(fx("9.0")));
    assert_eq!(market.participant(dealer).unwrap().inventory().count(asset_type), 1);
}

#[test]
fn transaction_limit_defers_second_pair() {
    let mut market: Market = Market::default();
    let (_, asset_type) = market.initialize_market(2, fx("5.0")).unwrap();
    let alice = market.register_trader("alice");
    let bob = market.register_trader("bob");
    post_buy(&mut market, alice, asset_type, "6.0");
    let deferred = post_buy(&mut market, bob, asset_type, "7.0");

    let first = market.process_all_offers(1).unwrap();
    assert_eq!(first.trades.len(), 1);
    assert_eq!(first.trades[0].buyer, alice);
    assert_eq!(market.sell_offers().len(), 1);
    assert!(market.buy_offers().contains(deferred));

    let second = market.process_all_offers(1).unwrap();
    assert_eq!(second.trades.len(), 1);
    assert_eq!(second.trades[0].buyer, bob);
    assert_eq!(second.trades[0].price, fx("6.0"));
    assert_eq!(second.receipt.pass_id, first.receipt.pass_id + 1);
    assert!(second.trades[0].id > first.trades[0].id);
}

#[test]
fn ownership_moves_to_buyer() {
    let mut market: Market = Market::default();
    let (dealer, asset_type) = market.initialize_market(2, fx("1.0")).unwrap();
    let alice = market.register_trader("alice");
    post_buy(&mut market, alice, asset_type, "1.0");

    let result = market.process_all_offers(10).unwrap();
    let asset_id = result.trades[0].asset_id;

    assert_eq!(market.registry().owner_of(asset_id), Some(alice));
    assert!(!market
        .participant(dealer)
        .unwrap()
        .inventory()
        .contains(asset_type, asset_id));
    assert!(market
        .participant(alice)
        .unwrap()
        .inventory()
        .contains(asset_type, asset_id));
    assert_eq!(market.registry().holdings_of(dealer, asset_type).len(), 1);
}

#[test]
fn clearing_expires_trader_offers() {
    let mut market: Market = Market::default();
    let (dealer, asset_type) = market.initialize_market(2, fx("10.0")).unwrap();
    let alice = market.register_trader("alice");

    post_buy(&mut market, alice, asset_type, "10.0");
    market.process_all_offers(10).unwrap();

    post_sell(&mut market, alice, asset_type, "30.0");
    post_buy(&mut market, alice, asset_type, "2.0");
    assert_eq!(market.sell_offers().len(), 2);

    market.clear_market();

    assert!(market.buy_offers().is_empty());
    assert_eq!(market.sell_offers().len(), 1);
    for offer in market.sell_offers() {
        assert!(matches!(market.participant(offer.sender), Some(Participant::Dealer(_))));
        assert_eq!(offer.sender, dealer);
    }
}

#[test]
fn trader_resale_chain() {
    let mut market: Market = Market::default();
    let (_, asset_type) = market.initialize_market(1, fx("4.0")).unwrap();
    let alice = market.register_trader("alice");
    let bob = market.register_trader("bob");

    post_buy(&mut market, alice, asset_type, "6.0");
    market.run_cycle().unwrap();
    assert_eq!(market.latest_price(asset_type), Ok(fx("5.0")));

    post_sell(&mut market, alice, asset_type, "7.0");
    post_buy(&mut market, bob, asset_type, "8.0");
    let result = market.run_cycle().unwrap();

    assert_eq!(result.trades[0].seller, alice);
    assert_eq!(market.latest_price(asset_type), Ok(fx("7.5")));
    assert_eq!(market.participant(bob).unwrap().as_trader().unwrap().position(asset_type), 1);
    assert_eq!(market.participant(alice).unwrap().as_trader().unwrap().sell_fills, 1);
}

#[test]
fn untracked_asset_type_lookup_fails() {
    let market: Market = Market::default();
    assert_eq!(
        market.latest_price(3),
        Err(MarketError::UntrackedAssetType { asset_type: 3 })
    );
}

#[test]
fn double_listing_is_fatal() {
    let mut market: Market = Market::default();
    let (_, asset_type) = market.initialize_market(1, fx("1.0")).unwrap();
    let alice = market.register_trader("alice");
    let bob = market.register_trader("bob");

    post_buy(&mut market, alice, asset_type, "1.0");
    market.run_cycle().unwrap();

    // alice holds one unit but lists it twice
    post_sell(&mut market, alice, asset_type, "1.0");
    post_sell(&mut market, alice, asset_type, "1.0");
    post_buy(&mut market, bob, asset_type, "2.0");
    post_buy(&mut market, bob, asset_type, "2.0");

    let err = market.process_all_offers(10).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err.root_cause(),
        MarketError::NoFreeAsset { participant, .. } if *participant == alice
    ));

    // The first sale settled, is reported, and its offer was swept
    match &err {
        MarketError::PassAborted { trades, .. } => {
            assert_eq!(trades.len(), 1);
            assert_eq!((trades[0].seller, trades[0].buyer), (alice, bob));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(market.sell_offers().len(), 1);
    assert_eq!(market.buy_offers().len(), 1);
    assert!(market.is_halted());
}

#[test]
fn configured_market_from_toml() {
    let config = MarketConfig::from_toml_str(
        r#"
        initial_market_size = 4
        initial_price = "2.5"
        transaction_limit = 3
        "#,
    )
    .unwrap();

    let mut market = Market::from_config(offer_market::InMemoryRegistry::new(), &config);
    let (_, asset_type) = market
        .initialize_market(config.initial_market_size, config.initial_price_fixed().unwrap())
        .unwrap();
    let alice = market.register_trader("alice");
    for _ in 0..4 {
        post_buy(&mut market, alice, asset_type, "2.5");
    }

    let result = market.run_cycle().unwrap();

    assert_eq!(result.trades.len(), 3);
    assert_eq!(market.sell_offers().len(), 1);
    assert_eq!(market.latest_price(asset_type), Ok(fx("2.5")));
}

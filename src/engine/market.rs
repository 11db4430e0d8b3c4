//! The market engine: offer pools, first-fit matching, settlement, clearing.

use slab::Slab;
use tracing::{debug, error, info};

use crate::config::MarketConfig;
use crate::engine::PriceTracker;
use crate::error::{MarketError, Result};
use crate::participant::{Dealer, Participant, Trader};
use crate::pool::OfferPool;
use crate::registry::{AssetRegistry, InMemoryRegistry};
use crate::types::price::{from_fixed_trimmed, midpoint};
use crate::types::{
    AssetTypeId, Offer, OfferFactory, OfferId, ParticipantId, PassReceipt, Trade,
};

/// Result of one matching pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Trades in settlement order
    pub trades: Vec<Trade>,

    pub receipt: PassReceipt,
}

/// Double-auction market over one asset registry.
///
/// All mutation goes through `&mut self`; a concurrent host must put the
/// whole market behind a single lock since a pass is a scan-then-remove
/// sequence over both pools.
#[derive(Debug)]
pub struct Market<R: AssetRegistry = InMemoryRegistry> {
    registry: R,
    offer_factory: OfferFactory,

    sell_offers: OfferPool,
    buy_offers: OfferPool,

    /// Key = participant id
    participants: Slab<Participant>,

    /// One per dealer, in registration order
    asset_types: Vec<AssetTypeId>,

    price_tracker: PriceTracker,

    /// Limit used by `run_cycle`
    transaction_limit: usize,

    next_trade_id: u64,
    next_pass_id: u64,

    /// Set by the first fatal settlement error
    halted: Option<String>,
}

impl Default for Market<InMemoryRegistry> {
    fn default() -> Self {
        Self::new(InMemoryRegistry::new())
    }
}

impl<R: AssetRegistry> Market<R> {
    pub fn new(registry: R) -> Self {
        Self::from_config(registry, &MarketConfig::default())
    }

    pub fn from_config(registry: R, config: &MarketConfig) -> Self {
        Self {
            registry,
            offer_factory: OfferFactory::new(),
            sell_offers: OfferPool::with_capacity(config.pool_capacity),
            buy_offers: OfferPool::with_capacity(config.pool_capacity),
            participants: Slab::new(),
            asset_types: Vec::new(),
            price_tracker: PriceTracker::new(),
            transaction_limit: config.transaction_limit,
            next_trade_id: 1,
            next_pass_id: 1,
            halted: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn offer_factory_mut(&mut self) -> &mut OfferFactory {
        &mut self.offer_factory
    }

    pub fn price_tracker(&self) -> &PriceTracker {
        &self.price_tracker
    }

    /// Last settled (or seeded) price for `asset_type`
    pub fn latest_price(&self, asset_type: AssetTypeId) -> Result<u64> {
        self.price_tracker.latest_price(asset_type)
    }

    pub fn sell_offers(&self) -> &OfferPool {
        &self.sell_offers
    }

    pub fn buy_offers(&self) -> &OfferPool {
        &self.buy_offers
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id as usize)
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.participants.iter().map(|(_, participant)| participant)
    }

    /// Distinct asset types, one per dealer
    pub fn asset_types(&self) -> &[AssetTypeId] {
        &self.asset_types
    }

    #[inline]
    pub fn transaction_limit(&self) -> usize {
        self.transaction_limit
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn halt_reason(&self) -> Option<&str> {
        self.halted.as_deref()
    }

    // ========================================================================
    // Participants
    // ========================================================================

    pub fn register_trader(&mut self, name: impl Into<String>) -> ParticipantId {
        let entry = self.participants.vacant_entry();
        let id = entry.key() as ParticipantId;
        let trader = Trader::new(id, name.into());
        debug!(participant = id, name = %trader.name, "trader registered");
        entry.insert(Participant::Trader(trader));
        id
    }

    /// Register a dealer issuing a fresh asset type, mint `size` units, and
    /// post one sell offer per unit at `initial_price`.
    ///
    /// The price tracker is seeded with `initial_price` for the new type.
    pub fn initialize_market(
        &mut self,
        size: usize,
        initial_price: u64,
    ) -> Result<(ParticipantId, AssetTypeId)> {
        if initial_price == 0 {
            return Err(MarketError::InvalidPrice(
                "initial price must be non-zero".to_string(),
            ));
        }

        let entry = self.participants.vacant_entry();
        let dealer_id = entry.key() as ParticipantId;
        let asset_type = self.registry.register_asset_type(dealer_id);
        let mut dealer = Dealer::new(
            dealer_id,
            format!("Dealer-{}", self.asset_types.len()),
            asset_type,
        );

        for _ in 0..size {
            let asset = self.registry.create_asset(dealer_id, asset_type)?;
            dealer.stock(asset.id);
            let offer = self.offer_factory.sell(dealer_id, asset_type, initial_price)?;
            self.sell_offers.push_back(offer);
        }

        info!(
            dealer = dealer_id,
            asset_type,
            size,
            price = %from_fixed_trimmed(initial_price),
            "market initialized"
        );

        entry.insert(Participant::Dealer(dealer));
        self.asset_types.push(asset_type);
        self.price_tracker.set_latest_price(asset_type, initial_price);

        Ok((dealer_id, asset_type))
    }

    // ========================================================================
    // Pool management
    // ========================================================================

    pub fn submit_sell(&mut self, offer: Offer) {
        debug!(offer = offer.id, sender = offer.sender, "sell offer submitted");
        self.sell_offers.push_back(offer);
    }

    pub fn submit_buy(&mut self, offer: Offer) {
        debug!(offer = offer.id, sender = offer.sender, "buy offer submitted");
        self.buy_offers.push_back(offer);
    }

    /// Remove the first sell offer with `offer_id`; unknown ids are ignored
    pub fn remove_sell(&mut self, offer_id: OfferId) -> Option<Offer> {
        self.sell_offers.remove_by_id(offer_id)
    }

    /// Remove the first buy offer with `offer_id`; unknown ids are ignored
    pub fn remove_buy(&mut self, offer_id: OfferId) -> Option<Offer> {
        self.buy_offers.remove_by_id(offer_id)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Run one first-fit matching pass.
    ///
    /// Sells are visited in pool order; each takes the first buy (in pool
    /// order) of the same asset type whose maximum is at least the sell's
    /// minimum. A better-priced buy further back is not considered.
    ///
    /// The limit is checked after each match, so a limit of zero still lets
    /// the first match through.
    ///
    /// # Errors
    ///
    /// Any settlement failure is fatal. Sells settled earlier in the pass are
    /// swept and their trades are returned inside
    /// [`MarketError::PassAborted`]; the market halts and later calls return
    /// [`MarketError::Halted`].
    pub fn process_all_offers(&mut self, transaction_limit: usize) -> Result<MatchResult> {
        if let Some(reason) = &self.halted {
            return Err(MarketError::Halted(reason.clone()));
        }

        let mut processed: Vec<usize> = Vec::new();
        let mut trades = Vec::new();
        let mut failure = None;

        let mut cursor = self.sell_offers.head();
        while let Some(sell_key) = cursor {
            cursor = self.sell_offers.next_key(sell_key);
            let Some(&sell) = self.sell_offers.get(sell_key) else {
                break;
            };

            let Some(buy_key) = self.buy_offers.find_first(|buy| sell.crosses(buy)) else {
                continue;
            };
            let Some(&buy) = self.buy_offers.get(buy_key) else {
                continue;
            };

            match self.settle(&buy, &sell) {
                Ok(trade) => trades.push(trade),
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
            processed.push(sell_key);
            self.buy_offers.remove(buy_key);

            if processed.len() >= transaction_limit {
                break;
            }
        }

        // Slab keys are stable, so sweep order is irrelevant
        for key in processed {
            self.sell_offers.remove(key);
        }

        let pass_id = self.next_pass_id;
        self.next_pass_id += 1;

        if let Some(cause) = failure {
            self.halt(&cause);
            return Err(MarketError::PassAborted {
                pass_id,
                trades,
                cause: Box::new(cause),
            });
        }

        let receipt = PassReceipt::new(
            pass_id,
            trades.len() as u64,
            self.sell_offers.len() as u64,
            self.buy_offers.len() as u64,
            self.compute_state_root()?,
        );

        info!(
            pass = pass_id,
            trades = trades.len(),
            sells = self.sell_offers.len(),
            buys = self.buy_offers.len(),
            "matching pass complete"
        );

        Ok(MatchResult { trades, receipt })
    }

    /// Settle one matched pair: move a free unit from seller to buyer at the
    /// midpoint of the two bounds and record the price.
    ///
    /// The caller owns both offers; neither pool is touched. A failure halts
    /// the market just as it would inside a pass.
    pub fn process_offer(&mut self, buy_offer: &Offer, sell_offer: &Offer) -> Result<Trade> {
        if let Some(reason) = &self.halted {
            return Err(MarketError::Halted(reason.clone()));
        }

        match self.settle(buy_offer, sell_offer) {
            Ok(trade) => Ok(trade),
            Err(err) => {
                self.halt(&err);
                Err(err)
            }
        }
    }

    /// Every fallible step runs before the first mutation, so an error
    /// leaves registry, inventories and tracker untouched.
    fn settle(&mut self, buy_offer: &Offer, sell_offer: &Offer) -> Result<Trade> {
        let buyer = buy_offer.sender;
        let seller = sell_offer.sender;

        if !self.participants.contains(buyer as usize) {
            return Err(MarketError::UnknownParticipant(buyer));
        }

        let asset_id = self
            .participants
            .get(seller as usize)
            .ok_or(MarketError::UnknownParticipant(seller))?
            .peek_free_asset(sell_offer.asset_type)
            .ok_or(MarketError::NoFreeAsset {
                participant: seller,
                asset_type: sell_offer.asset_type,
            })?;
        let asset_type = self
            .registry
            .asset(asset_id)
            .ok_or(MarketError::UnknownAsset(asset_id))?
            .asset_type;

        self.registry.change_owner(asset_id, buyer)?;
        let taken = self.participants[seller as usize].take_free_asset(sell_offer.asset_type);
        debug_assert_eq!(taken, Some(asset_id));

        let price = midpoint(buy_offer.price_bound, sell_offer.price_bound);
        self.price_tracker.set_latest_price(asset_type, price);

        self.participants[buyer as usize].process_buy_order(asset_type, asset_id, price);

        let seller_entry = &mut self.participants[seller as usize];
        if seller_entry.supports_sell_tracking() {
            seller_entry.process_sell_order(asset_type, asset_id, price);
        }

        let trade = Trade {
            id: self.next_trade_id,
            buy_offer_id: buy_offer.id,
            sell_offer_id: sell_offer.id,
            buyer,
            seller,
            asset_id,
            asset_type,
            price,
        };
        self.next_trade_id += 1;

        debug!(
            trade = trade.id,
            buyer,
            seller,
            asset_id,
            price = %from_fixed_trimmed(price),
            "trade settled"
        );

        Ok(trade)
    }

    fn halt(&mut self, cause: &MarketError) {
        error!(error = %cause, "settlement failed, halting market");
        self.halted = Some(cause.to_string());
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Drop every buy offer and every sell offer not posted by a dealer
    pub fn clear_market(&mut self) {
        let buys_dropped = self.buy_offers.len();
        let sells_before = self.sell_offers.len();

        self.buy_offers.clear();
        let participants = &self.participants;
        self.sell_offers.retain(|offer| {
            participants
                .get(offer.sender as usize)
                .is_some_and(Participant::is_dealer)
        });

        info!(
            buys_dropped,
            sells_dropped = sells_before - self.sell_offers.len(),
            "market cleared"
        );
    }

    /// One tick: a matching pass at the configured limit, then clearing
    pub fn run_cycle(&mut self) -> Result<MatchResult> {
        let result = self.process_all_offers(self.transaction_limit)?;
        self.clear_market();
        Ok(result)
    }

    // ========================================================================
    // State
    // ========================================================================

    /// SHA-256 over the SSZ encoding of every sell offer, every buy offer
    /// (both in pool order), each `(asset_type, price)` tracker entry, then
    /// `(participant, asset_id, registry owner)` for every held unit.
    pub fn compute_state_root(&self) -> Result<[u8; 32]> {
        let mut buffer = Vec::with_capacity(
            (self.sell_offers.len() + self.buy_offers.len()) * 33 + self.price_tracker.len() * 16,
        );

        for offer in self.sell_offers.iter().chain(self.buy_offers.iter()) {
            let bytes = ssz_rs::serialize(offer)
                .map_err(|e| MarketError::Encoding(format!("{:?}", e)))?;
            buffer.extend_from_slice(&bytes);
        }

        for (asset_type, price) in self.price_tracker.iter() {
            buffer.extend_from_slice(&asset_type.to_le_bytes());
            buffer.extend_from_slice(&price.to_le_bytes());
        }

        for participant in self.participants() {
            for (_, asset_id) in participant.inventory().iter() {
                let owner = self
                    .registry
                    .owner_of(asset_id)
                    .ok_or(MarketError::UnknownAsset(asset_id))?;
                buffer.extend_from_slice(&participant.id().to_le_bytes());
                buffer.extend_from_slice(&asset_id.to_le_bytes());
                buffer.extend_from_slice(&owner.to_le_bytes());
            }
        }

        Ok(PassReceipt::compute_hash(&buffer))
    }

    // ========================================================================
    // Display
    // ========================================================================

    fn participant_name(&self, id: ParticipantId) -> String {
        self.participant(id)
            .map(|participant| participant.name().to_string())
            .unwrap_or_else(|| format!("participant-{}", id))
    }

    pub fn sell_offer_lines(&self) -> Vec<String> {
        self.sell_offers
            .iter()
            .map(|offer| {
                format!(
                    "{} offers asset {} to sell for at least {}",
                    self.participant_name(offer.sender),
                    offer.asset_type,
                    from_fixed_trimmed(offer.price_bound)
                )
            })
            .collect()
    }

    pub fn buy_offer_lines(&self) -> Vec<String> {
        self.buy_offers
            .iter()
            .map(|offer| {
                format!(
                    "{} offers to buy asset {} for at most {}",
                    self.participant_name(offer.sender),
                    offer.asset_type,
                    from_fixed_trimmed(offer.price_bound)
                )
            })
            .collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

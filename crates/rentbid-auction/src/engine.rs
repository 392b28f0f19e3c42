use std::sync::Arc;

use rentbid_registry::{load_owner, require_participant};
use rentbid_store::{Invocation, LedgerStore, Transaction};
use rentbid_types::{AuctionKey, EntityKind, LedgerTimestamp, ParticipantId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auction::{Auction, Settlement};
use crate::balance::check_funds;
use crate::bid::{bid_key, Bid, DuplicateBidKey};
use crate::config::AuctionConfig;
use crate::error::{AuctionError, AuctionResult};

/// A bid that made it into the auction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedBid {
    pub bid_key: String,
    pub offered: u64,
    /// The auction's clearing price after admission.
    pub clearing_price: u64,
    pub highest_bid: u64,
}

/// Auction lifecycle: creation, bid admission, query, and settlement.
///
/// Every method is one ledger transaction. State is re-read from the store
/// on each call and written back only after every check has passed, so a
/// failed call leaves the ledger exactly as it found it.
pub struct AuctionEngine<S: LedgerStore> {
    store: Arc<S>,
    config: AuctionConfig,
}

impl<S: LedgerStore> AuctionEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, AuctionConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: AuctionConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    /// Open a new auction under `key` on behalf of a registered owner.
    pub fn create_auction(
        &self,
        key: &AuctionKey,
        owner: &ParticipantId,
        bot_type: &str,
        start_price: u64,
        expiration_time: LedgerTimestamp,
    ) -> AuctionResult<AuctionKey> {
        let mut tx = Transaction::begin(self.store.as_ref());
        load_owner(&mut tx, owner)?;
        if tx.exists(key.as_str())? {
            return Err(AuctionError::AlreadyExists {
                kind: EntityKind::Auction,
                id: key.to_string(),
            });
        }

        let auction = Auction::open(
            owner.clone(),
            bot_type,
            start_price,
            self.config.default_step.get(),
            expiration_time,
        );
        tx.put_json(key.as_str(), &auction)?;
        tx.commit()?;

        info!(
            auction = %key,
            owner = %owner,
            start_price,
            expires = %auction.expiration_time,
            "auction created"
        );
        Ok(key.clone())
    }

    /// Admit a renter's bid.
    ///
    /// Checks, in order: the renter exists, the auction exists and is open,
    /// the invocation time is before the deadline, the price clears
    /// `final_bid + step`, and the renter can pay the resulting clearing
    /// price. Prices are only committed together with the new bid record.
    pub fn join_auction(
        &self,
        invocation: &Invocation,
        key: &AuctionKey,
        offered: u64,
        wallet: &str,
        renter: &ParticipantId,
    ) -> AuctionResult<AcceptedBid> {
        let mut tx = Transaction::begin(self.store.as_ref());
        require_participant(&mut tx, renter)?;
        let mut auction = load_auction(&mut tx, key)?;

        if !auction.is_open() {
            return Err(AuctionError::Closed(key.to_string()));
        }
        if auction.is_expired_at(invocation.timestamp()) {
            debug!(auction = %key, now = %invocation.timestamp(), "bid after deadline");
            return Err(AuctionError::Expired {
                auction: key.to_string(),
                expired_at: auction.expiration_time.clone(),
            });
        }

        let update = auction.quote(offered).ok_or_else(|| {
            debug!(auction = %key, offered, final_bid = auction.final_bid, "bid below threshold");
            AuctionError::InvalidBid {
                offered,
                minimum: auction.minimum_acceptable(),
            }
        })?;

        let funds = check_funds(&mut tx, update.final_bid, renter)?;
        if funds.is_insufficient() {
            warn!(
                auction = %key,
                renter = %renter,
                required = update.final_bid,
                "insufficient funds"
            );
            return Err(AuctionError::InsufficientFunds {
                renter: renter.to_string(),
                balance: funds.balance,
                required: funds.required,
            });
        }

        let bid_key = bid_key(key, invocation.id())?;
        auction.apply(update);
        auction
            .bids
            .insert(
                bid_key.clone(),
                Bid {
                    bidder: renter.clone(),
                    price: offered,
                    wallet: wallet.to_string(),
                },
            )
            .map_err(|DuplicateBidKey(k)| AuctionError::DuplicateBid(k))?;

        tx.put_json(key.as_str(), &auction)?;
        tx.commit()?;

        debug!(
            auction = %key,
            renter = %renter,
            offered,
            highest_bid = auction.highest_bid,
            final_bid = auction.final_bid,
            "bid admitted"
        );
        Ok(AcceptedBid {
            bid_key,
            offered,
            clearing_price: auction.final_bid,
            highest_bid: auction.highest_bid,
        })
    }

    /// Read an auction.
    pub fn query_auction(&self, key: &AuctionKey) -> AuctionResult<Auction> {
        let mut tx = Transaction::begin(self.store.as_ref());
        load_auction(&mut tx, key)
    }

    /// Close the auction and determine the winner.
    ///
    /// Fails with `NoBids` (leaving the auction open) if nothing was bid.
    /// On an auction that is already closed, returns the recorded outcome
    /// without writing anything.
    pub fn end_auction(&self, key: &AuctionKey) -> AuctionResult<Settlement> {
        let mut tx = Transaction::begin(self.store.as_ref());
        let mut auction = load_auction(&mut tx, key)?;

        if !auction.is_open() {
            return Ok(auction.settle());
        }
        if auction.bids.is_empty() {
            return Err(AuctionError::NoBids(key.to_string()));
        }

        let settlement = auction.settle();
        tx.put_json(key.as_str(), &auction)?;
        tx.commit()?;

        match &settlement.winner {
            Some(winner) => info!(
                auction = %key,
                winner = %winner,
                final_price = settlement.final_price,
                "auction closed"
            ),
            None => info!(
                auction = %key,
                final_price = settlement.final_price,
                "auction closed without sale"
            ),
        }
        Ok(settlement)
    }

    /// Returns `true` if `renter` cannot pay `bid_price`.
    pub fn check_balance(&self, bid_price: u64, renter: &ParticipantId) -> AuctionResult<bool> {
        let mut tx = Transaction::begin(self.store.as_ref());
        Ok(check_funds(&mut tx, bid_price, renter)?.is_insufficient())
    }
}

fn load_auction<S: LedgerStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    key: &AuctionKey,
) -> AuctionResult<Auction> {
    tx.get_json::<Auction>(key.as_str())?
        .ok_or_else(|| AuctionError::NotFound {
            kind: EntityKind::Auction,
            id: key.to_string(),
        })
}

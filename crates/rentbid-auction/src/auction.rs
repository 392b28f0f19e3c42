//! The auction record and its pricing rules.
//!
//! Everything here is pure: the engine loads an [`Auction`], asks it for a
//! [`PriceUpdate`] or a [`Settlement`], and persists the result.

use rentbid_types::{LedgerTimestamp, ParticipantId, NO_PARTICIPANT};
use serde::{Deserialize, Serialize};

use crate::bid::BidBook;

/// Ledger value of `winner` while no winner is recorded. Never a valid
/// participant id, so a recorded winner always reads back as itself.
pub const NO_WINNER: &str = NO_PARTICIPANT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    Open,
    Closed,
}

/// A single ascending auction for renting a bot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub bot_type: String,
    pub owner_id: ParticipantId,
    #[serde(default)]
    pub bids: BidBook,
    pub start_price: u64,
    /// Highest price offered by any admitted bid.
    pub highest_bid: u64,
    /// Clearing price: what the auction currently reports as payable.
    pub final_bid: u64,
    /// Minimum increment over the clearing price.
    pub step: u64,
    pub status: AuctionStatus,
    #[serde(with = "winner_sentinel")]
    pub winner: Option<ParticipantId>,
    pub expiration_time: LedgerTimestamp,
}

/// New prices after admitting a bid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceUpdate {
    pub highest_bid: u64,
    pub final_bid: u64,
}

/// Outcome of closing an auction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub final_price: u64,
    /// `None` means no bid beat the asking price: no sale.
    pub winner: Option<ParticipantId>,
}

impl Auction {
    pub fn open(
        owner_id: ParticipantId,
        bot_type: impl Into<String>,
        start_price: u64,
        step: u64,
        expiration_time: LedgerTimestamp,
    ) -> Self {
        Self {
            bot_type: bot_type.into(),
            owner_id,
            bids: BidBook::new(),
            start_price,
            highest_bid: 0,
            final_bid: start_price,
            step,
            status: AuctionStatus::Open,
            winner: None,
            expiration_time,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == AuctionStatus::Open
    }

    /// An auction accepts bids only strictly before its expiration time.
    pub fn is_expired_at(&self, now: &LedgerTimestamp) -> bool {
        !now.is_before(&self.expiration_time)
    }

    /// Lowest price that clears the step threshold.
    pub fn minimum_acceptable(&self) -> u64 {
        self.final_bid
            .saturating_add(self.step)
            .saturating_add(1)
    }

    /// Prices the auction would report after admitting `offered`.
    ///
    /// Returns `None` if `offered` does not exceed `final_bid + step`.
    ///
    /// A bid at or above the current high becomes the new high, and the
    /// clearing price moves to one step above the previous high, capped by the
    /// new bid. A bid below the current high leaves the high in place and
    /// lifts the clearing price to one step above the bid, capped by the high.
    pub fn quote(&self, offered: u64) -> Option<PriceUpdate> {
        if offered <= self.final_bid.saturating_add(self.step) {
            return None;
        }
        let update = if offered >= self.highest_bid {
            PriceUpdate {
                highest_bid: offered,
                final_bid: offered.min(self.highest_bid.saturating_add(self.step)),
            }
        } else {
            PriceUpdate {
                highest_bid: self.highest_bid,
                final_bid: offered.saturating_add(self.step).min(self.highest_bid),
            }
        };
        Some(update)
    }

    pub fn apply(&mut self, update: PriceUpdate) {
        self.highest_bid = update.highest_bid;
        self.final_bid = update.final_bid;
    }

    /// Close the auction and pick the winner.
    ///
    /// Scans bids in admission order; a bid wins if its price is strictly
    /// above the running clearing price, which then becomes that price. Equal
    /// later bids therefore never displace an earlier one. Calling this on a
    /// closed auction reports the recorded outcome without rescanning.
    pub fn settle(&mut self) -> Settlement {
        if self.is_open() {
            for (_, bid) in self.bids.iter() {
                if bid.price > self.final_bid {
                    self.winner = Some(bid.bidder.clone());
                    self.final_bid = bid.price;
                }
            }
            self.status = AuctionStatus::Closed;
        }
        Settlement {
            final_price: self.final_bid,
            winner: self.winner.clone(),
        }
    }
}

/// Stores `None` as the ledger's `"nobody"` sentinel.
mod winner_sentinel {
    use rentbid_types::ParticipantId;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::NO_WINNER;

    pub fn serialize<S: Serializer>(
        winner: &Option<ParticipantId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match winner {
            Some(id) => serializer.serialize_str(id.as_str()),
            None => serializer.serialize_str(NO_WINNER),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ParticipantId>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") | Some(NO_WINNER) => Ok(None),
            Some(_) => raw
                .map(ParticipantId::new)
                .transpose()
                .map_err(serde::de::Error::custom),
        }
    }
}

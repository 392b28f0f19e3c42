//! Auction engine for rentbid.
//!
//! A bot owner opens an ascending auction; renters bid before the deadline;
//! the auction is then settled and the winner recorded. All auction state
//! lives on the ledger as one JSON record per auction key, and every engine
//! call is a single all-or-nothing ledger transaction.
//!
//! # Pricing
//!
//! An auction tracks two prices. `highest_bid` is the largest price offered
//! by any admitted bid. `final_bid` is the clearing price, the amount the
//! auction currently reports as payable. A bid is admitted only if it
//! exceeds `final_bid + step`, and the renter must be able to pay the
//! clearing price that admission produces.
//!
//! # Components
//!
//! - [`AuctionEngine`]: create, join, query, end, and balance check
//! - [`Auction`]: the stored record and its pure pricing rules
//! - [`BidBook`]: bids in admission order, keyed by [`bid_key`]
//! - [`check_funds`]: balance sufficiency, shared with other callers

pub mod auction;
pub mod balance;
pub mod bid;
pub mod config;
pub mod engine;
pub mod error;

pub use auction::{Auction, AuctionStatus, PriceUpdate, Settlement, NO_WINNER};
pub use balance::{check_funds, FundsCheck};
pub use bid::{bid_key, Bid, BidBook, DuplicateBidKey, BID_OBJECT_TYPE};
pub use config::AuctionConfig;
pub use engine::{AcceptedBid, AuctionEngine};
pub use error::{AuctionError, AuctionResult};

//! Foundation types for rentbid.
//!
//! This crate provides the identifier, temporal, and record types shared by
//! every other rentbid crate. Nothing here touches the ledger; the types only
//! describe what is stored there and how it is keyed.
//!
//! # Key Types
//!
//! - [`ParticipantId`]: Identifier of a registered owner or renter
//! - [`AuctionKey`]: Ledger key of an auction record
//! - [`LedgerTimestamp`]: Fixed-width `YYYYMMDDHHMMSS` timestamp, ordered lexicographically
//! - [`EntityKind`]: Names the kind of record an error or lookup refers to
//! - [`Owner`] / [`Renter`]: Participant records, tolerant of unknown fields

pub mod entity;
pub mod error;
pub mod identity;
pub mod participant;
pub mod temporal;

pub use entity::EntityKind;
pub use error::TypeError;
pub use identity::{AuctionKey, ParticipantId, NO_PARTICIPANT};
pub use participant::{Owner, Renter};
pub use temporal::LedgerTimestamp;

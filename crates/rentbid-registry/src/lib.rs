//! Participant registry for rentbid.
//!
//! Owners and renters are stored under their own identifier. The auction and
//! reputation engines use the transaction-scoped helpers in [`records`] so
//! that participant reads join the same all-or-nothing unit as the rest of
//! their invocation; [`ParticipantRegistry`] wraps the same helpers in
//! standalone transactions for registration and lookups.

pub mod error;
pub mod records;
pub mod registry;

pub use error::{RecordError, RecordResult, RegistryError, Result};
pub use records::{load_owner, load_renter, require_participant, save_owner, save_renter};
pub use registry::ParticipantRegistry;

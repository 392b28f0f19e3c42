//! Reputation engine for rentbid.
//!
//! Owners are rated on three factors whose product is their score; renters
//! are rated on a single factor. Scores are stored in the participant record
//! without disturbing its other fields.

pub mod engine;
pub mod error;
pub mod factors;

pub use engine::ReputationEngine;
pub use error::{ReputationError, ReputationResult};
pub use factors::{renter_score, OwnerFactors};

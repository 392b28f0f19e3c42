//! Evaluation factors and the scores derived from them.

use std::ops::{Range, RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::error::{ReputationError, ReputationResult};

const U_RANGE: RangeInclusive<f64> = -1.0..=1.0;
const I_RANGE: RangeInclusive<f64> = 0.0..=1.0;
const T_RANGE: Range<f64> = -1.0..1.0;

/// The three factors an owner is evaluated on after a deal.
///
/// `u` is in `[-1, 1]`, `i` in `[0, 1]` and `t` in `[-1, 1)`, so the product
/// stays within `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnerFactors {
    pub u: f64,
    pub i: f64,
    pub t: f64,
}

impl OwnerFactors {
    pub fn new(u: f64, i: f64, t: f64) -> Self {
        Self { u, i, t }
    }

    /// Check every factor against its range. NaN is never in range.
    pub fn validate(&self) -> ReputationResult<()> {
        if !U_RANGE.contains(&self.u) {
            return Err(out_of_range("U", self.u, "[-1, 1]"));
        }
        if !I_RANGE.contains(&self.i) {
            return Err(out_of_range("I", self.i, "[0, 1]"));
        }
        if !T_RANGE.contains(&self.t) {
            return Err(out_of_range("T", self.t, "[-1, 1)"));
        }
        Ok(())
    }

    /// `U * I * T`, after validation.
    pub fn score(&self) -> ReputationResult<f64> {
        self.validate()?;
        Ok(self.u * self.i * self.t)
    }
}

/// Score for a renter evaluated with factor `e`.
///
/// The factor is taken as the score; only non-finite values are refused.
pub fn renter_score(e: f64) -> ReputationResult<f64> {
    if e.is_finite() {
        Ok(e)
    } else {
        Err(out_of_range("E", e, "finite values"))
    }
}

fn out_of_range(factor: &'static str, value: f64, range: &'static str) -> ReputationError {
    ReputationError::InvalidParameters {
        factor,
        value,
        range,
    }
}

//! Participant records as stored in the ledger.
//!
//! Registration and key issuance belong to other subsystems that may write
//! fields this crate does not model (public keys, contact data). Every record
//! therefore carries an `extra` map that captures unknown fields on decode and
//! writes them back verbatim on encode, so a read-modify-write cycle never
//! drops them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::ParticipantId;

/// A bot owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub owner_id: ParticipantId,
    #[serde(default)]
    pub bot_types: String,
    #[serde(default)]
    pub costs: u64,
    /// Reputation score, nominally in [-1, 1].
    #[serde(default)]
    pub owner_rate: f64,
    /// Completed deals; zero until the first settlement is recorded.
    #[serde(default)]
    pub owner_deals: u64,
    #[serde(default)]
    pub owner_balance: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Owner {
    pub fn new(owner_id: ParticipantId, bot_types: impl Into<String>, costs: u64) -> Self {
        Self {
            owner_id,
            bot_types: bot_types.into(),
            costs,
            owner_rate: 0.0,
            owner_deals: 0,
            owner_balance: 0,
            extra: Map::new(),
        }
    }
}

/// A renter, i.e. a bidder in auctions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Renter {
    pub renter_id: ParticipantId,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub renter_rate: f64,
    #[serde(default)]
    pub renter_deals: u64,
    #[serde(default)]
    pub renter_balance: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Renter {
    pub fn new(renter_id: ParticipantId, business_type: impl Into<String>, balance: i64) -> Self {
        Self {
            renter_id,
            business_type: business_type.into(),
            renter_rate: 0.0,
            renter_deals: 0,
            renter_balance: balance,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    #[test]
    fn owner_uses_ledger_field_names() {
        let owner = Owner::new(pid("owner1"), "delivery drones", 100);
        let value = serde_json::to_value(&owner).unwrap();
        assert_eq!(value["owner_id"], "owner1");
        assert_eq!(value["bot_types"], "delivery drones");
        assert_eq!(value["costs"], 100);
        assert_eq!(value["owner_deals"], 0);
    }

    #[test]
    fn unknown_fields_survive_a_roundtrip() {
        let stored = json!({
            "renter_id": "r1",
            "business_type": "farming",
            "renter_balance": 500,
            "renter_key": {"N": "abc", "E": 65537},
        });
        let mut renter: Renter = serde_json::from_value(stored).unwrap();
        assert_eq!(renter.renter_balance, 500);
        assert!(renter.extra.contains_key("renter_key"));

        renter.renter_rate = 0.5;
        let written = serde_json::to_value(&renter).unwrap();
        assert_eq!(written["renter_key"]["E"], 65537);
        assert_eq!(written["renter_rate"], 0.5);
        assert_eq!(written["business_type"], "farming");
    }

    #[test]
    fn missing_fields_default() {
        let owner: Owner = serde_json::from_value(json!({"owner_id": "o"})).unwrap();
        assert_eq!(owner.owner_deals, 0);
        assert_eq!(owner.owner_rate, 0.0);
        assert!(owner.extra.is_empty());
    }
}

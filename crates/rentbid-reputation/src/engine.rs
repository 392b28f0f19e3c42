use std::sync::Arc;

use rentbid_registry::{load_owner, load_renter, save_owner, save_renter};
use rentbid_store::{LedgerStore, Transaction};
use rentbid_types::ParticipantId;
use tracing::{debug, info};

use crate::error::ReputationResult;
use crate::factors::{renter_score, OwnerFactors};

/// Rates owners and renters.
///
/// Only the rate field of a participant record is changed. The record is
/// read, updated, and written back within one transaction, so every other
/// field (including ones this crate does not model) survives.
pub struct ReputationEngine<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> ReputationEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Rate an owner with factors `U`, `I` and `T` and return the stored score.
    pub fn rate_owner(
        &self,
        owner_id: &ParticipantId,
        factors: OwnerFactors,
    ) -> ReputationResult<f64> {
        let fresh = factors.score()?;

        let mut tx = Transaction::begin(self.store.as_ref());
        let mut owner = load_owner(&mut tx, owner_id)?;
        let score = next_rating(owner.owner_rate, owner.owner_deals, fresh);
        owner.owner_rate = score;
        save_owner(&mut tx, &owner)?;
        tx.commit()?;

        info!(owner = %owner_id, score, deals = owner.owner_deals, "owner rated");
        Ok(score)
    }

    /// Rate a renter with factor `E` and return the stored score.
    pub fn rate_renter(&self, renter_id: &ParticipantId, e: f64) -> ReputationResult<f64> {
        let fresh = renter_score(e)?;

        let mut tx = Transaction::begin(self.store.as_ref());
        let mut renter = load_renter(&mut tx, renter_id)?;
        let score = next_rating(renter.renter_rate, renter.renter_deals, fresh);
        renter.renter_rate = score;
        save_renter(&mut tx, &renter)?;
        tx.commit()?;

        info!(renter = %renter_id, score, deals = renter.renter_deals, "renter rated");
        Ok(score)
    }
}

/// Rating to store given the previous rating, the deal count and a freshly
/// computed score.
fn next_rating(previous: f64, deals: u64, fresh: f64) -> f64 {
    if deals > 0 {
        // TODO: blend `previous` into the new rating once an incremental
        // formula for participants with a deal history is agreed on.
        debug!(previous, deals, fresh, "replacing rating of participant with deal history");
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReputationError;
    use rentbid_registry::ParticipantRegistry;
    use rentbid_store::InMemoryLedgerStore;
    use rentbid_types::EntityKind;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn setup() -> (Arc<InMemoryLedgerStore>, ReputationEngine<InMemoryLedgerStore>) {
        let store = Arc::new(InMemoryLedgerStore::new());
        let registry = ParticipantRegistry::new(Arc::clone(&store));
        registry.register_owner(&pid("owner1"), "drones", 40).unwrap();
        registry.register_renter(&pid("renter1"), "logistics", 500).unwrap();
        (Arc::clone(&store), ReputationEngine::new(store))
    }

    fn raw_record(store: &InMemoryLedgerStore, key: &str) -> serde_json::Value {
        let value = store.get(key).unwrap().unwrap().value;
        serde_json::from_slice(&value).unwrap()
    }

    // ---- owners ----

    #[test]
    fn rate_owner_stores_product() {
        let (store, engine) = setup();
        let score = engine
            .rate_owner(&pid("owner1"), OwnerFactors::new(0.5, 0.5, 0.5))
            .unwrap();
        assert_eq!(score, 0.125);
        assert_eq!(raw_record(&store, "owner1")["owner_rate"], 0.125);
    }

    #[test]
    fn out_of_range_factor_writes_nothing() {
        let (store, engine) = setup();
        let version = store.version().unwrap();
        let err = engine
            .rate_owner(&pid("owner1"), OwnerFactors::new(1.5, 0.5, 0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            ReputationError::InvalidParameters { factor: "U", .. }
        ));
        assert_eq!(store.version().unwrap(), version);
        assert_eq!(raw_record(&store, "owner1")["owner_rate"], 0.0);
    }

    #[test]
    fn rating_preserves_other_fields() {
        let (store, engine) = setup();
        let legacy = serde_json::json!({
            "owner_id": "owner2",
            "bot_types": "arms",
            "costs": 9,
            "owner_balance": 77,
            "public_key": "pk-123",
            "owner_deals": 0,
        });
        store
            .put("owner2", serde_json::to_vec(&legacy).unwrap())
            .unwrap();

        engine
            .rate_owner(&pid("owner2"), OwnerFactors::new(1.0, 1.0, 0.5))
            .unwrap();

        let record = raw_record(&store, "owner2");
        assert_eq!(record["owner_rate"], 0.5);
        assert_eq!(record["bot_types"], "arms");
        assert_eq!(record["costs"], 9);
        assert_eq!(record["owner_balance"], 77);
        assert_eq!(record["public_key"], "pk-123");
    }

    #[test]
    fn owner_with_deal_history_gets_fresh_score() {
        let (store, engine) = setup();
        store
            .put(
                "owner3",
                br#"{"owner_id":"owner3","owner_rate":0.9,"owner_deals":4}"#.to_vec(),
            )
            .unwrap();
        let score = engine
            .rate_owner(&pid("owner3"), OwnerFactors::new(0.2, 0.5, -0.5))
            .unwrap();
        assert_eq!(score, -0.05);
        let record = raw_record(&store, "owner3");
        assert_eq!(record["owner_rate"], -0.05);
        assert_eq!(record["owner_deals"], 4);
    }

    #[test]
    fn rate_missing_owner_is_not_found() {
        let (_, engine) = setup();
        let err = engine
            .rate_owner(&pid("ghost"), OwnerFactors::new(0.1, 0.1, 0.1))
            .unwrap_err();
        assert!(matches!(
            err,
            ReputationError::NotFound { kind: EntityKind::Owner, .. }
        ));
    }

    #[test]
    fn renter_cannot_be_rated_as_owner() {
        let (store, engine) = setup();
        let version = store.version().unwrap();
        let err = engine
            .rate_owner(&pid("renter1"), OwnerFactors::new(0.1, 0.1, 0.1))
            .unwrap_err();
        assert!(matches!(
            err,
            ReputationError::NotFound { kind: EntityKind::Owner, ref id } if id == "renter1"
        ));
        assert_eq!(store.version().unwrap(), version);
        assert!(raw_record(&store, "renter1").get("owner_rate").is_none());
    }

    // ---- renters ----

    #[test]
    fn rate_renter_stores_factor() {
        let (store, engine) = setup();
        assert_eq!(engine.rate_renter(&pid("renter1"), 0.8).unwrap(), 0.8);
        let record = raw_record(&store, "renter1");
        assert_eq!(record["renter_rate"], 0.8);
        assert_eq!(record["renter_balance"], 500);
        assert_eq!(record["business_type"], "logistics");
    }

    #[test]
    fn rate_renter_twice_keeps_latest() {
        let (store, engine) = setup();
        engine.rate_renter(&pid("renter1"), 0.8).unwrap();
        engine.rate_renter(&pid("renter1"), -0.25).unwrap();
        assert_eq!(raw_record(&store, "renter1")["renter_rate"], -0.25);
    }

    #[test]
    fn rate_renter_rejects_nan_without_write() {
        let (store, engine) = setup();
        let version = store.version().unwrap();
        assert!(matches!(
            engine.rate_renter(&pid("renter1"), f64::NAN),
            Err(ReputationError::InvalidParameters { factor: "E", .. })
        ));
        assert_eq!(store.version().unwrap(), version);
    }

    #[test]
    fn rate_missing_renter_is_not_found() {
        let (_, engine) = setup();
        assert!(matches!(
            engine.rate_renter(&pid("ghost"), 0.5),
            Err(ReputationError::NotFound { kind: EntityKind::Renter, .. })
        ));
    }

    #[test]
    fn owner_cannot_be_rated_as_renter() {
        let (store, engine) = setup();
        let version = store.version().unwrap();
        assert!(matches!(
            engine.rate_renter(&pid("owner1"), 0.5),
            Err(ReputationError::NotFound { kind: EntityKind::Renter, .. })
        ));
        assert_eq!(store.version().unwrap(), version);
        assert!(raw_record(&store, "owner1").get("renter_rate").is_none());
    }
}

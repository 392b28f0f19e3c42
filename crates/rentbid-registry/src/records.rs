//! Transaction-scoped access to participant records.
//!
//! Owners and renters share one key space. A record is an owner record if it
//! carries `owner_id` and a renter record if it carries `renter_id`; looking
//! up the other role reports `NotFound` rather than a decoding failure.

use rentbid_store::{LedgerStore, Transaction};
use rentbid_types::{EntityKind, Owner, ParticipantId, Renter};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{RecordError, RecordResult};

const OWNER_ROLE_FIELD: &str = "owner_id";
const RENTER_ROLE_FIELD: &str = "renter_id";

fn not_found(kind: EntityKind, id: &ParticipantId) -> RecordError {
    RecordError::NotFound {
        kind,
        id: id.to_string(),
    }
}

/// Fail with `NotFound` unless some record is stored under `id`.
pub fn require_participant<S: LedgerStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    id: &ParticipantId,
) -> RecordResult<()> {
    if tx.exists(id.as_str())? {
        Ok(())
    } else {
        Err(not_found(EntityKind::Participant, id))
    }
}

/// Read the record under `id` if it has the role marked by `role_field`.
fn load_role<S: LedgerStore + ?Sized, T: DeserializeOwned>(
    tx: &mut Transaction<'_, S>,
    id: &ParticipantId,
    kind: EntityKind,
    role_field: &str,
) -> RecordResult<T> {
    let record = tx
        .get_json::<Value>(id.as_str())?
        .ok_or_else(|| not_found(kind, id))?;
    let Some(fields) = record.as_object() else {
        return Err(RecordError::Serialization(format!(
            "record {id} is not a JSON object"
        )));
    };
    if !fields.contains_key(role_field) {
        debug!(id = %id, %kind, "record has another role");
        return Err(not_found(kind, id));
    }
    Ok(serde_json::from_value(record)?)
}

/// Read an owner record.
pub fn load_owner<S: LedgerStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    id: &ParticipantId,
) -> RecordResult<Owner> {
    let owner: Owner = load_role(tx, id, EntityKind::Owner, OWNER_ROLE_FIELD)?;
    debug!(owner = %id, deals = owner.owner_deals, "owner loaded");
    Ok(owner)
}

/// Read a renter record.
pub fn load_renter<S: LedgerStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    id: &ParticipantId,
) -> RecordResult<Renter> {
    let renter: Renter = load_role(tx, id, EntityKind::Renter, RENTER_ROLE_FIELD)?;
    debug!(renter = %id, deals = renter.renter_deals, "renter loaded");
    Ok(renter)
}

/// Stage an owner record under its own id.
pub fn save_owner<S: LedgerStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    owner: &Owner,
) -> RecordResult<()> {
    tx.put_json(owner.owner_id.as_str(), owner)?;
    Ok(())
}

/// Stage a renter record under its own id.
pub fn save_renter<S: LedgerStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    renter: &Renter,
) -> RecordResult<()> {
    tx.put_json(renter.renter_id.as_str(), renter)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbid_store::InMemoryLedgerStore;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    #[test]
    fn save_then_load_owner() {
        let store = InMemoryLedgerStore::new();
        let mut tx = Transaction::begin(&store);
        save_owner(&mut tx, &Owner::new(pid("o1"), "drones", 10)).unwrap();
        tx.commit().unwrap();

        let mut tx = Transaction::begin(&store);
        let owner = load_owner(&mut tx, &pid("o1")).unwrap();
        assert_eq!(owner.bot_types, "drones");
    }

    #[test]
    fn missing_renter_is_not_found() {
        let store = InMemoryLedgerStore::new();
        let mut tx = Transaction::begin(&store);
        let err = load_renter(&mut tx, &pid("ghost")).unwrap_err();
        assert!(matches!(
            err,
            RecordError::NotFound { kind: EntityKind::Renter, ref id } if id == "ghost"
        ));
    }

    #[test]
    fn require_participant_accepts_any_record() {
        let store = InMemoryLedgerStore::new();
        store.put("r1", br#"{"renter_id":"r1"}"#.to_vec()).unwrap();
        let mut tx = Transaction::begin(&store);
        require_participant(&mut tx, &pid("r1")).unwrap();
        assert!(matches!(
            require_participant(&mut tx, &pid("r2")),
            Err(RecordError::NotFound { kind: EntityKind::Participant, .. })
        ));
    }

    #[test]
    fn other_role_is_not_found() {
        let store = InMemoryLedgerStore::new();
        let mut tx = Transaction::begin(&store);
        save_owner(&mut tx, &Owner::new(pid("o1"), "drones", 10)).unwrap();
        save_renter(&mut tx, &Renter::new(pid("r1"), "farming", 5)).unwrap();
        tx.commit().unwrap();

        let mut tx = Transaction::begin(&store);
        assert!(matches!(
            load_renter(&mut tx, &pid("o1")),
            Err(RecordError::NotFound { kind: EntityKind::Renter, .. })
        ));
        assert!(matches!(
            load_owner(&mut tx, &pid("r1")),
            Err(RecordError::NotFound { kind: EntityKind::Owner, .. })
        ));
    }

    #[test]
    fn role_record_with_bad_field_is_serialization_error() {
        let store = InMemoryLedgerStore::new();
        store
            .put("o1", br#"{"owner_id":"o1","costs":"lots"}"#.to_vec())
            .unwrap();
        store.put("o2", b"[1, 2]".to_vec()).unwrap();
        let mut tx = Transaction::begin(&store);
        assert!(matches!(
            load_owner(&mut tx, &pid("o1")),
            Err(RecordError::Serialization(_))
        ));
        assert!(matches!(
            load_owner(&mut tx, &pid("o2")),
            Err(RecordError::Serialization(_))
        ));
    }

    #[test]
    fn corrupt_record_is_serialization_error() {
        let store = InMemoryLedgerStore::new();
        store.put("o1", b"{broken".to_vec()).unwrap();
        let mut tx = Transaction::begin(&store);
        assert!(matches!(
            load_owner(&mut tx, &pid("o1")),
            Err(RecordError::Serialization(_))
        ));
    }
}

use std::sync::Arc;

use rentbid_store::{LedgerStore, Transaction};
use rentbid_types::{EntityKind, Owner, ParticipantId, Renter};
use tracing::info;

use crate::error::{RegistryError, Result};
use crate::records::{load_owner, load_renter, save_owner, save_renter};

/// Registration and lookup of owners and renters.
///
/// Each method runs as its own ledger transaction.
pub struct ParticipantRegistry<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> ParticipantRegistry<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a bot owner. Fails with `AlreadyExists` if the id is taken by
    /// any record.
    pub fn register_owner(
        &self,
        owner_id: &ParticipantId,
        bot_types: &str,
        costs: u64,
    ) -> Result<Owner> {
        let mut tx = Transaction::begin(self.store.as_ref());
        if tx.exists(owner_id.as_str())? {
            return Err(RegistryError::AlreadyExists {
                kind: EntityKind::Owner,
                id: owner_id.to_string(),
            });
        }
        let owner = Owner::new(owner_id.clone(), bot_types, costs);
        save_owner(&mut tx, &owner)?;
        tx.commit()?;
        info!(owner = %owner_id, bot_types, "owner registered");
        Ok(owner)
    }

    /// Register a renter with an opening balance.
    pub fn register_renter(
        &self,
        renter_id: &ParticipantId,
        business_type: &str,
        balance: i64,
    ) -> Result<Renter> {
        let mut tx = Transaction::begin(self.store.as_ref());
        if tx.exists(renter_id.as_str())? {
            return Err(RegistryError::AlreadyExists {
                kind: EntityKind::Renter,
                id: renter_id.to_string(),
            });
        }
        let renter = Renter::new(renter_id.clone(), business_type, balance);
        save_renter(&mut tx, &renter)?;
        tx.commit()?;
        info!(renter = %renter_id, business_type, balance, "renter registered");
        Ok(renter)
    }

    /// Returns `true` if any record is stored under `id`.
    pub fn exists(&self, id: &ParticipantId) -> Result<bool> {
        Ok(self.store.exists(id.as_str())?)
    }

    pub fn owner(&self, id: &ParticipantId) -> Result<Owner> {
        let mut tx = Transaction::begin(self.store.as_ref());
        Ok(load_owner(&mut tx, id)?)
    }

    pub fn renter(&self, id: &ParticipantId) -> Result<Renter> {
        let mut tx = Transaction::begin(self.store.as_ref());
        Ok(load_renter(&mut tx, id)?)
    }
}

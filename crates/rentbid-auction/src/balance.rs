//! Funds sufficiency check.
//!
//! The check only reads the renter's recorded balance. Moving funds is the
//! job of a settlement subsystem outside this crate.

use rentbid_registry::load_renter;
use rentbid_store::{LedgerStore, Transaction};
use rentbid_types::ParticipantId;
use tracing::debug;

use crate::error::AuctionResult;

/// Result of comparing a renter's balance with a price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FundsCheck {
    pub balance: i64,
    pub required: u64,
}

impl FundsCheck {
    /// `balance - required`, without overflow.
    pub fn remaining(&self) -> i128 {
        i128::from(self.balance) - i128::from(self.required)
    }

    pub fn is_insufficient(&self) -> bool {
        self.remaining() < 0
    }
}

/// Compare the balance of `renter` with `bid_price`.
///
/// Fails with `NotFound` if the renter has no record.
pub fn check_funds<S: LedgerStore + ?Sized>(
    tx: &mut Transaction<'_, S>,
    bid_price: u64,
    renter: &ParticipantId,
) -> AuctionResult<FundsCheck> {
    let record = load_renter(tx, renter)?;
    let check = FundsCheck {
        balance: record.renter_balance,
        required: bid_price,
    };
    debug!(renter = %renter, balance = check.balance, required = bid_price, "funds checked");
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuctionError;
    use rentbid_registry::save_renter;
    use rentbid_store::InMemoryLedgerStore;
    use rentbid_types::{EntityKind, Renter};

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn store_with_renter(balance: i64) -> InMemoryLedgerStore {
        let store = InMemoryLedgerStore::new();
        let mut tx = Transaction::begin(&store);
        save_renter(&mut tx, &Renter::new(pid("r1"), "logistics", balance)).unwrap();
        tx.commit().unwrap();
        store
    }

    #[test]
    fn exact_balance_is_sufficient() {
        let store = store_with_renter(100);
        let mut tx = Transaction::begin(&store);
        let check = check_funds(&mut tx, 100, &pid("r1")).unwrap();
        assert_eq!(check.remaining(), 0);
        assert!(!check.is_insufficient());
    }

    #[test]
    fn short_balance_is_insufficient() {
        let store = store_with_renter(99);
        let mut tx = Transaction::begin(&store);
        assert!(check_funds(&mut tx, 100, &pid("r1")).unwrap().is_insufficient());
    }

    #[test]
    fn negative_balance_and_huge_price_do_not_overflow() {
        let check = FundsCheck {
            balance: i64::MIN,
            required: u64::MAX,
        };
        assert!(check.is_insufficient());
    }

    #[test]
    fn check_never_writes() {
        let store = store_with_renter(10);
        let before = store.version().unwrap();
        let mut tx = Transaction::begin(&store);
        check_funds(&mut tx, 5, &pid("r1")).unwrap();
        assert_eq!(tx.pending_writes(), 0);
        tx.commit().unwrap();
        assert_eq!(store.version().unwrap(), before);
    }

    #[test]
    fn missing_renter_is_not_found() {
        let store = InMemoryLedgerStore::new();
        let mut tx = Transaction::begin(&store);
        assert!(matches!(
            check_funds(&mut tx, 1, &pid("ghost")),
            Err(AuctionError::NotFound { kind: EntityKind::Renter, .. })
        ));
    }
}

//! Client side of the ledger-of-record contract.
//!
//! The pawn contract only needs the ledger's address; the record layout below
//! must stay field-for-field identical to the ledger's own `LedgerEvent`.

use soroban_sdk::{contractclient, contracttype, Address, Env};

use crate::types::{DataKey, PawnError};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventKind {
    LoanIssued = 0,
    PaymentApplied = 1,
    CollateralSeized = 2,
    CollateralReleased = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerEvent {
    pub kind: EventKind,
    pub borrower: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[allow(dead_code)]
#[contractclient(name = "RecordKeeperClient")]
pub trait RecordKeeper {
    fn record(env: Env, event: LedgerEvent) -> u32;
}

/// Append a record for `borrower` stamped with the current ledger time.
pub fn record(
    env: &Env,
    kind: EventKind,
    borrower: &Address,
    amount: i128,
) -> Result<(), PawnError> {
    let ledger: Address = env
        .storage()
        .instance()
        .get(&DataKey::Ledger)
        .ok_or(PawnError::NotInitialized)?;
    RecordKeeperClient::new(env, &ledger).record(&LedgerEvent {
        kind,
        borrower: borrower.clone(),
        amount,
        timestamp: env.ledger().timestamp(),
    });
    Ok(())
}

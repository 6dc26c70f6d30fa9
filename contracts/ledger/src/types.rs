//! Record and storage types for the ledger-of-record contract.

use soroban_sdk::{contracterror, contracttype, Address};

/// What happened to a borrower's collateral or debt.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventKind {
    LoanIssued = 0,
    PaymentApplied = 1,
    CollateralSeized = 2,
    CollateralReleased = 3,
}

/// One append-only entry in a borrower's history.
///
/// `amount` is the loan disbursed for `LoanIssued`, the amount credited
/// against the debt for `PaymentApplied`, and the collateral value changing
/// custody for `CollateralSeized` / `CollateralReleased`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerEvent {
    pub kind: EventKind,
    pub borrower: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// The only address allowed to append.
    Writer,
    /// Number of records across all borrowers.
    Total,
    /// Number of records for a borrower.
    Count(Address),
    /// Record `n` of a borrower's history.
    Entry(Address, u32),
}

//! Core data types for the Pawn contract.

use soroban_sdk::{contracterror, contracttype, Address, String};

/// Debt may grow to this many times the collateral value before seizure.
pub const SEIZE_THRESHOLD_MULTIPLIER: i128 = 2;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PositionStatus {
    Open = 0,
    Seized = 1,
    Closed = 2,
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PawnError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    TicketNotFound = 4,
    AlreadyClaimed = 5,
    PositionNotFound = 6,
    PositionSeized = 7,
    InsufficientFunds = 8,
    InvalidAmount = 9,
    LoanAboveCeiling = 10,
    InvalidInterestModel = 11,
    Overflow = 12,
    Reentrancy = 13,
}

/// Interest configuration fixed at `init`.
///
/// * `annual_rate_percent` – whole-percent rate charged per accrual period.
/// * `seconds_per_accrual_period` – length of that period in seconds.
/// * `float_fluff` – fixed-point scale keeping the per-second rate above zero
///   under integer division.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InterestModel {
    pub annual_rate_percent: u32,
    pub seconds_per_accrual_period: u64,
    pub float_fluff: i128,
}

/// A borrower's debt position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanPosition {
    pub borrower: Address,
    pub principal_outstanding: i128,
    pub collateral_value: i128,
    /// Ledger timestamp up to which interest has been charged.
    pub last_accrual_timestamp: u64,
    pub status: PositionStatus,
}

/// Outcome of `pay_off_debt`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentReceipt {
    /// Amount credited against the debt and pulled from the borrower.
    pub applied: i128,
    /// Part of the offered amount that was not needed.
    pub refunded: i128,
    /// Debt left after the payment.
    pub remaining: i128,
    pub status: PositionStatus,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    Ledger,
    Model,
    RatePerSecond,
    Reentrancy,
    Ticket(String),
    Position(Address),
}

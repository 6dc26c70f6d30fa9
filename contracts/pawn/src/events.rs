//! Event types and topic constants for the Pawn contract.
//! Stable event schemas for indexing and analytics.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::types::PositionStatus;

/// Event emitted when a claimant registers a ticket.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketAppliedEvent {
    pub ticket_id: String,
    pub claimant: Address,
}

/// Event emitted when a ticket is evaluated and the loan disbursed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanIssuedEvent {
    pub ticket_id: String,
    pub borrower: Address,
    pub loan_amount: i128,
    pub appraised_value: i128,
    pub principal_outstanding: i128,
    pub collateral_value: i128,
}

/// Event emitted whenever interest is charged to a position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccrualEvent {
    pub borrower: Address,
    pub interest: i128,
    pub principal_outstanding: i128,
    pub timestamp: u64,
}

/// Event emitted when a payment is credited against a position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentEvent {
    pub borrower: Address,
    pub applied: i128,
    pub refunded: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

/// Event emitted when collateral changes custody (seized or released).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralEvent {
    pub borrower: Address,
    /// Seized: the administrator. Released: the borrower.
    pub recipient: Address,
    pub collateral_value: i128,
    pub principal_outstanding: i128,
    pub status: PositionStatus,
}

pub fn publish_ticket_applied(env: &Env, event: TicketAppliedEvent) {
    env.events()
        .publish((symbol_short!("pawn"), symbol_short!("applied")), event);
}

pub fn publish_loan_issued(env: &Env, event: LoanIssuedEvent) {
    env.events()
        .publish((symbol_short!("pawn"), symbol_short!("issued")), event);
}

pub fn publish_accrual(env: &Env, event: AccrualEvent) {
    env.events()
        .publish((symbol_short!("pawn"), symbol_short!("accrued")), event);
}

pub fn publish_payment(env: &Env, event: PaymentEvent) {
    env.events()
        .publish((symbol_short!("pawn"), symbol_short!("payment")), event);
}

/// Publish a custody change; `topic` is `seized` or `released`.
pub fn publish_collateral_event(env: &Env, topic: Symbol, event: CollateralEvent) {
    env.events().publish((symbol_short!("pawn"), topic), event);
}

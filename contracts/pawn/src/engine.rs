//! Loan accounting: positions, interest accrual, payments, seizure.
//!
//! Every debt-mutating operation reconciles first, then checks the seizure
//! ceiling, then applies its own change. Nothing here moves tokens; callers
//! transfer funds only after these functions have committed state.

use soroban_sdk::{log, symbol_short, Address, Env, String};

use crate::events::{
    publish_accrual, publish_collateral_event, publish_loan_issued, publish_payment,
    AccrualEvent, CollateralEvent, LoanIssuedEvent, PaymentEvent,
};
use crate::ledger::{self, EventKind};
use crate::math;
use crate::registry;
use crate::types::{DataKey, InterestModel, LoanPosition, PawnError, PaymentReceipt, PositionStatus};

/// Interest terms read once per invocation.
#[derive(Clone, Copy, Debug)]
pub struct Terms {
    pub rate_per_second: i128,
    pub float_fluff: i128,
}

impl Terms {
    pub fn load(env: &Env) -> Result<Self, PawnError> {
        let model: InterestModel = env
            .storage()
            .instance()
            .get(&DataKey::Model)
            .ok_or(PawnError::NotInitialized)?;
        let rate_per_second: i128 = env
            .storage()
            .instance()
            .get(&DataKey::RatePerSecond)
            .ok_or(PawnError::NotInitialized)?;
        Ok(Self {
            rate_per_second,
            float_fluff: model.float_fluff,
        })
    }
}

pub fn load_position(env: &Env, borrower: &Address) -> Option<LoanPosition> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(borrower.clone()))
}

fn store_position(env: &Env, position: &LoanPosition) {
    env.storage()
        .persistent()
        .set(&DataKey::Position(position.borrower.clone()), position);
}

fn load_open_position(env: &Env, borrower: &Address) -> Result<LoanPosition, PawnError> {
    let position = load_position(env, borrower).ok_or(PawnError::PositionNotFound)?;
    match position.status {
        PositionStatus::Open => Ok(position),
        PositionStatus::Seized => Err(PawnError::PositionSeized),
        PositionStatus::Closed => Err(PawnError::PositionNotFound),
    }
}

/// Debt the position would carry at `at`, without touching storage.
pub fn preview(
    env: &Env,
    terms: &Terms,
    position: &LoanPosition,
    at: u64,
) -> Result<i128, PawnError> {
    if position.status != PositionStatus::Open {
        return Ok(position.principal_outstanding);
    }
    math::accrued_principal(
        env,
        position.principal_outstanding,
        terms.rate_per_second,
        position.last_accrual_timestamp,
        at,
        terms.float_fluff,
    )
    .ok_or(PawnError::Overflow)
}

/// Charge interest up to `now`, then enforce the seizure ceiling.
///
/// Returns `true` when this call seized the position. A `now` at or before
/// the last accrual leaves the position untouched. The caller persists the
/// position.
fn accrue(env: &Env, terms: &Terms, position: &mut LoanPosition, now: u64) -> Result<bool, PawnError> {
    if position.status != PositionStatus::Open || now <= position.last_accrual_timestamp {
        return Ok(false);
    }
    let before = position.principal_outstanding;
    position.principal_outstanding = preview(env, terms, position, now)?;
    position.last_accrual_timestamp = now;

    let interest = position.principal_outstanding - before;
    if interest > 0 {
        publish_accrual(
            env,
            AccrualEvent {
                borrower: position.borrower.clone(),
                interest,
                principal_outstanding: position.principal_outstanding,
                timestamp: now,
            },
        );
    }

    let ceiling = math::seize_ceiling(position.collateral_value).ok_or(PawnError::Overflow)?;
    if position.principal_outstanding > ceiling {
        seize(env, position)?;
        return Ok(true);
    }
    Ok(false)
}

fn seize(env: &Env, position: &mut LoanPosition) -> Result<(), PawnError> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(PawnError::NotInitialized)?;
    position.status = PositionStatus::Seized;
    log!(
        env,
        "collateral seized",
        position.borrower,
        position.principal_outstanding,
        position.collateral_value
    );

    ledger::record(
        env,
        EventKind::CollateralSeized,
        &position.borrower,
        position.collateral_value,
    )?;
    publish_collateral_event(
        env,
        symbol_short!("seized"),
        CollateralEvent {
            borrower: position.borrower.clone(),
            recipient: admin,
            collateral_value: position.collateral_value,
            principal_outstanding: position.principal_outstanding,
            status: PositionStatus::Seized,
        },
    );
    Ok(())
}

/// Consume `ticket_id` and open or grow its claimant's position.
///
/// Returns the claimant and the updated position; the caller disburses
/// `loan_amount` afterwards.
pub fn evaluate(
    env: &Env,
    terms: &Terms,
    ticket_id: &String,
    appraised_value: i128,
    loan_amount: i128,
) -> Result<(Address, LoanPosition), PawnError> {
    if appraised_value <= 0 || loan_amount <= 0 {
        return Err(PawnError::InvalidAmount);
    }
    let borrower = registry::consume(env, ticket_id)?;
    let now = env.ledger().timestamp();

    let existing = match load_position(env, &borrower) {
        Some(mut position) if position.status == PositionStatus::Open => {
            if accrue(env, terms, &mut position, now)? {
                store_position(env, &position);
                None
            } else {
                Some(position)
            }
        }
        _ => None,
    };

    let position = match existing {
        Some(mut position) => {
            position.principal_outstanding = position
                .principal_outstanding
                .checked_add(loan_amount)
                .ok_or(PawnError::Overflow)?;
            position.collateral_value = position
                .collateral_value
                .checked_add(appraised_value)
                .ok_or(PawnError::Overflow)?;
            position
        }
        None => LoanPosition {
            borrower: borrower.clone(),
            principal_outstanding: loan_amount,
            collateral_value: appraised_value,
            last_accrual_timestamp: now,
            status: PositionStatus::Open,
        },
    };

    let ceiling = math::seize_ceiling(position.collateral_value).ok_or(PawnError::Overflow)?;
    if position.principal_outstanding > ceiling {
        return Err(PawnError::LoanAboveCeiling);
    }
    store_position(env, &position);

    ledger::record(env, EventKind::LoanIssued, &borrower, loan_amount)?;
    publish_loan_issued(
        env,
        LoanIssuedEvent {
            ticket_id: ticket_id.clone(),
            borrower: borrower.clone(),
            loan_amount,
            appraised_value,
            principal_outstanding: position.principal_outstanding,
            collateral_value: position.collateral_value,
        },
    );
    Ok((borrower, position))
}

/// Reconcile, then credit up to `amount` against the debt.
///
/// If reconciliation seizes the position the seizure is kept and nothing is
/// credited: the receipt reports `applied == 0` and status `Seized`.
pub fn pay(env: &Env, terms: &Terms, borrower: &Address, amount: i128) -> Result<PaymentReceipt, PawnError> {
    if amount <= 0 {
        return Err(PawnError::InvalidAmount);
    }
    let mut position = load_open_position(env, borrower)?;
    let now = env.ledger().timestamp();

    if accrue(env, terms, &mut position, now)? {
        store_position(env, &position);
        return Ok(PaymentReceipt {
            applied: 0,
            refunded: amount,
            remaining: position.principal_outstanding,
            status: PositionStatus::Seized,
        });
    }

    let applied = amount.min(position.principal_outstanding);
    let refunded = amount - applied;
    position.principal_outstanding -= applied;
    if position.principal_outstanding == 0 {
        position.status = PositionStatus::Closed;
    }
    store_position(env, &position);

    ledger::record(env, EventKind::PaymentApplied, borrower, applied)?;
    publish_payment(
        env,
        PaymentEvent {
            borrower: borrower.clone(),
            applied,
            refunded,
            remaining: position.principal_outstanding,
            timestamp: now,
        },
    );

    if position.status == PositionStatus::Closed {
        ledger::record(
            env,
            EventKind::CollateralReleased,
            borrower,
            position.collateral_value,
        )?;
        publish_collateral_event(
            env,
            symbol_short!("released"),
            CollateralEvent {
                borrower: borrower.clone(),
                recipient: borrower.clone(),
                collateral_value: position.collateral_value,
                principal_outstanding: 0,
                status: PositionStatus::Closed,
            },
        );
    }

    Ok(PaymentReceipt {
        applied,
        refunded,
        remaining: position.principal_outstanding,
        status: position.status,
    })
}

/// Accrue an Open position up to the current ledger time.
pub fn reconcile(env: &Env, terms: &Terms, borrower: &Address) -> Result<LoanPosition, PawnError> {
    let mut position = load_open_position(env, borrower)?;
    accrue(env, terms, &mut position, env.ledger().timestamp())?;
    store_position(env, &position);
    Ok(position)
}

/// Accrue as if `elapsed` seconds had passed since the last accrual.
///
/// The accrual clock moves forward by `elapsed`, so the simulated interval
/// is not charged again by later wall-clock accruals. The clock may end up
/// ahead of ledger time; until ledger time catches up, nothing accrues on
/// the position, including loans added to it by a later evaluation.
pub fn accrue_elapsed(
    env: &Env,
    terms: &Terms,
    borrower: &Address,
    elapsed: u64,
) -> Result<LoanPosition, PawnError> {
    let mut position = load_open_position(env, borrower)?;
    let until = position
        .last_accrual_timestamp
        .checked_add(elapsed)
        .ok_or(PawnError::Overflow)?;
    accrue(env, terms, &mut position, until)?;
    store_position(env, &position);
    Ok(position)
}

#![no_std]

//! Pawnbook pawn contract: ticket registry, collateralised loans, interest
//! accrual and seizure.
//!
//! A claimant registers a ticket, the administrator evaluates it and funds a
//! loan from the contract's token reserve, interest accrues per second, and
//! the borrower repays at will. If accrued debt passes twice the collateral
//! value the collateral is seized for the administrator. Custody and payment
//! events are appended to a separate ledger-of-record contract.
//!
//! # Reentrancy
//! Token transfers happen only after positions, the registry and the ledger
//! are committed. `evaluate_collateral` and `pay_off_debt` additionally hold
//! a reentrancy flag across the transfer, so a token that called back would
//! revert.

mod engine;
mod events;
mod ledger;
pub mod math;
mod registry;
mod types;

use soroban_sdk::{contract, contractimpl, token, Address, Env, String};

use engine::Terms;
use events::{publish_ticket_applied, TicketAppliedEvent};
pub use events::{AccrualEvent, CollateralEvent, LoanIssuedEvent, PaymentEvent};
pub use types::{
    InterestModel, LoanPosition, PawnError, PaymentReceipt, PositionStatus,
    SEIZE_THRESHOLD_MULTIPLIER,
};
use types::DataKey;

fn read_admin(env: &Env) -> Result<Address, PawnError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(PawnError::NotInitialized)
}

fn require_admin_auth(env: &Env, caller: &Address) -> Result<(), PawnError> {
    if *caller != read_admin(env)? {
        return Err(PawnError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

fn read_model(env: &Env) -> Result<InterestModel, PawnError> {
    env.storage()
        .instance()
        .get(&DataKey::Model)
        .ok_or(PawnError::NotInitialized)
}

fn token_client(env: &Env) -> Result<token::Client<'_>, PawnError> {
    let token_address: Address = env
        .storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(PawnError::NotInitialized)?;
    Ok(token::Client::new(env, &token_address))
}

fn set_reentrancy_guard(env: &Env) -> Result<(), PawnError> {
    let current: bool = env
        .storage()
        .instance()
        .get(&DataKey::Reentrancy)
        .unwrap_or(false);
    if current {
        return Err(PawnError::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Reentrancy, &true);
    Ok(())
}

fn clear_reentrancy_guard(env: &Env) {
    env.storage().instance().set(&DataKey::Reentrancy, &false);
}

fn position_or_missing(env: &Env, borrower: &Address) -> Result<LoanPosition, PawnError> {
    engine::load_position(env, borrower).ok_or(PawnError::PositionNotFound)
}

#[contract]
pub struct Pawn;

#[contractimpl]
impl Pawn {
    /// Wire the contract to its administrator, reserve token and ledger, and
    /// fix the interest model.
    ///
    /// The per-second rate is derived here once and reused by every accrual.
    pub fn init(
        env: Env,
        admin: Address,
        token: Address,
        ledger: Address,
        model: InterestModel,
    ) -> Result<(), PawnError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(PawnError::AlreadyInitialized);
        }
        let rate_per_second =
            math::rate_per_second(&model).ok_or(PawnError::InvalidInterestModel)?;

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::Ledger, &ledger);
        env.storage().instance().set(&DataKey::Model, &model);
        env.storage()
            .instance()
            .set(&DataKey::RatePerSecond, &rate_per_second);
        Ok(())
    }

    /// Register `claimant` as the owner of the claim behind `ticket_id`.
    ///
    /// # Errors
    /// * `AlreadyClaimed` – another claimant holds the unevaluated ticket
    pub fn collateral_application(
        env: Env,
        claimant: Address,
        ticket_id: String,
    ) -> Result<(), PawnError> {
        claimant.require_auth();
        registry::apply(&env, &ticket_id, &claimant)?;
        publish_ticket_applied(
            &env,
            TicketAppliedEvent {
                ticket_id,
                claimant,
            },
        );
        Ok(())
    }

    /// Claimant currently waiting on `ticket_id`, if any.
    pub fn get_ticket_address(env: Env, ticket_id: String) -> Option<Address> {
        registry::lookup(&env, &ticket_id)
    }

    /// Evaluate a ticket and fund a loan to its claimant (admin only).
    ///
    /// Consumes the ticket, opens the claimant's position or adds to an open
    /// one (both debt and collateral value accumulate), records the loan in
    /// the ledger, then transfers `loan_amount` from the reserve.
    ///
    /// # Errors
    /// * `Unauthorized` – `caller` is not the administrator
    /// * `InvalidAmount` – non-positive appraisal or loan
    /// * `InsufficientFunds` – reserve balance below `loan_amount`
    /// * `TicketNotFound` – nobody applied with `ticket_id`
    /// * `LoanAboveCeiling` – the debt would start above the seizure ceiling
    pub fn evaluate_collateral(
        env: Env,
        caller: Address,
        ticket_id: String,
        appraised_value: i128,
        loan_amount: i128,
    ) -> Result<LoanPosition, PawnError> {
        require_admin_auth(&env, &caller)?;
        set_reentrancy_guard(&env)?;

        let token = token_client(&env)?;
        let reserve = env.current_contract_address();
        if loan_amount > 0 && token.balance(&reserve) < loan_amount {
            return Err(PawnError::InsufficientFunds);
        }

        let terms = Terms::load(&env)?;
        let (borrower, position) =
            engine::evaluate(&env, &terms, &ticket_id, appraised_value, loan_amount)?;

        token.transfer(&reserve, &borrower, &loan_amount);
        clear_reentrancy_guard(&env);
        Ok(position)
    }

    /// Repay up to `amount` of the borrower's debt.
    ///
    /// Interest is reconciled first. If that pushes the debt past the
    /// ceiling the collateral is seized, nothing is charged, and the receipt
    /// comes back with status `Seized`. Otherwise only the amount actually
    /// owed is pulled from the borrower; the rest is reported as refunded.
    ///
    /// # Errors
    /// * `InvalidAmount` – `amount` is not positive
    /// * `PositionNotFound` – no open position
    /// * `PositionSeized` – the collateral was already seized
    pub fn pay_off_debt(
        env: Env,
        borrower: Address,
        amount: i128,
    ) -> Result<PaymentReceipt, PawnError> {
        borrower.require_auth();
        set_reentrancy_guard(&env)?;

        let terms = Terms::load(&env)?;
        let receipt = engine::pay(&env, &terms, &borrower, amount)?;

        if receipt.applied > 0 {
            token_client(&env)?.transfer(
                &borrower,
                &env.current_contract_address(),
                &receipt.applied,
            );
        }
        clear_reentrancy_guard(&env);
        Ok(receipt)
    }

    /// Charge interest as though `elapsed_seconds` had passed (admin only).
    ///
    /// Simulation/operations hook. The position's accrual clock moves forward
    /// by the same amount. Returns the resulting debt.
    pub fn update_debt_with_time(
        env: Env,
        caller: Address,
        borrower: Address,
        elapsed_seconds: u64,
    ) -> Result<i128, PawnError> {
        require_admin_auth(&env, &caller)?;
        let terms = Terms::load(&env)?;
        let position = engine::accrue_elapsed(&env, &terms, &borrower, elapsed_seconds)?;
        Ok(position.principal_outstanding)
    }

    /// Bring an open position up to date with the current ledger time,
    /// seizing it if the debt has passed the ceiling.
    pub fn reconcile(env: Env, borrower: Address) -> Result<LoanPosition, PawnError> {
        let terms = Terms::load(&env)?;
        engine::reconcile(&env, &terms, &borrower)
    }

    /// Debt the borrower would owe at timestamp `at`. Read-only.
    pub fn preview_debt(env: Env, borrower: Address, at: u64) -> Result<i128, PawnError> {
        let terms = Terms::load(&env)?;
        let position = position_or_missing(&env, &borrower)?;
        engine::preview(&env, &terms, &position, at)
    }

    /// Debt the borrower owes right now, interest included. Read-only.
    pub fn get_running_debt(env: Env, borrower: Address) -> Result<i128, PawnError> {
        let now = env.ledger().timestamp();
        Self::preview_debt(env, borrower, now)
    }

    /// Seizure ceiling for the borrower's position.
    pub fn get_running_max(env: Env, borrower: Address) -> Result<i128, PawnError> {
        let position = position_or_missing(&env, &borrower)?;
        math::seize_ceiling(position.collateral_value).ok_or(PawnError::Overflow)
    }

    /// Stored position record (view function).
    pub fn get_position(env: Env, borrower: Address) -> Option<LoanPosition> {
        engine::load_position(&env, &borrower)
    }

    pub fn get_owner(env: Env) -> Result<Address, PawnError> {
        read_admin(&env)
    }

    pub fn get_interest_rate(env: Env) -> Result<u32, PawnError> {
        Ok(read_model(&env)?.annual_rate_percent)
    }

    pub fn get_interest_rate_per_second(env: Env) -> Result<i128, PawnError> {
        Ok(Terms::load(&env)?.rate_per_second)
    }

    pub fn get_float_fluff(env: Env) -> Result<i128, PawnError> {
        Ok(read_model(&env)?.float_fluff)
    }

    pub fn get_interest_model(env: Env) -> Result<InterestModel, PawnError> {
        read_model(&env)
    }

    pub fn get_ledger(env: Env) -> Result<Address, PawnError> {
        env.storage()
            .instance()
            .get(&DataKey::Ledger)
            .ok_or(PawnError::NotInitialized)
    }

    pub fn get_token(env: Env) -> Result<Address, PawnError> {
        Ok(token_client(&env)?.address)
    }

    /// Token balance available for new loans.
    pub fn get_reserve_balance(env: Env) -> Result<i128, PawnError> {
        Ok(token_client(&env)?.balance(&env.current_contract_address()))
    }
}

#![no_std]

//! Pawnbook ledger-of-record: an append-only log of collateral custody
//! transfers and payments, one ordered history per borrower.
//!
//! A single writer (the pawn contract) is fixed at `init`. There is no entry
//! point that rewrites or deletes a record; anyone may read.

mod types;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Vec};

pub use types::{DataKey, EventKind, LedgerError, LedgerEvent};

fn read_writer(env: &Env) -> Result<Address, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::Writer)
        .ok_or(LedgerError::NotInitialized)
}

fn history_count(env: &Env, borrower: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Count(borrower.clone()))
        .unwrap_or(0)
}

#[contract]
pub struct Ledger;

#[contractimpl]
impl Ledger {
    /// Fix the address allowed to append records.
    pub fn init(env: Env, writer: Address) -> Result<(), LedgerError> {
        if env.storage().instance().has(&DataKey::Writer) {
            return Err(LedgerError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Writer, &writer);
        env.storage().instance().set(&DataKey::Total, &0_u64);
        Ok(())
    }

    /// Append `event` to its borrower's history and return its index.
    ///
    /// # Panics
    /// If the writer has not authorized the call.
    pub fn record(env: Env, event: LedgerEvent) -> Result<u32, LedgerError> {
        let writer = read_writer(&env)?;
        writer.require_auth();

        let index = history_count(&env, &event.borrower);
        env.storage()
            .persistent()
            .set(&DataKey::Entry(event.borrower.clone(), index), &event);
        env.storage()
            .persistent()
            .set(&DataKey::Count(event.borrower.clone()), &(index + 1));

        let total: u64 = env
            .storage()
            .instance()
            .get(&DataKey::Total)
            .unwrap_or(0);
        env.storage().instance().set(&DataKey::Total, &(total + 1));

        env.events().publish(
            (symbol_short!("ledger"), symbol_short!("record")),
            (event.borrower, event.kind, index),
        );
        Ok(index)
    }

    /// Every record for `borrower`, oldest first.
    pub fn history(env: Env, borrower: Address) -> Vec<LedgerEvent> {
        let count = history_count(&env, &borrower);
        Self::history_page(env, borrower, 0, count)
    }

    /// Up to `limit` records for `borrower` starting at index `start`.
    ///
    /// Pages are stable: the same `(start, limit)` always yields the same
    /// records, so a reader can resume from the last index it saw.
    pub fn history_page(env: Env, borrower: Address, start: u32, limit: u32) -> Vec<LedgerEvent> {
        let count = history_count(&env, &borrower);
        let end = start.saturating_add(limit).min(count);
        let mut out = Vec::new(&env);
        for index in start..end {
            if let Some(event) = env
                .storage()
                .persistent()
                .get::<DataKey, LedgerEvent>(&DataKey::Entry(borrower.clone(), index))
            {
                out.push_back(event);
            }
        }
        out
    }

    pub fn history_len(env: Env, borrower: Address) -> u32 {
        history_count(&env, &borrower)
    }

    /// Most recent record for `borrower`, if any.
    pub fn latest(env: Env, borrower: Address) -> Option<LedgerEvent> {
        let count = history_count(&env, &borrower);
        if count == 0 {
            return None;
        }
        env.storage()
            .persistent()
            .get(&DataKey::Entry(borrower, count - 1))
    }

    pub fn total_records(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::Total)
            .unwrap_or(0)
    }

    pub fn writer(env: Env) -> Result<Address, LedgerError> {
        read_writer(&env)
    }
}

//! Ticket registry: ticket id -> claimant waiting for evaluation.
//!
//! An absent entry is the "unused" state. Entries are removed when the
//! administrator evaluates the ticket, so a ticket can only fund one loan
//! per claim.

use soroban_sdk::{Address, Env, String};

use crate::types::{DataKey, PawnError};

/// Register `claimant` for `ticket_id`. Re-applying as the same claimant is a
/// no-op.
pub fn apply(env: &Env, ticket_id: &String, claimant: &Address) -> Result<(), PawnError> {
    let key = DataKey::Ticket(ticket_id.clone());
    if let Some(current) = env.storage().persistent().get::<DataKey, Address>(&key) {
        if current != *claimant {
            return Err(PawnError::AlreadyClaimed);
        }
        return Ok(());
    }
    env.storage().persistent().set(&key, claimant);
    Ok(())
}

pub fn lookup(env: &Env, ticket_id: &String) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Ticket(ticket_id.clone()))
}

/// Take the pending claimant for `ticket_id`, clearing the entry.
pub fn consume(env: &Env, ticket_id: &String) -> Result<Address, PawnError> {
    let key = DataKey::Ticket(ticket_id.clone());
    let claimant: Address = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(PawnError::TicketNotFound)?;
    env.storage().persistent().remove(&key);
    Ok(claimant)
}

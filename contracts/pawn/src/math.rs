//! Fixed-point interest arithmetic.
//!
//! Integer-only, floored at every division so rounding always favours the
//! lender. Every step is checked; `None` means the result left `i128`.
//! Intermediate products are widened to `I256`, so only a result that itself
//! does not fit is reported.

use soroban_sdk::{Env, I256};

use crate::types::{InterestModel, SEIZE_THRESHOLD_MULTIPLIER};

/// Per-second rate scaled by `float_fluff`:
/// `floor(floor(annual_rate_percent * float_fluff / 100) / seconds_per_accrual_period)`.
///
/// Returns `None` when the model is unusable (zero period or fluff, or a
/// rate that floors to zero).
pub fn rate_per_second(model: &InterestModel) -> Option<i128> {
    if model.seconds_per_accrual_period == 0 || model.float_fluff <= 0 {
        return None;
    }
    let scaled = (model.annual_rate_percent as i128).checked_mul(model.float_fluff)? / 100;
    let rate = scaled / model.seconds_per_accrual_period as i128;
    if rate == 0 {
        return None;
    }
    Some(rate)
}

/// Interest owed on `principal` over `elapsed` seconds:
/// `floor(principal * rate_per_second * elapsed / float_fluff)`.
///
/// Splits `principal * rate_per_second = whole * float_fluff + rest` so the
/// 256-bit intermediates never need more than two `i128` factors.
pub fn interest_for(
    env: &Env,
    principal: i128,
    rate_per_second: i128,
    elapsed: u64,
    float_fluff: i128,
) -> Option<i128> {
    if elapsed == 0 || principal <= 0 {
        return Some(0);
    }
    if float_fluff <= 0 {
        return None;
    }
    let fluff = I256::from_i128(env, float_fluff);
    let scaled = I256::from_i128(env, principal).mul(&I256::from_i128(env, rate_per_second));
    let whole = scaled.div(&fluff).to_i128()?;
    let rest = scaled
        .rem_euclid(&fluff)
        .mul(&I256::from_i128(env, elapsed as i128))
        .div(&fluff)
        .to_i128()?;
    whole.checked_mul(elapsed as i128)?.checked_add(rest)
}

/// Principal after charging interest from `last` up to `now`. A `now` at or
/// before `last` charges nothing.
pub fn accrued_principal(
    env: &Env,
    principal: i128,
    rate_per_second: i128,
    last: u64,
    now: u64,
    float_fluff: i128,
) -> Option<i128> {
    let elapsed = now.saturating_sub(last);
    principal.checked_add(interest_for(env, principal, rate_per_second, elapsed, float_fluff)?)
}

/// Debt ceiling above which the collateral is seized.
#[inline]
pub fn seize_ceiling(collateral_value: i128) -> Option<i128> {
    collateral_value.checked_mul(SEIZE_THRESHOLD_MULTIPLIER)
}

//! Property tests for the fixed-point accrual arithmetic.
//!
//! Increase cases: PROPTEST_CASES=10000 cargo test -p pawnbook-pawn --test accrual_properties

use pawnbook_pawn::math::{accrued_principal, interest_for, rate_per_second, seize_ceiling};
use pawnbook_pawn::InterestModel;
use proptest::prelude::*;
use soroban_sdk::Env;

const FLUFF: i128 = 1_000_000_000_000_000;

fn reference_rate() -> i128 {
    rate_per_second(&InterestModel {
        annual_rate_percent: 20,
        seconds_per_accrual_period: 2_592_000,
        float_fluff: FLUFF,
    })
    .unwrap()
}

proptest! {
    #[test]
    fn accrual_never_decreases_debt(
        principal in 0_i128..1_000_000_000_000,
        last in 0_u64..1_000_000_000,
        elapsed in 0_u64..1_000_000_000,
    ) {
        let env = Env::default();
        let rate = reference_rate();
        let after = accrued_principal(&env, principal, rate, last, last + elapsed, FLUFF).unwrap();
        prop_assert!(after >= principal);
    }

    #[test]
    fn accrual_is_monotonic_in_time(
        principal in 1_i128..1_000_000_000_000,
        a in 0_u64..500_000_000,
        b in 0_u64..500_000_000,
    ) {
        let env = Env::default();
        let rate = reference_rate();
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let at_early = accrued_principal(&env, principal, rate, 0, early, FLUFF).unwrap();
        let at_late = accrued_principal(&env, principal, rate, 0, late, FLUFF).unwrap();
        prop_assert!(at_late >= at_early);
    }

    #[test]
    fn zero_or_negative_elapsed_is_noop(
        principal in 0_i128..1_000_000_000_000,
        now in 0_u64..1_000_000_000,
        back in 0_u64..1_000_000_000,
    ) {
        let env = Env::default();
        let rate = reference_rate();
        let last = now + back;
        prop_assert_eq!(accrued_principal(&env, principal, rate, last, now, FLUFF), Some(principal));
    }

    #[test]
    fn reconciling_again_at_same_time_is_noop(
        principal in 0_i128..1_000_000_000_000,
        now in 1_u64..1_000_000_000,
    ) {
        let env = Env::default();
        let rate = reference_rate();
        let once = accrued_principal(&env, principal, rate, 0, now, FLUFF).unwrap();
        let twice = accrued_principal(&env, once, rate, now, now, FLUFF).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn interest_rounds_down(
        principal in 1_i128..1_000_000_000,
        elapsed in 1_u64..100_000_000,
    ) {
        let env = Env::default();
        let rate = reference_rate();
        let interest = interest_for(&env, principal, rate, elapsed, FLUFF).unwrap();
        let exact_numerator = principal * rate * elapsed as i128;
        prop_assert!(interest * FLUFF <= exact_numerator);
        prop_assert!((interest + 1) * FLUFF > exact_numerator);
    }

    #[test]
    fn wide_principal_matches_split_formula(
        principal in 1_000_000_000_000_000_000_i128..i128::MAX / 100_000_000,
        elapsed in 1_u64..10_000_000,
    ) {
        let env = Env::default();
        let rate = reference_rate();
        let e = elapsed as i128;
        // principal = whole * FLUFF + part keeps each product inside i128
        let (whole, part) = (principal / FLUFF, principal % FLUFF);
        let expected = whole
            .checked_mul(rate * e)
            .and_then(|w| w.checked_add(part * rate * e / FLUFF));
        prop_assert_eq!(interest_for(&env, principal, rate, elapsed, FLUFF), expected);
    }

    #[test]
    fn rate_matches_floored_formula(
        percent in 1_u32..1_000,
        period in 1_u64..100_000_000,
    ) {
        let model = InterestModel {
            annual_rate_percent: percent,
            seconds_per_accrual_period: period,
            float_fluff: FLUFF,
        };
        let expected = percent as i128 * FLUFF / 100 / period as i128;
        prop_assert_eq!(rate_per_second(&model), Some(expected).filter(|r| *r > 0));
    }

    #[test]
    fn ceiling_is_twice_collateral(collateral in 0_i128..i128::MAX / 2) {
        prop_assert_eq!(seize_ceiling(collateral), Some(collateral * 2));
    }
}

#[test]
fn huge_principal_reports_overflow() {
    let env = Env::default();
    let rate = reference_rate();
    assert_eq!(interest_for(&env, i128::MAX / 4, rate, 1_000_000_000, FLUFF), None);
    assert_eq!(accrued_principal(&env, i128::MAX, rate, 0, 0, FLUFF), Some(i128::MAX));
}

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CostError;

/// Days of consumption covered by one feeding period.
const PERIOD_DAYS: u32 = 7;

/// Fixed scale for all monetary and weight figures.
const SCALE: u32 = 2;

/// Outputs of the allocation arithmetic, all rounded half-up at 2 decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub total_weight_kg: Decimal,
    pub cost_per_kg: Decimal,
    pub total_cost: Decimal,
}

fn half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Division-by-zero guard: the available amount must be present and
/// non-zero before any arithmetic runs.
pub fn validate_available_amount(
    feed_id: i64,
    available_amount: Option<Decimal>,
) -> Result<Decimal, CostError> {
    match available_amount {
        Some(amount) if !amount.is_zero() => Ok(amount),
        _ => Err(CostError::InvalidAllocation(feed_id)),
    }
}

/// Computes the weight and cost of one allocation.
///
/// `total_weight_kg = grams_per_chicken * quantity * 7 / 1000`,
/// `cost_per_kg = unit_price / available_amount`,
/// `total_cost = total_weight_kg * cost_per_kg`,
/// each rounded half-up at 2 decimals. Callers must have validated
/// `available_amount` via [`validate_available_amount`] first.
pub fn compute(
    grams_per_chicken: Decimal,
    quantity: u32,
    unit_price: Decimal,
    available_amount: Decimal,
) -> CostBreakdown {
    let total_weight_kg = half_up(
        grams_per_chicken * Decimal::from(quantity) * Decimal::from(PERIOD_DAYS)
            / Decimal::from(1000u32),
    );

    let cost_per_kg = half_up(unit_price / available_amount);

    let total_cost = half_up(total_weight_kg * cost_per_kg);

    CostBreakdown {
        total_weight_kg,
        cost_per_kg,
        total_cost,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]
        #[test]
        fn outputs_are_deterministic_and_two_decimal(
            grams_cents in 1..5_000_00i64,
            quantity in 1..50_000u32,
            price_cents in 1..1_000_000i64,
            amount_cents in 1..1_000_000i64,
        ) {
            let grams = Decimal::new(grams_cents, 2);
            let price = Decimal::new(price_cents, 2);
            let amount = Decimal::new(amount_cents, 2);

            let a = compute(grams, quantity, price, amount);
            let b = compute(grams, quantity, price, amount);

            // --- Determinism ---
            assert_eq!(a, b);

            // --- Fixed scale: nothing survives past 2 decimals ---
            assert!(a.total_weight_kg.scale() <= 2);
            assert!(a.cost_per_kg.scale() <= 2);
            assert!(a.total_cost.scale() <= 2);

            // --- Positivity for positive inputs ---
            assert!(a.total_weight_kg >= Decimal::ZERO);
            assert!(a.cost_per_kg >= Decimal::ZERO);
            assert!(a.total_cost >= Decimal::ZERO);

            // --- total cost is the rounded product of the rounded factors ---
            let expected = (a.total_weight_kg * a.cost_per_kg)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(a.total_cost, expected);
        }
    }
}

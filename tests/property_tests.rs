//! Property-based tests for valuation and ledger math.
//!
//! These tests verify invariants hold under random inputs.

use alloy_primitives::U256;
use collateral_pool::*;
use proptest::prelude::*;

const A: AssetId = AssetId(1);
const B: AssetId = AssetId(2);

// Strategies for generating test data
fn quantity_strategy() -> impl Strategy<Value = u128> {
    0u128..=1_000_000_000_000_000_000_000_000u128 // up to 1M whole units
}

fn price_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000_000_000_000_000_000u128 // up to 1M units of value
}

fn holder_strategy() -> impl Strategy<Value = Holder> {
    any::<[u8; 20]>().prop_map(Holder::from_bytes)
}

fn amount(raw: u128) -> Amount {
    Amount::from_base_units(U256::from(raw))
}

fn price(raw: u128) -> Price {
    Price::from_base_units(raw).unwrap()
}

fn value_of(ledger: &Ledger, oracle: &StaticPriceOracle, holder: &Holder) -> U256 {
    ValuationEngine::new(ledger, oracle)
        .calc_collateral_value(holder)
        .unwrap()
        .value()
}

proptest! {
    /// A holder that was never credited is worth zero, whatever the oracle says
    #[test]
    fn never_credited_holder_is_zero(
        holder in holder_strategy(),
        other in holder_strategy(),
        qty in quantity_strategy(),
        p in price_strategy(),
    ) {
        prop_assume!(holder != other);
        let mut ledger = Ledger::new();
        ledger.credit(other, A, amount(qty)).unwrap();
        let oracle = StaticPriceOracle::new().with_price(A, price(p));

        prop_assert_eq!(value_of(&ledger, &oracle, &holder), U256::ZERO);
    }

    /// Debit never drives a balance negative and a failed debit changes nothing
    #[test]
    fn debit_never_goes_negative(
        holder in holder_strategy(),
        credited in quantity_strategy(),
        requested in quantity_strategy(),
    ) {
        let mut ledger = Ledger::new();
        ledger.credit(holder, A, amount(credited)).unwrap();

        match ledger.debit(holder, A, amount(requested)) {
            Ok(balance) => {
                prop_assert!(requested <= credited);
                prop_assert_eq!(balance, amount(credited - requested));
            }
            Err(LedgerError::InsufficientBalance { available, .. }) => {
                prop_assert!(requested > credited);
                prop_assert_eq!(available, amount(credited));
                prop_assert_eq!(ledger.balance_of(&holder, A), amount(credited));
            }
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }

    /// Credit followed by an equal debit restores the prior balance
    #[test]
    fn credit_debit_round_trip(
        holder in holder_strategy(),
        initial in quantity_strategy(),
        delta in quantity_strategy(),
    ) {
        let mut ledger = Ledger::new();
        ledger.credit(holder, A, amount(initial)).unwrap();
        let before = ledger.balance_of(&holder, A);

        ledger.credit(holder, A, amount(delta)).unwrap();
        ledger.debit(holder, A, amount(delta)).unwrap();

        prop_assert_eq!(ledger.balance_of(&holder, A), before);
        prop_assert_eq!(ledger.total_supply(A), before);
    }

    /// Raising a price never lowers the value
    #[test]
    fn value_monotonic_in_price(
        qty_a in quantity_strategy(),
        qty_b in quantity_strategy(),
        p_a in price_strategy(),
        p_b in price_strategy(),
        bump in 0u128..1_000_000_000_000_000_000u128,
    ) {
        let holder = Holder::from_bytes([7; 20]);
        let mut ledger = Ledger::new();
        ledger.credit(holder, A, amount(qty_a)).unwrap();
        ledger.credit(holder, B, amount(qty_b)).unwrap();

        let low = StaticPriceOracle::new().with_price(A, price(p_a)).with_price(B, price(p_b));
        let high = low.clone().with_price(A, price(p_a + bump));

        prop_assert!(value_of(&ledger, &high, &holder) >= value_of(&ledger, &low, &holder));
    }

    /// Holding more of an asset never lowers the value
    #[test]
    fn value_monotonic_in_balance(
        qty_a in quantity_strategy(),
        qty_b in quantity_strategy(),
        extra in quantity_strategy(),
        p_a in price_strategy(),
        p_b in price_strategy(),
    ) {
        let holder = Holder::from_bytes([9; 20]);
        let oracle = StaticPriceOracle::new().with_price(A, price(p_a)).with_price(B, price(p_b));

        let mut ledger = Ledger::new();
        ledger.credit(holder, A, amount(qty_a)).unwrap();
        ledger.credit(holder, B, amount(qty_b)).unwrap();
        let before = value_of(&ledger, &oracle, &holder);

        ledger.credit(holder, B, amount(extra)).unwrap();
        prop_assert!(value_of(&ledger, &oracle, &holder) >= before);
    }

    /// Truncation only ever rounds down, and by less than one base unit per asset
    #[test]
    fn value_never_exceeds_exact_product(
        qty in quantity_strategy(),
        p in price_strategy(),
    ) {
        let holder = Holder::from_bytes([3; 20]);
        let mut ledger = Ledger::new();
        ledger.credit(holder, A, amount(qty)).unwrap();
        let oracle = StaticPriceOracle::new().with_price(A, price(p));

        let value = value_of(&ledger, &oracle, &holder);
        let denominator = U256::from(BASE_UNITS_PER_UNIT);
        let exact_numerator = U256::from(qty) * U256::from(p);

        prop_assert!(value * denominator <= exact_numerator);
        prop_assert!(exact_numerator < (value + U256::from(1u64)) * denominator);
    }

    /// Breakdown lines always add up to the scalar value
    #[test]
    fn breakdown_sums_to_total(
        qty_a in quantity_strategy(),
        qty_b in quantity_strategy(),
        p_a in price_strategy(),
        p_b in price_strategy(),
    ) {
        let holder = Holder::from_bytes([5; 20]);
        let mut ledger = Ledger::new();
        ledger.credit(holder, A, amount(qty_a)).unwrap();
        ledger.credit(holder, B, amount(qty_b)).unwrap();
        let oracle = StaticPriceOracle::new().with_price(A, price(p_a)).with_price(B, price(p_b));

        let engine = ValuationEngine::new(&ledger, &oracle);
        let breakdown = engine.calc_collateral_breakdown(&holder).unwrap();
        let summed = breakdown
            .lines
            .iter()
            .fold(U256::ZERO, |acc, line| acc + line.value.value());

        prop_assert_eq!(summed, breakdown.total.value());
        prop_assert_eq!(breakdown.total, engine.calc_collateral_value(&holder).unwrap());
    }
}

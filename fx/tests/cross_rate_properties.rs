//! Property-based tests for the cross-rate matrix.
//!
//! These verify that the structural and numeric invariants of the matrix hold
//! for arbitrary quote sets, in both quote orientations.

use std::sync::Arc;

use crossrate_common::{Currency, CurrencyRegistry};
use crossrate_fx::{
    cross_rates, ExchangeRates, ExchangeService, FixedTableProvider, QuoteBasis, QuoteMap,
    RequestContext,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const POOL: &[&str] = &["AUD", "CHF", "EUR", "GBP", "JPY", "USD"];

fn cur(code: &str) -> Currency {
    Currency::new(code, code, 2)
}

/// Generate a strictly positive quote between 0.000001 and 10,000,000.
fn arb_quote() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64, 0u32..=6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn arb_basis() -> impl Strategy<Value = QuoteBasis> {
    prop_oneof![Just(QuoteBasis::UnitsPerBase), Just(QuoteBasis::BasePerUnit)]
}

/// Generate a quote map over the pool and a target subset of 1..=6 codes.
fn arb_market() -> impl Strategy<Value = (QuoteMap, Vec<Currency>)> {
    (
        arb_basis(),
        prop::collection::vec(arb_quote(), POOL.len()),
        prop::sample::subsequence(POOL.to_vec(), 1..=POOL.len()),
    )
        .prop_map(|(basis, quotes, targets)| {
            let map = QuoteMap::from_quotes(
                cur("USD"),
                basis,
                POOL.iter().copied().zip(quotes),
            );
            (map, targets.into_iter().map(cur).collect())
        })
}

/// Pick two distinct assets from the fixed price table.
fn arb_fixed_pair() -> impl Strategy<Value = (String, String)> {
    const TABLE: &[&str] = &["USD", "BEER", "FLOKI", "GATE", "USDT", "WBTC"];
    prop::sample::subsequence(TABLE.to_vec(), 2)
        .prop_shuffle()
        .prop_map(|pair| (pair[0].to_string(), pair[1].to_string()))
}

/// Relative difference between two positive decimals.
fn relative_diff(a: Decimal, b: Decimal) -> Decimal {
    ((a - b) / b).abs()
}

fn count(rates: &ExchangeRates, from: &str, to: &str) -> usize {
    rates
        .iter()
        .filter(|r| r.from.code() == from && r.to.code() == to)
        .count()
}

proptest! {
    // ===================================================================
    // Row count: n(n-1) ordered pairs plus two base rows per non-base target.
    // ===================================================================
    #[test]
    fn row_count_matches_shape((quotes, targets) in arb_market()) {
        let rates = cross_rates(&quotes, &targets).unwrap();

        let n = targets.len();
        let non_base = targets.iter().filter(|c| c.code() != "USD").count();
        prop_assert_eq!(rates.len(), n * (n - 1) + 2 * non_base);
    }

    // ===================================================================
    // Never a self rate, and every rate is strictly positive.
    // ===================================================================
    #[test]
    fn no_self_rates_and_positive((quotes, targets) in arb_market()) {
        let rates = cross_rates(&quotes, &targets).unwrap();

        for rate in rates.iter() {
            prop_assert_ne!(rate.from.code(), rate.to.code());
            prop_assert!(rate.rate > Decimal::ZERO, "non-positive rate {}", rate);
        }
    }

    // ===================================================================
    // Base pairs appear twice when the base is targeted, once otherwise.
    // ===================================================================
    #[test]
    fn base_rows_duplicate_only_when_base_targeted((quotes, targets) in arb_market()) {
        let rates = cross_rates(&quotes, &targets).unwrap();
        let base_targeted = targets.iter().any(|c| c.code() == "USD");
        let expected = if base_targeted { 2 } else { 1 };

        for currency in targets.iter().filter(|c| c.code() != "USD") {
            prop_assert_eq!(count(&rates, currency.code(), "USD"), expected);
            prop_assert_eq!(count(&rates, "USD", currency.code()), expected);
        }
    }

    // ===================================================================
    // Inverse law: rate(a, b) * rate(b, a) is one, up to decimal rounding.
    // ===================================================================
    #[test]
    fn inverse_rates_multiply_to_one((quotes, targets) in arb_market()) {
        let rates = cross_rates(&quotes, &targets).unwrap();

        for rate in rates.iter() {
            let back = rates.find(&rate.to, &rate.from).unwrap();
            let product = rate.rate * back.rate;
            prop_assert!(
                relative_diff(product, Decimal::ONE) < dec!(0.000000001),
                "{} * {} = {}", rate, back, product
            );
        }
    }

    // ===================================================================
    // Round trip: converting a -> b -> a returns the original amount.
    // ===================================================================
    #[test]
    fn round_trip_preserves_amount(
        (quotes, targets) in arb_market(),
        amount in (1u64..1_000_000u64).prop_map(Decimal::from),
    ) {
        let rates = cross_rates(&quotes, &targets).unwrap();

        for rate in rates.iter() {
            let back = rates.find(&rate.to, &rate.from).unwrap();
            let restored = amount * rate.rate * back.rate;
            prop_assert!(relative_diff(restored, amount) < dec!(0.000000001));
        }
    }

    // ===================================================================
    // Input order and duplicates do not change the output.
    // ===================================================================
    #[test]
    fn output_independent_of_target_order((quotes, targets) in arb_market()) {
        let forward = cross_rates(&quotes, &targets).unwrap();

        let mut shuffled: Vec<Currency> = targets.iter().rev().cloned().collect();
        shuffled.extend(targets.iter().cloned());
        let reversed = cross_rates(&quotes, &shuffled).unwrap();

        prop_assert_eq!(forward, reversed);
    }

    // ===================================================================
    // Service round trip through the fixed table: a -> b -> a.
    // ===================================================================
    #[test]
    fn exchange_round_trip_through_fixed_table(
        (from, to) in arb_fixed_pair(),
        amount in (1i64..100_000_000i64, 0u32..=4).prop_map(|(m, s)| Decimal::new(m, s)),
    ) {
        let registry = Arc::new(CurrencyRegistry::with_defaults());
        let service = ExchangeService::new(Arc::new(FixedTableProvider::new(registry.clone())));
        let from = registry.lookup(&from).unwrap();
        let to = registry.lookup(&to).unwrap();
        let ctx = RequestContext::new();

        let there = tokio_test::block_on(service.exchange(&ctx, &from, &to, amount)).unwrap();
        let back = tokio_test::block_on(service.exchange(&ctx, &to, &from, there.value)).unwrap();

        prop_assert_eq!(&back.currency, &from);
        prop_assert!(relative_diff(back.value, amount) < dec!(0.000000001));
    }
}

//! End-to-end conversions through the offline providers.

use std::sync::Arc;

use crossrate_common::{Currency, CurrencyRegistry};
use crossrate_fx::{
    ExchangeService, FixedTableProvider, FxError, RateProvider, RequestContext,
    StaticRatesProvider,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn registry() -> Arc<CurrencyRegistry> {
    Arc::new(CurrencyRegistry::with_defaults())
}

fn cur(code: &str) -> Currency {
    CurrencyRegistry::with_defaults().lookup(code).unwrap()
}

fn fixed() -> ExchangeService {
    ExchangeService::new(Arc::new(FixedTableProvider::new(registry())))
}

fn fixture() -> ExchangeService {
    ExchangeService::new(Arc::new(StaticRatesProvider::new(registry())))
}

fn approx(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < dec!(0.0000000001)
}

#[tokio::test]
async fn test_fixed_beer_to_usd_is_exact() {
    let usd = fixed()
        .exchange(&RequestContext::new(), &cur("BEER"), &cur("USD"), dec!(1000000))
        .await
        .unwrap();

    assert_eq!(usd.value, dec!(24.61));
    assert_eq!(usd.currency.code(), "USD");
}

#[tokio::test]
async fn test_fixed_usd_to_gate() {
    let gate = fixed()
        .exchange(&RequestContext::new(), &cur("USD"), &cur("GATE"), dec!(100))
        .await
        .unwrap();

    assert!(approx(gate.value, dec!(14.55604075691411935953420670)));
    assert_eq!(gate.round().value, dec!(14.556040756914119360));
}

#[tokio::test]
async fn test_fixed_crypto_cross() {
    let ctx = RequestContext::new();
    let service = fixed();

    let usdt = service
        .exchange(&ctx, &cur("GATE"), &cur("USDT"), dec!(1))
        .await
        .unwrap();
    assert!(approx(usdt.value, dec!(6.876876876876876876876876877)));

    let gate = service
        .exchange(&ctx, &cur("WBTC"), &cur("GATE"), dec!(1))
        .await
        .unwrap();
    assert!(approx(gate.value, dec!(8302.360989810771470160116448)));
}

#[tokio::test]
async fn test_fixed_round_trip() {
    let ctx = RequestContext::new();
    let service = fixed();

    let floki = service
        .exchange(&ctx, &cur("WBTC"), &cur("FLOKI"), dec!(2.5))
        .await
        .unwrap();
    let back = service
        .exchange(&ctx, &cur("FLOKI"), &cur("WBTC"), floki.value)
        .await
        .unwrap();

    assert!(approx(back.value, dec!(2.5)));
}

#[tokio::test]
async fn test_fixed_pair_outside_table() {
    let result = fixed()
        .exchange(&RequestContext::new(), &cur("USD"), &cur("EUR"), dec!(10))
        .await;

    match result {
        Err(FxError::RateNotFound(pair)) => assert_eq!(pair.to_string(), "USD/EUR"),
        other => panic!("expected RateNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fixture_usd_to_btc() {
    let btc = fixture()
        .exchange(&RequestContext::new(), &cur("USD"), &cur("BTC"), dec!(1))
        .await
        .unwrap();

    assert_eq!(btc.value, dec!(0.000009104837));
    assert_eq!(btc.round().value, dec!(0.0000091));
}

#[tokio::test]
async fn test_fixture_eur_to_gbp() {
    let gbp = fixture()
        .exchange(&RequestContext::new(), &cur("EUR"), &cur("GBP"), dec!(100))
        .await
        .unwrap();

    assert_eq!(gbp.value, dec!(86.0847541054862383));
    assert_eq!(gbp.round().value, dec!(86.08));
}

#[tokio::test]
async fn test_identity_with_every_provider() {
    let ctx = RequestContext::new();
    for service in [fixed(), fixture()] {
        let same = service
            .exchange(&ctx, &cur("USD"), &cur("USD"), dec!(42.5))
            .await
            .unwrap();
        assert_eq!(same.value, dec!(42.5));
    }
}

#[tokio::test]
async fn test_invalid_amount_with_every_provider() {
    let ctx = RequestContext::new();
    for service in [fixed(), fixture()] {
        let result = service
            .exchange(&ctx, &cur("USD"), &cur("BTC"), dec!(-1))
            .await;
        assert!(matches!(result, Err(FxError::InvalidAmount(_))));
    }
}

#[tokio::test]
async fn test_supported_currency_codes() {
    let ctx = RequestContext::new();

    assert_eq!(
        fixed().supported_currencies(&ctx).await.unwrap(),
        vec!["USD", "BEER", "FLOKI", "GATE", "USDT", "WBTC"]
    );
    assert_eq!(
        fixture().supported_currencies(&ctx).await.unwrap(),
        vec!["USD", "GBP", "EUR", "BTC"]
    );
}

#[tokio::test]
async fn test_providers_reject_single_currency() {
    let ctx = RequestContext::new();
    let providers: Vec<Arc<dyn RateProvider>> = vec![
        Arc::new(FixedTableProvider::new(registry())),
        Arc::new(StaticRatesProvider::new(registry())),
    ];

    for provider in providers {
        let result = provider.rates(&ctx, &[cur("USD")]).await;
        assert!(
            matches!(result, Err(FxError::InsufficientCurrencies(ref codes)) if codes == &["USD"]),
            "{}: {result:?}",
            provider.name()
        );
    }
}

//! Static rate table for deterministic tests and demos.

use std::sync::Arc;

use async_trait::async_trait;
use crossrate_common::{Currency, CurrencyRegistry};
use rust_decimal::Decimal;

use crate::context::RequestContext;
use crate::error::{FxError, FxResult};
use crate::provider::{distinct_currencies, RateProvider};
use crate::rate::{ExchangeRate, ExchangeRates};

const SUPPORTED: &[&str] = &["USD", "GBP", "EUR", "BTC"];

/// Hand-authored USD/GBP/EUR/BTC matrix, shaped like live provider output.
const RATES: &[(&str, &str, &str)] = &[
    ("USD", "BTC", "0.000009104837"),
    ("EUR", "BTC", "0.0000106959819745101"),
    ("USD", "BTC", "0.000009104837"),
    ("GBP", "BTC", "0.0000124249434010156"),
    ("USD", "EUR", "0.851239"),
    ("BTC", "EUR", "93493.05209966965911"),
    ("USD", "EUR", "0.851239"),
    ("GBP", "EUR", "1.161645880726595859"),
    ("USD", "GBP", "0.732787"),
    ("BTC", "GBP", "80483.26400571476458"),
    ("USD", "GBP", "0.732787"),
    ("EUR", "GBP", "0.860847541054862383"),
    ("EUR", "USD", "1.174758205392375114"),
    ("GBP", "USD", "1.364653030143820783"),
    ("GBP", "USD", "1.364653030143820783"),
    ("EUR", "USD", "1.174758205392375114"),
    ("BTC", "USD", "109831.7301012637568"),
    ("BTC", "USD", "109831.7301012637568"),
];

/// Returns the same matrix on every call and never touches the network.
pub struct StaticRatesProvider {
    registry: Arc<CurrencyRegistry>,
}

impl StaticRatesProvider {
    pub fn new(registry: Arc<CurrencyRegistry>) -> Self {
        Self { registry }
    }

    fn currency(&self, code: &str) -> FxResult<Currency> {
        self.registry
            .lookup(code)
            .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))
    }
}

#[async_trait]
impl RateProvider for StaticRatesProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn supported_currencies(&self, _ctx: &RequestContext) -> FxResult<Vec<Currency>> {
        SUPPORTED.iter().map(|code| self.currency(code)).collect()
    }

    async fn rates(
        &self,
        _ctx: &RequestContext,
        currencies: &[Currency],
    ) -> FxResult<ExchangeRates> {
        distinct_currencies(currencies)?;

        RATES
            .iter()
            .map(|&(from, to, rate)| -> FxResult<ExchangeRate> {
                let rate = Decimal::from_str_exact(rate).map_err(|e| {
                    FxError::Calculation(format!("fixture rate {from}/{to}: {e}"))
                })?;
                Ok(ExchangeRate::new(self.currency(from)?, self.currency(to)?, rate))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn registry() -> Arc<CurrencyRegistry> {
        Arc::new(CurrencyRegistry::with_defaults())
    }

    #[tokio::test]
    async fn test_fixture_matrix() {
        let registry = registry();
        let provider = StaticRatesProvider::new(registry.clone());
        let usd = registry.lookup("USD").unwrap();
        let btc = registry.lookup("BTC").unwrap();

        let rates = provider
            .rates(&RequestContext::new(), &[usd.clone(), btc.clone()])
            .await
            .unwrap();

        assert_eq!(rates.len(), 18);
        assert_eq!(rates.find(&usd, &btc).unwrap().rate, dec!(0.000009104837));
        assert_eq!(
            rates.find(&btc, &usd).unwrap().rate,
            dec!(109831.7301012637568)
        );
    }

    #[tokio::test]
    async fn test_fixture_sorted_by_to() {
        let registry = registry();
        let provider = StaticRatesProvider::new(registry.clone());
        let usd = registry.lookup("USD").unwrap();
        let eur = registry.lookup("EUR").unwrap();

        let rates = provider
            .rates(&RequestContext::new(), &[usd, eur])
            .await
            .unwrap();
        let mut sorted = rates.clone();
        sorted.sort_by_to();
        assert_eq!(rates, sorted);
    }

    #[tokio::test]
    async fn test_supported_currencies() {
        let provider = StaticRatesProvider::new(registry());
        let supported = provider
            .supported_currencies(&RequestContext::new())
            .await
            .unwrap();
        let codes: Vec<&str> = supported.iter().map(|c| c.code()).collect();
        assert_eq!(codes, SUPPORTED);
    }

    #[tokio::test]
    async fn test_requires_two_currencies() {
        let registry = registry();
        let provider = StaticRatesProvider::new(registry.clone());
        let usd = registry.lookup("USD").unwrap();

        let result = provider.rates(&RequestContext::new(), &[usd]).await;
        assert!(matches!(result, Err(FxError::InsufficientCurrencies(_))));
    }
}

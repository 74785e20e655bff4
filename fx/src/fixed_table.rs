//! Offline provider backed by a hardcoded crypto price table.

use std::sync::Arc;

use async_trait::async_trait;
use crossrate_common::{Currency, CurrencyRegistry};
use rust_decimal::Decimal;
use tracing::debug;

use crate::context::RequestContext;
use crate::cross::cross_rates;
use crate::error::{FxError, FxResult};
use crate::provider::{distinct_currencies, RateProvider};
use crate::quotes::{QuoteBasis, QuoteMap};
use crate::rate::ExchangeRates;

const BASE_CURRENCY: &str = "USD";

/// USD price of one unit of each asset, as `(code, mantissa, scale)`.
const PRICES_IN_USD: &[(&str, i64, u32)] = &[
    ("USD", 1, 0),
    ("BEER", 2461, 8),
    ("FLOKI", 1428, 7),
    ("GATE", 687, 2),
    ("USDT", 999, 3),
    ("WBTC", 5_703_722, 2),
];

/// Quotes a fixed set of crypto assets against each other.
///
/// Every `rates` call returns the matrix for the whole table regardless of
/// which currencies were asked for, in engine group order (not re-sorted).
pub struct FixedTableProvider {
    registry: Arc<CurrencyRegistry>,
}

impl FixedTableProvider {
    pub fn new(registry: Arc<CurrencyRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve every table code through the registry.
    fn universe(&self) -> FxResult<Vec<Currency>> {
        PRICES_IN_USD
            .iter()
            .map(|(code, _, _)| {
                self.registry
                    .lookup(code)
                    .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))
            })
            .collect()
    }

    fn quotes(&self) -> FxResult<QuoteMap> {
        let base = self
            .registry
            .lookup(BASE_CURRENCY)
            .ok_or_else(|| FxError::UnknownCurrency(BASE_CURRENCY.to_string()))?;

        Ok(QuoteMap::from_quotes(
            base,
            QuoteBasis::BasePerUnit,
            PRICES_IN_USD
                .iter()
                .map(|&(code, mantissa, scale)| (code, Decimal::new(mantissa, scale))),
        ))
    }
}

#[async_trait]
impl RateProvider for FixedTableProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn supported_currencies(&self, _ctx: &RequestContext) -> FxResult<Vec<Currency>> {
        self.universe()
    }

    async fn rates(
        &self,
        _ctx: &RequestContext,
        currencies: &[Currency],
    ) -> FxResult<ExchangeRates> {
        distinct_currencies(currencies)?;

        let universe = self.universe()?;
        let rates = cross_rates(&self.quotes()?, &universe)?;

        debug!(
            provider = self.name(),
            currencies = universe.len(),
            rows = rates.len(),
            "Built fixed-table rates"
        );
        Ok(rates)
    }
}

//! Rate provider trait and shared helpers.

use async_trait::async_trait;
use crossrate_common::Currency;

use crate::context::RequestContext;
use crate::error::{FxError, FxResult};
use crate::rate::ExchangeRates;

/// A backend able to quote exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short provider name used in log fields.
    fn name(&self) -> &str;

    /// Currencies this provider can quote.
    async fn supported_currencies(&self, ctx: &RequestContext) -> FxResult<Vec<Currency>>;

    /// Cross-rate matrix for the requested currencies.
    ///
    /// At least two distinct currencies are required; otherwise this fails
    /// with [`FxError::InsufficientCurrencies`] before doing any I/O.
    async fn rates(&self, ctx: &RequestContext, currencies: &[Currency])
        -> FxResult<ExchangeRates>;
}

/// Sorted, deduplicated copy of `currencies`, requiring at least two entries.
pub fn distinct_currencies(currencies: &[Currency]) -> FxResult<Vec<Currency>> {
    let mut distinct = currencies.to_vec();
    distinct.sort();
    distinct.dedup();

    if distinct.len() < 2 {
        return Err(FxError::InsufficientCurrencies(
            currencies.iter().map(|c| c.code().to_string()).collect(),
        ));
    }

    Ok(distinct)
}

/// Mock rate provider for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateProvider {
    name: String,
    rates: ExchangeRates,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateProvider {
    /// Create a mock that answers every `rates` call with `rates`.
    pub fn new(name: impl Into<String>, rates: ExchangeRates) -> Self {
        Self {
            name: name.into(),
            rates,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of `rates` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn supported_currencies(&self, _ctx: &RequestContext) -> FxResult<Vec<Currency>> {
        let mut currencies: Vec<Currency> = self
            .rates
            .iter()
            .flat_map(|r| [r.from.clone(), r.to.clone()])
            .collect();
        currencies.sort();
        currencies.dedup();
        Ok(currencies)
    }

    async fn rates(
        &self,
        _ctx: &RequestContext,
        currencies: &[Currency],
    ) -> FxResult<ExchangeRates> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        distinct_currencies(currencies)?;
        Ok(self.rates.clone())
    }
}

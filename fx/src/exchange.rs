//! Exchange service: converts amounts using whichever provider it was built with.

use std::sync::Arc;

use crossrate_common::{Currency, CurrencyPair, Money};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::context::RequestContext;
use crate::conversion::Conversion;
use crate::error::{FxError, FxResult};
use crate::provider::RateProvider;

/// Converts amounts between currencies.
///
/// Rates are fetched fresh from the provider for every conversion.
pub struct ExchangeService {
    provider: Arc<dyn RateProvider>,
}

impl ExchangeService {
    /// Create a new exchange service with the given provider.
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// Name of the provider backing this service.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Convert `amount` of `from` into `to`.
    pub async fn exchange(
        &self,
        ctx: &RequestContext,
        from: &Currency,
        to: &Currency,
        amount: Decimal,
    ) -> FxResult<Money> {
        let conversion = self.convert(ctx, &Money::new(amount, from.clone()), to).await?;
        Ok(conversion.output)
    }

    /// Convert an amount and return the full conversion record.
    #[instrument(skip_all, fields(
        provider = self.provider.name(),
        from_currency = %amount.currency,
        to_currency = %to,
        amount = %amount.value
    ))]
    pub async fn convert(
        &self,
        ctx: &RequestContext,
        amount: &Money,
        to: &Currency,
    ) -> FxResult<Conversion> {
        if !amount.is_positive() {
            return Err(FxError::InvalidAmount(amount.value));
        }

        if amount.currency == *to {
            debug!("Identity conversion");
            return Ok(Conversion::new(
                amount.clone(),
                Money::new(amount.value, to.clone()),
                Decimal::ONE,
            ));
        }

        let pair = CurrencyPair::new(amount.currency.clone(), to.clone());
        let rates = self
            .provider
            .rates(ctx, &[pair.from.clone(), pair.to.clone()])
            .await?;

        let rate = rates
            .find(&pair.from, &pair.to)
            .map(|r| r.rate)
            .ok_or_else(|| FxError::RateNotFound(pair.clone()))?;

        let value = amount.value.checked_mul(rate).ok_or_else(|| {
            FxError::Calculation(format!("{} * {rate} overflows for {pair}", amount.value))
        })?;

        let conversion = Conversion::new(amount.clone(), Money::new(value, to.clone()), rate);

        info!(rate = %rate, output = %conversion.output, "Conversion completed");

        Ok(conversion)
    }

    /// Codes of the currencies the provider can quote.
    pub async fn supported_currencies(&self, ctx: &RequestContext) -> FxResult<Vec<String>> {
        let currencies = self.provider.supported_currencies(ctx).await?;
        Ok(currencies.iter().map(|c| c.code().to_string()).collect())
    }
}

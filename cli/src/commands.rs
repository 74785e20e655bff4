//! Subcommand handlers. Each returns a serializable value for the caller to print.

use crossrate_common::{Currency, CurrencyRegistry, Money};
use crossrate_fx::{ExchangeRates, ExchangeService, FxResult, RateProvider, RequestContext};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::boundary::{parse_currency, parse_currency_list, validate_amount};

/// Result of `convert`. Amounts are rendered as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeOutput {
    pub from: String,
    pub to: String,
    /// Converted amount rounded to the target currency's minor units.
    pub amount: Decimal,
    pub rate: Decimal,
}

/// Currency listing entry for `currencies`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyOutput {
    pub code: String,
    pub symbol: String,
    pub decimal_places: u32,
}

impl From<&Currency> for CurrencyOutput {
    fn from(currency: &Currency) -> Self {
        Self {
            code: currency.code().to_string(),
            symbol: currency.symbol().to_string(),
            decimal_places: currency.decimal_places(),
        }
    }
}

/// Cross-rate matrix for a comma-separated currency list.
pub async fn rates(
    provider: &dyn RateProvider,
    registry: &CurrencyRegistry,
    ctx: &RequestContext,
    currencies: &str,
) -> FxResult<ExchangeRates> {
    let currencies = parse_currency_list(registry, currencies)?;
    let rates = provider.rates(ctx, &currencies).await?;

    info!(provider = provider.name(), rows = rates.len(), "Rates fetched");
    Ok(rates)
}

/// Convert `amount` of `from` into `to`.
pub async fn convert(
    service: &ExchangeService,
    registry: &CurrencyRegistry,
    ctx: &RequestContext,
    from: &str,
    to: &str,
    amount: Decimal,
) -> FxResult<ExchangeOutput> {
    let from = parse_currency(registry, from)?;
    let to = parse_currency(registry, to)?;
    let amount = validate_amount(amount)?;

    let conversion = service
        .convert(ctx, &Money::new(amount, from), &to)
        .await?;

    Ok(ExchangeOutput {
        from: conversion.input.currency.code().to_string(),
        to: conversion.output.currency.code().to_string(),
        amount: conversion.rounded_output().value,
        rate: conversion.rate,
    })
}

/// Currencies the provider can quote.
pub async fn currencies(
    provider: &dyn RateProvider,
    ctx: &RequestContext,
) -> FxResult<Vec<CurrencyOutput>> {
    let currencies = provider.supported_currencies(ctx).await?;
    Ok(currencies.iter().map(CurrencyOutput::from).collect())
}

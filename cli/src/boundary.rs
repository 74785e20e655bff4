//! Caller input validation.
//!
//! Raw user input is turned into registry currencies and checked amounts here,
//! before any provider is consulted.

use crossrate_common::{Currency, CurrencyRegistry};
use crossrate_fx::{FxError, FxResult};
use rust_decimal::Decimal;

/// Resolve a single currency code.
pub fn parse_currency(registry: &CurrencyRegistry, code: &str) -> FxResult<Currency> {
    let code = code.trim();
    registry
        .lookup(code)
        .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))
}

/// Resolve a comma-separated list such as `USD,GBP,EUR`.
///
/// At least two entries are required; the order and any repeats are kept.
pub fn parse_currency_list(registry: &CurrencyRegistry, raw: &str) -> FxResult<Vec<Currency>> {
    let codes: Vec<&str> = raw.split(',').map(str::trim).collect();
    if codes.len() < 2 {
        return Err(FxError::InsufficientCurrencies(
            codes.iter().map(|c| c.to_string()).collect(),
        ));
    }

    codes
        .into_iter()
        .map(|code| parse_currency(registry, code))
        .collect()
}

/// Amounts must be strictly positive.
pub fn validate_amount(amount: Decimal) -> FxResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(FxError::InvalidAmount(amount));
    }
    Ok(amount)
}

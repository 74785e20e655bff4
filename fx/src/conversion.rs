//! Completed conversion records.

use crossrate_common::{CurrencyPair, Money};
use rust_decimal::Decimal;
use serde::Serialize;

/// Represents a completed currency conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Input amount.
    pub input: Money,
    /// Output amount, unrounded.
    pub output: Money,
    /// Rate applied: one unit of the input currency buys this many output units.
    pub rate: Decimal,
}

impl Conversion {
    /// Create a new conversion record.
    pub fn new(input: Money, output: Money, rate: Decimal) -> Self {
        Self {
            input,
            output,
            rate,
        }
    }

    /// Get the currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.input.currency.clone(), self.output.currency.clone())
    }

    /// Output rounded to the target currency's minor units.
    pub fn rounded_output(&self) -> Money {
        self.output.round()
    }
}

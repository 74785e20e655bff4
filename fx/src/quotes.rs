//! Base-anchored quote tables.

use std::collections::HashMap;

use crossrate_common::Currency;
use rust_decimal::Decimal;

use crate::error::{FxError, FxResult};

/// How a quote relates a currency to the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteBasis {
    /// Units of the currency bought by one unit of the base
    /// (`EUR = 0.85` against USD). Upstream quote services answer this way.
    UnitsPerBase,
    /// Price of one unit of the currency in the base
    /// (`BEER = 0.00002461` USD). Asset price tables are written this way.
    BasePerUnit,
}

/// Quotes for a set of currencies, all anchored to one base currency.
///
/// The base is pinned to exactly one; inserting a quote for it is a no-op.
#[derive(Debug, Clone)]
pub struct QuoteMap {
    base: Currency,
    basis: QuoteBasis,
    quotes: HashMap<String, Decimal>,
}

impl QuoteMap {
    pub fn new(base: Currency, basis: QuoteBasis) -> Self {
        let mut quotes = HashMap::new();
        quotes.insert(base.code().to_string(), Decimal::ONE);
        Self {
            base,
            basis,
            quotes,
        }
    }

    pub fn from_quotes<I, S>(base: Currency, basis: QuoteBasis, quotes: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut map = Self::new(base, basis);
        for (code, quote) in quotes {
            map.insert(code, quote);
        }
        map
    }

    pub fn insert(&mut self, code: impl Into<String>, quote: Decimal) {
        let code = code.into();
        if code != self.base.code() {
            self.quotes.insert(code, quote);
        }
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    pub fn basis(&self) -> QuoteBasis {
        self.basis
    }

    pub fn get(&self, code: &str) -> Option<Decimal> {
        self.quotes.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.quotes.contains_key(code)
    }

    /// Number of quotes, the base included.
    pub(crate) fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Strictly positive quote for `code`.
    pub fn quote(&self, code: &str) -> FxResult<Decimal> {
        let quote = self
            .get(code)
            .ok_or_else(|| FxError::MissingRate(code.to_string()))?;
        if quote <= Decimal::ZERO {
            return Err(FxError::Calculation(format!(
                "non-positive quote {quote} for {code}"
            )));
        }
        Ok(quote)
    }

    /// Units of `to` bought by one unit of `from`.
    pub fn cross(&self, from: &str, to: &str) -> FxResult<Decimal> {
        let q_from = self.quote(from)?;
        let q_to = self.quote(to)?;
        let context = || format!("cross rate {from}/{to}");
        match self.basis {
            QuoteBasis::UnitsPerBase => divide(q_to, q_from, context),
            QuoteBasis::BasePerUnit => divide(q_from, q_to, context),
        }
    }

    /// Units of the base bought by one unit of `code`.
    pub fn to_base(&self, code: &str) -> FxResult<Decimal> {
        let quote = self.quote(code)?;
        match self.basis {
            QuoteBasis::UnitsPerBase => {
                divide(Decimal::ONE, quote, || format!("cross rate {code}/{}", self.base))
            }
            QuoteBasis::BasePerUnit => Ok(quote),
        }
    }

    /// Units of `code` bought by one unit of the base.
    pub fn from_base(&self, code: &str) -> FxResult<Decimal> {
        let quote = self.quote(code)?;
        match self.basis {
            QuoteBasis::UnitsPerBase => Ok(quote),
            QuoteBasis::BasePerUnit => {
                divide(Decimal::ONE, quote, || format!("cross rate {}/{code}", self.base))
            }
        }
    }
}

/// Checked decimal division; fails on a zero divisor or overflow.
pub(crate) fn divide(
    numerator: Decimal,
    divisor: Decimal,
    context: impl FnOnce() -> String,
) -> FxResult<Decimal> {
    if divisor.is_zero() {
        return Err(FxError::Calculation(format!("{}: division by zero", context())));
    }
    numerator
        .checked_div(divisor)
        .ok_or_else(|| FxError::Calculation(format!("{}: {numerator} / {divisor} overflows", context())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> Currency {
        Currency::new("USD", "$", 2)
    }

    #[test]
    fn test_base_is_pinned_to_one() {
        let quotes = QuoteMap::from_quotes(
            usd(),
            QuoteBasis::UnitsPerBase,
            [("USD", dec!(3)), ("EUR", dec!(0.85))],
        );
        assert_eq!(quotes.get("USD"), Some(Decimal::ONE));
        assert_eq!(quotes.len(), 2);
    }

    #[test]
    fn test_units_per_base_orientation() {
        let quotes = QuoteMap::from_quotes(
            usd(),
            QuoteBasis::UnitsPerBase,
            [("EUR", dec!(0.8)), ("GBP", dec!(0.4))],
        );
        assert_eq!(quotes.cross("EUR", "GBP").unwrap(), dec!(0.5));
        assert_eq!(quotes.cross("USD", "EUR").unwrap(), dec!(0.8));
        assert_eq!(quotes.to_base("EUR").unwrap(), dec!(1.25));
        assert_eq!(quotes.from_base("EUR").unwrap(), dec!(0.8));
    }

    #[test]
    fn test_base_per_unit_orientation() {
        let quotes = QuoteMap::from_quotes(
            usd(),
            QuoteBasis::BasePerUnit,
            [("GATE", dec!(6.87)), ("WBTC", dec!(57037.22))],
        );
        assert_eq!(quotes.to_base("GATE").unwrap(), dec!(6.87));
        assert_eq!(quotes.cross("GATE", "USD").unwrap(), dec!(6.87));
        assert_eq!(quotes.cross("USD", "GATE").unwrap(), Decimal::ONE / dec!(6.87));
        assert_eq!(quotes.from_base("GATE").unwrap(), Decimal::ONE / dec!(6.87));
    }

    #[test]
    fn test_missing_and_non_positive_quotes() {
        let quotes = QuoteMap::from_quotes(
            usd(),
            QuoteBasis::UnitsPerBase,
            [("EUR", dec!(0)), ("GBP", dec!(-1))],
        );
        assert!(matches!(quotes.quote("JPY"), Err(FxError::MissingRate(c)) if c == "JPY"));
        assert!(matches!(quotes.cross("USD", "EUR"), Err(FxError::Calculation(_))));
        assert!(matches!(quotes.to_base("GBP"), Err(FxError::Calculation(_))));
    }

    #[test]
    fn test_divide_overflow() {
        let result = divide(Decimal::MAX, dec!(0.1), || "test".to_string());
        assert!(matches!(result, Err(FxError::Calculation(_))));
        assert!(matches!(
            divide(Decimal::ONE, Decimal::ZERO, || "test".to_string()),
            Err(FxError::Calculation(_))
        ));
    }
}

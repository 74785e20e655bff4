//! Directed exchange rates and ordered rate tables.

use std::fmt;

use crossrate_common::Currency;
use rust_decimal::Decimal;
use serde::Serialize;

/// One unit of `from` buys `rate` units of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRate {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(from: Currency, to: Currency, rate: Decimal) -> Self {
        Self { from, to, rate }
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} => {:?} ({})", self.from.code(), self.to.code(), self.rate)
    }
}

/// An ordered rate table.
///
/// Order is significant and the same `(from, to)` pair may appear more than
/// once. Lookups return the first matching row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExchangeRates(Vec<ExchangeRate>);

impl ExchangeRates {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, rate: ExchangeRate) {
        self.0.push(rate);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExchangeRate> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ExchangeRate] {
        &self.0
    }

    /// First row converting `from` into `to`, compared by code.
    pub fn find(&self, from: &Currency, to: &Currency) -> Option<&ExchangeRate> {
        self.0
            .iter()
            .find(|r| r.from.code() == from.code() && r.to.code() == to.code())
    }

    /// Stable sort by the `to` code; rows sharing a `to` keep their order.
    pub fn sort_by_to(&mut self) {
        self.0.sort_by(|a, b| a.to.code().cmp(b.to.code()));
    }

    /// Drop rows whose `from` or `to` is not in `currencies`.
    pub fn retain_within(&mut self, currencies: &[Currency]) {
        self.0
            .retain(|r| currencies.contains(&r.from) && currencies.contains(&r.to));
    }

    pub fn into_vec(self) -> Vec<ExchangeRate> {
        self.0
    }
}

impl From<Vec<ExchangeRate>> for ExchangeRates {
    fn from(rates: Vec<ExchangeRate>) -> Self {
        Self(rates)
    }
}

impl FromIterator<ExchangeRate> for ExchangeRates {
    fn from_iter<I: IntoIterator<Item = ExchangeRate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ExchangeRates {
    type Item = ExchangeRate;
    type IntoIter = std::vec::IntoIter<ExchangeRate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExchangeRates {
    type Item = &'a ExchangeRate;
    type IntoIter = std::slice::Iter<'a, ExchangeRate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

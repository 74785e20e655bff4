//! Cross-rate matrix construction.
//!
//! Turns a base-anchored [`QuoteMap`] into a directed rate for every ordered
//! pair of a target currency set. Row order is part of the contract:
//!
//! 1. `from` walks the target set in ascending code order.
//! 2. For each `from`, `to` walks the same order, skipping `from` itself.
//! 3. After the inner walk of every non-base `from`, two more rows follow:
//!    `from -> base` and `base -> from`.
//!
//! Step 3 runs even when the base is part of the target set, so those two
//! pairs then appear twice in the output. Consumers rely on this shape.
//!
//! All arithmetic is exact decimal; nothing is narrowed to a float here.

use crossrate_common::Currency;
use tracing::trace;

use crate::error::FxResult;
use crate::quotes::QuoteMap;
use crate::rate::{ExchangeRate, ExchangeRates};

/// Build the cross-rate matrix for `targets` from `quotes`.
///
/// Duplicate targets are collapsed. Fails with `MissingRate` when a target
/// has no quote and with `Calculation` when a division is not representable.
pub fn cross_rates(quotes: &QuoteMap, targets: &[Currency]) -> FxResult<ExchangeRates> {
    let mut currencies: Vec<&Currency> = targets.iter().collect();
    currencies.sort();
    currencies.dedup();

    for currency in &currencies {
        quotes.quote(currency.code())?;
    }

    let base = quotes.base();
    let n = currencies.len();
    let mut out = ExchangeRates::with_capacity(n * n + n);

    for &from in &currencies {
        for &to in &currencies {
            if from == to {
                continue;
            }
            let rate = quotes.cross(from.code(), to.code())?;
            out.push(ExchangeRate::new(from.clone(), to.clone(), rate));
        }

        if from != base {
            out.push(ExchangeRate::new(
                from.clone(),
                base.clone(),
                quotes.to_base(from.code())?,
            ));
            out.push(ExchangeRate::new(
                base.clone(),
                from.clone(),
                quotes.from_base(from.code())?,
            ));
        }
    }

    trace!(targets = n, rows = out.len(), base = %base, "Built cross-rate matrix");
    Ok(out)
}

//! Live provider backed by an Open Exchange Rates compatible HTTP API.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use crossrate_common::{Currency, CurrencyRegistry};
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::context::RequestContext;
use crate::cross::cross_rates;
use crate::error::{FxError, FxResult};
use crate::provider::{distinct_currencies, RateProvider};
use crate::quotes::{QuoteBasis, QuoteMap};
use crate::rate::ExchangeRates;

/// Public Open Exchange Rates API root.
pub const DEFAULT_BASE_URL: &str = "https://openexchangerates.org/api";

/// Every upstream quote is expressed against this currency.
const BASE_CURRENCY: &str = "USD";

/// Body of `GET /latest.json`. Fields other than `rates` are ignored.
///
/// Rates arrive as JSON numbers; serde_json's `arbitrary_precision` hands the
/// number text to rust_decimal so no quote passes through an `f64`.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    /// Units of each currency bought by one USD.
    rates: HashMap<String, Decimal>,
}

/// Fetches USD-anchored quotes on every call and derives the cross rates.
///
/// One attempt per call: no retries, no caching. The only time limit is the
/// caller's [`RequestContext`].
pub struct OpenExchangeRatesProvider {
    client: Client,
    base_url: String,
    app_id: String,
    registry: Arc<CurrencyRegistry>,
}

impl OpenExchangeRatesProvider {
    pub fn new(client: Client, app_id: impl Into<String>, registry: Arc<CurrencyRegistry>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: app_id.into(),
            registry,
        }
    }

    /// Point the provider at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn base_currency(&self) -> FxResult<Currency> {
        self.registry
            .lookup(BASE_CURRENCY)
            .ok_or_else(|| FxError::UnknownCurrency(BASE_CURRENCY.to_string()))
    }

    /// Fetch quotes for `requested` (sorted, distinct) and check none is missing.
    async fn latest_quotes(
        &self,
        ctx: &RequestContext,
        requested: &[Currency],
    ) -> FxResult<QuoteMap> {
        let symbols = requested
            .iter()
            .map(|c| c.code())
            .filter(|code| *code != BASE_CURRENCY)
            .collect::<Vec<_>>()
            .join(",");

        let request = self
            .client
            .get(format!("{}/latest.json", self.base_url))
            .query(&[("app_id", self.app_id.as_str()), ("symbols", symbols.as_str())]);

        let what = format!("fetching latest rates for [{symbols}]");
        let latest: LatestResponse = self.get_json(ctx, request, &what).await?;

        if latest.rates.is_empty() {
            return Err(FxError::NoRatesReturned { symbols });
        }

        let quotes =
            QuoteMap::from_quotes(self.base_currency()?, QuoteBasis::UnitsPerBase, latest.rates);

        if let Some(missing) = requested.iter().find(|c| !quotes.contains(c.code())) {
            return Err(FxError::MissingRate(missing.code().to_string()));
        }

        debug!(symbols = %symbols, quotes = quotes.len(), "Fetched upstream quotes");
        Ok(quotes)
    }

    /// Send `request` under the caller's context and decode a JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: RequestBuilder,
        what: &str,
    ) -> FxResult<T> {
        let body = ctx
            .run(what, async {
                let response = request.send().await?.error_for_status()?;
                let body = response.bytes().await?;
                Ok::<_, reqwest::Error>(body)
            })
            .await?
            .map_err(|source| FxError::Upstream {
                context: what.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| FxError::Decode {
            context: what.to_string(),
            source,
        })
    }
}

#[async_trait]
impl RateProvider for OpenExchangeRatesProvider {
    fn name(&self) -> &str {
        "openexchangerates"
    }

    #[instrument(skip(self, ctx), fields(provider = self.name()))]
    async fn supported_currencies(&self, ctx: &RequestContext) -> FxResult<Vec<Currency>> {
        let request = self.client.get(format!("{}/currencies.json", self.base_url));
        let names: HashMap<String, String> = self
            .get_json(ctx, request, "fetching supported currencies")
            .await?;

        let mut currencies = Vec::with_capacity(names.len());
        for code in names.keys() {
            match self.registry.lookup(code) {
                Some(currency) => currencies.push(currency),
                None => warn!(currency = %code, "Currency not found in registry, skipping"),
            }
        }
        currencies.sort();

        Ok(currencies)
    }

    #[instrument(skip_all, fields(provider = self.name(), requested = currencies.len()))]
    async fn rates(
        &self,
        ctx: &RequestContext,
        currencies: &[Currency],
    ) -> FxResult<ExchangeRates> {
        let requested = distinct_currencies(currencies)?;
        let quotes = self.latest_quotes(ctx, &requested).await?;

        let mut rates = cross_rates(&quotes, &requested)?;
        rates.sort_by_to();
        rates.retain_within(&requested);

        Ok(rates)
    }
}

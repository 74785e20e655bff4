//! Crossrate FX
//!
//! Cross-rate engine, rate providers and the exchange service.
//!
//! # Features
//!
//! - Exact-decimal cross-rate matrix built from base-anchored quotes
//! - Pluggable providers: live upstream API, fixed crypto table, static fixture
//! - Caller-controlled cancellation and deadlines for provider I/O
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crossrate_common::CurrencyRegistry;
//! use crossrate_fx::{ExchangeService, FixedTableProvider, RequestContext};
//! use rust_decimal_macros::dec;
//!
//! let registry = Arc::new(CurrencyRegistry::with_defaults());
//! let service = ExchangeService::new(Arc::new(FixedTableProvider::new(registry.clone())));
//!
//! let usd = registry.lookup("USD").unwrap();
//! let gate = registry.lookup("GATE").unwrap();
//! let out = service.exchange(&RequestContext::new(), &usd, &gate, dec!(100)).await?;
//! ```

pub mod context;
pub mod conversion;
pub mod cross;
pub mod error;
pub mod exchange;
pub mod fixed_table;
pub mod fixture;
pub mod live;
pub mod provider;
pub mod quotes;
pub mod rate;

pub use context::RequestContext;
pub use conversion::Conversion;
pub use cross::cross_rates;
pub use error::{FxError, FxResult};
pub use exchange::ExchangeService;
pub use fixed_table::FixedTableProvider;
pub use fixture::StaticRatesProvider;
pub use live::OpenExchangeRatesProvider;
pub use provider::{distinct_currencies, RateProvider};
pub use quotes::{QuoteBasis, QuoteMap};
pub use rate::{ExchangeRate, ExchangeRates};

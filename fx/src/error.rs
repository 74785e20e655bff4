//! FX error types.

use crossrate_common::CurrencyPair;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while producing rates or converting amounts.
#[derive(Debug, Error)]
pub enum FxError {
    /// Fewer than two distinct currencies were requested.
    #[error("At least 2 distinct currencies required, got {0:?}")]
    InsufficientCurrencies(Vec<String>),

    /// Currency code is not known to the registry.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Transport failure or non-success status from the upstream service.
    #[error("Upstream request failed while {context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream payload could not be decoded.
    #[error("Failed to decode upstream response while {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Upstream answered with an empty rate table.
    #[error("No rates returned for symbols {symbols:?}")]
    NoRatesReturned { symbols: String },

    /// A requested currency has no quote.
    #[error("Missing rate for {0}")]
    MissingRate(String),

    /// The provider produced no row for the requested pair.
    #[error("Rate not available for {0}")]
    RateNotFound(CurrencyPair),

    /// Decimal division or multiplication could not be carried out.
    #[error("Calculation failed: {0}")]
    Calculation(String),

    /// The caller cancelled the request.
    #[error("Request cancelled while {0}")]
    Cancelled(String),

    /// The caller's deadline passed before the request finished.
    #[error("Deadline exceeded while {0}")]
    DeadlineExceeded(String),

    /// Conversion amount was zero or negative.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),
}

impl FxError {
    /// Stable error code for outer surfaces.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::InsufficientCurrencies(_) => "INSUFFICIENT_CURRENCIES",
            FxError::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            FxError::Upstream { .. } => "UPSTREAM_ERROR",
            FxError::Decode { .. } => "DECODE_ERROR",
            FxError::NoRatesReturned { .. } => "NO_RATES_RETURNED",
            FxError::MissingRate(_) => "MISSING_RATE",
            FxError::RateNotFound(_) => "RATE_NOT_FOUND",
            FxError::Calculation(_) => "CALCULATION_ERROR",
            FxError::Cancelled(_) => "CANCELLED",
            FxError::DeadlineExceeded(_) => "DEADLINE_EXCEEDED",
            FxError::InvalidAmount(_) => "INVALID_AMOUNT",
        }
    }

    /// Whether the error came from caller input rather than from a backend.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            FxError::InsufficientCurrencies(_)
                | FxError::UnknownCurrency(_)
                | FxError::InvalidAmount(_)
        )
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;

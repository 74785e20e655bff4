//! Application configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use crossrate_fx::live::DEFAULT_BASE_URL;

/// Which rate provider backs the exchange service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Open Exchange Rates compatible HTTP API.
    Live,
    /// Hardcoded crypto price table.
    Fixed,
    /// Hand-authored USD/GBP/EUR/BTC matrix.
    Static,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "fixed" => Ok(Self::Fixed),
            "static" => Ok(Self::Static),
            other => Err(format!("Unknown rates provider: {other}")),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Fixed => write!(f, "fixed"),
            Self::Static => write!(f, "static"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Open Exchange Rates configuration.
#[derive(Debug, Clone)]
pub struct OpenExchangeRatesConfig {
    /// API application id. Required by the live provider.
    pub app_id: Option<String>,
    /// API root, without a trailing slash.
    pub base_url: String,
}

impl Default for OpenExchangeRatesConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Rate provider.
    pub provider: ProviderKind,
    /// Live provider settings.
    pub open_exchange_rates: OpenExchangeRatesConfig,
    /// Deadline applied to every provider call.
    pub request_deadline: Duration,
    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Fixed,
            open_exchange_rates: OpenExchangeRatesConfig::default(),
            request_deadline: Duration::from_millis(10_000),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(provider) = lookup("RATES_PROVIDER") {
            config.provider = provider.parse()?;
        }

        if let Some(app_id) = lookup("OPEN_EXCHANGE_RATES_APP_ID") {
            config.open_exchange_rates.app_id = Some(app_id);
        }

        if let Some(url) = lookup("OPEN_EXCHANGE_RATES_BASE_URL") {
            config.open_exchange_rates.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(ms) = lookup("REQUEST_DEADLINE_MS") {
            let ms: u64 = ms
                .parse()
                .map_err(|_| format!("REQUEST_DEADLINE_MS is not a number: {ms}"))?;
            config.request_deadline = Duration::from_millis(ms);
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            if format.eq_ignore_ascii_case("json") {
                config.log_format = LogFormat::Json;
            }
        }

        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.provider == ProviderKind::Live {
            let app_id = self.open_exchange_rates.app_id.as_deref().unwrap_or_default();
            if app_id.trim().is_empty() {
                return Err(
                    "OPEN_EXCHANGE_RATES_APP_ID is required for the live provider".to_string(),
                );
            }
            if self.open_exchange_rates.base_url.is_empty() {
                return Err("Open Exchange Rates base URL cannot be empty".to_string());
            }
        }

        if self.request_deadline.is_zero() {
            return Err("Request deadline cannot be 0".to_string());
        }

        Ok(())
    }
}

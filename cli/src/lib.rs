//! Crossrate CLI
//!
//! Configuration, input validation and subcommand handlers behind the
//! `crossrate` binary.

pub mod boundary;
pub mod commands;
pub mod config;

use std::sync::Arc;

use crossrate_common::CurrencyRegistry;
use crossrate_fx::{
    FixedTableProvider, OpenExchangeRatesProvider, RateProvider, StaticRatesProvider,
};
use tracing::info;

pub use config::{AppConfig, LogFormat, ProviderKind};

/// Build the configured rate provider.
pub fn build_provider(
    config: &AppConfig,
    registry: Arc<CurrencyRegistry>,
) -> anyhow::Result<Arc<dyn RateProvider>> {
    let provider: Arc<dyn RateProvider> = match config.provider {
        ProviderKind::Live => {
            let app_id = config
                .open_exchange_rates
                .app_id
                .clone()
                .ok_or_else(|| anyhow::anyhow!("OPEN_EXCHANGE_RATES_APP_ID is not set"))?;
            // No client timeout: the request context carries the deadline.
            let client = reqwest::Client::builder().build()?;
            Arc::new(
                OpenExchangeRatesProvider::new(client, app_id, registry)
                    .with_base_url(config.open_exchange_rates.base_url.clone()),
            )
        }
        ProviderKind::Fixed => Arc::new(FixedTableProvider::new(registry)),
        ProviderKind::Static => Arc::new(StaticRatesProvider::new(registry)),
    };

    info!(provider = provider.name(), "Rate provider ready");
    Ok(provider)
}

//! Crossrate CLI Binary
//!
//! Prints cross-rate matrices, conversions and supported currencies as JSON.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crossrate_cli::{build_provider, commands, AppConfig, LogFormat, ProviderKind};
use crossrate_common::CurrencyRegistry;
use crossrate_fx::{ExchangeService, RequestContext};

/// Crossrate CLI
#[derive(Parser, Debug)]
#[command(name = "crossrate")]
#[command(about = "Cross-rate FX quotes and conversions")]
struct Args {
    /// Rate provider (overrides RATES_PROVIDER)
    #[arg(short, long, value_enum)]
    provider: Option<ProviderKind>,

    /// Deadline for provider calls in milliseconds (overrides REQUEST_DEADLINE_MS)
    #[arg(long)]
    deadline_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cross-rate matrix for a comma-separated currency list, e.g. USD,GBP,EUR
    Rates {
        currencies: String,
    },
    /// Convert an amount between two currencies
    Convert {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Currencies the provider can quote
    Currencies,
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays valid JSON.
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    if let Some(provider) = args.provider {
        config.provider = provider;
    }
    if let Some(ms) = args.deadline_ms {
        config.request_deadline = Duration::from_millis(ms);
    }

    init_tracing(&config);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let registry = Arc::new(CurrencyRegistry::with_defaults());
    let provider = build_provider(&config, registry.clone())?;
    let service = ExchangeService::new(provider.clone());

    // Ctrl+C cancels whatever call is in flight
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            token.cancel();
        }
    });

    let ctx = RequestContext::new()
        .with_cancellation(shutdown)
        .with_timeout(config.request_deadline);

    let output = match args.command {
        Command::Rates { currencies } => {
            let rates = commands::rates(provider.as_ref(), &registry, &ctx, &currencies).await;
            rates.map(|r| serde_json::to_string_pretty(&r))
        }
        Command::Convert { from, to, amount } => {
            let output = commands::convert(&service, &registry, &ctx, &from, &to, amount).await;
            output.map(|o| serde_json::to_string_pretty(&o))
        }
        Command::Currencies => {
            let listed = commands::currencies(provider.as_ref(), &ctx).await;
            listed.map(|c| serde_json::to_string_pretty(&c))
        }
    };

    match output {
        Ok(json) => {
            println!("{}", json?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, code = e.error_code(), "Command failed");
            Err(e.into())
        }
    }
}

//! HubSpot Associations - command-line binary
//!
//! # Usage
//!
//! ```bash
//! hubspot-assoc list --resource-id 42 --definition 3 --limit 10
//! hubspot-assoc delete --from 42 --to 7 --definition 3
//! ```
//!
//! # Environment Variables
//!
//! * `HUBSPOT_ACCESS_TOKEN` - Private app token (or `HUBSPOT_HAPIKEY`)
//! * `HUBSPOT_BASE_URL` - API root (default: https://api.hubapi.com)
//! * `HUBSPOT_TIMEOUT_SECS` - Request timeout
//! * `HUBSPOT_EXPAND_CONCURRENCY` - Lookups in flight while expanding (default: 1)
//! * `HUBSPOT_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: warn)

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::Transport;
use domain_association::{AssociationClient, ExpansionOptions};
use domain_objects::standard_lookups;
use infra_http::{HttpTransport, HubspotConfig};
use interface_cli::{config::CliConfig, execute, render, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cli_config = CliConfig::from_env().context("invalid HUBSPOT_* settings")?;
    init_tracing(&cli_config.log_level);

    let hubspot = HubspotConfig::from_env().context("HubSpot credentials are not configured")?;
    let transport: Arc<dyn Transport> =
        Arc::new(HttpTransport::new(hubspot).context("could not build the HTTP client")?);

    let client = AssociationClient::new(transport.clone(), standard_lookups(transport))
        .with_expansion(ExpansionOptions::concurrent(cli_config.expand_concurrency));

    tracing::debug!(command = ?cli.command, "Running command");
    let output = execute(&client, cli.command).await?;
    println!("{}", render(&output, cli.compact));
    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr
///
/// # Arguments
///
/// * `log_level` - Filter used when `RUST_LOG` is unset
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

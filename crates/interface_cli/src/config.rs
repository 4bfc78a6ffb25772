//! CLI configuration

use serde::Deserialize;

/// Settings of the command-line tool itself
///
/// Connection settings live in `infra_http::HubspotConfig`; both read the
/// same `HUBSPOT_*` environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Lookups allowed in flight while expanding a page
    #[serde(default = "default_concurrency")]
    pub expand_concurrency: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_concurrency() -> usize {
    1
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            expand_concurrency: default_concurrency(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `HUBSPOT_LOG_LEVEL` and `HUBSPOT_EXPAND_CONCURRENCY`
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("HUBSPOT").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

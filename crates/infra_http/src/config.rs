//! HubSpot client configuration
//!
//! Configuration is an explicit value handed to `HttpTransport::new`; nothing
//! is stored in global or thread-local state. It is validated once, when the
//! transport is built.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use core_kernel::CoreError;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Configuration for talking to HubSpot
///
/// # Example
///
/// ```rust
/// use infra_http::HubspotConfig;
/// use std::time::Duration;
///
/// let config = HubspotConfig::with_access_token("pat-na1-...")
///     .timeout(Duration::from_secs(10));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Deserialize)]
pub struct HubspotConfig {
    /// Legacy API key, sent as the `hapikey` query parameter
    #[serde(default)]
    pub hapikey: Option<String>,
    /// Private app or OAuth access token, sent as a bearer token
    #[serde(default)]
    pub access_token: Option<String>,
    /// API root (default: https://api.hubapi.com)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub portal_id: Option<u64>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    /// Response read timeout in seconds
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
    /// Connection open timeout in seconds
    #[serde(default)]
    pub open_timeout_secs: Option<u64>,
    /// Fallback for both timeouts
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// How requests are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    AccessToken(String),
    ApiKey(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("Credentials::AccessToken(..)"),
            Credentials::ApiKey(_) => f.write_str("Credentials::ApiKey(..)"),
        }
    }
}

impl Default for HubspotConfig {
    fn default() -> Self {
        Self {
            hapikey: None,
            access_token: None,
            base_url: default_base_url(),
            portal_id: None,
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            read_timeout_secs: None,
            open_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for HubspotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("HubspotConfig")
            .field("hapikey", &redact(&self.hapikey))
            .field("access_token", &redact(&self.access_token))
            .field("base_url", &self.base_url)
            .field("portal_id", &self.portal_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("redirect_uri", &self.redirect_uri)
            .field("read_timeout_secs", &self.read_timeout_secs)
            .field("open_timeout_secs", &self.open_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl HubspotConfig {
    /// Creates a configuration authenticated with an access token
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Creates a configuration authenticated with a legacy API key
    pub fn with_hapikey(key: impl Into<String>) -> Self {
        Self {
            hapikey: Some(key.into()),
            ..Default::default()
        }
    }

    /// Sets the API root
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets both the read and open timeouts
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Sets the portal (hub) id
    pub fn portal_id(mut self, portal_id: u64) -> Self {
        self.portal_id = Some(portal_id);
        self
    }

    /// Loads configuration from `HUBSPOT_*` environment variables
    ///
    /// `HUBSPOT_ACCESS_TOKEN`, `HUBSPOT_HAPIKEY`, `HUBSPOT_BASE_URL`,
    /// `HUBSPOT_TIMEOUT_SECS`, ... map onto the fields of the same name.
    /// The result is validated before it is returned.
    pub fn from_env() -> Result<Self, CoreError> {
        let config: HubspotConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("HUBSPOT").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that exactly one authentication method is configured
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` when neither or both of `access_token` and
    /// `hapikey` are set.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.credentials().map(|_| ())
    }

    /// Returns the configured authentication method
    pub fn credentials(&self) -> Result<Credentials, CoreError> {
        let token = self.access_token.as_deref().filter(|t| !t.trim().is_empty());
        let key = self.hapikey.as_deref().filter(|k| !k.trim().is_empty());
        match (token, key) {
            (Some(token), None) => Ok(Credentials::AccessToken(token.to_string())),
            (None, Some(key)) => Ok(Credentials::ApiKey(key.to_string())),
            _ => Err(CoreError::configuration(
                "You must provide either an access_token or an hapikey",
            )),
        }
    }

    /// Checks that the named settings are present
    ///
    /// # Arguments
    ///
    /// * `keys` - Setting names, e.g. `["portal_id", "client_id"]`
    pub fn ensure(&self, keys: &[&str]) -> Result<(), CoreError> {
        for key in keys {
            let present = match *key {
                "hapikey" => self.hapikey.is_some(),
                "access_token" => self.access_token.is_some(),
                "base_url" => !self.base_url.is_empty(),
                "portal_id" => self.portal_id.is_some(),
                "client_id" => self.client_id.is_some(),
                "client_secret" => self.client_secret.is_some(),
                "redirect_uri" => self.redirect_uri.is_some(),
                "read_timeout_secs" => self.read_timeout().is_some(),
                "open_timeout_secs" => self.open_timeout().is_some(),
                "timeout_secs" => self.timeout_secs.is_some(),
                _ => false,
            };
            if !present {
                return Err(CoreError::configuration(format!("'{}' not configured", key)));
            }
        }
        Ok(())
    }

    /// Read timeout, falling back to the shared timeout
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.or(self.timeout_secs).map(Duration::from_secs)
    }

    /// Open timeout, falling back to the shared timeout
    pub fn open_timeout(&self) -> Option<Duration> {
        self.open_timeout_secs.or(self.timeout_secs).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubspotConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.read_timeout().is_none());
    }

    #[test]
    fn test_requires_exactly_one_credential() {
        assert!(HubspotConfig::default().validate().is_err());
        assert!(HubspotConfig::with_hapikey("demo").validate().is_ok());

        let mut both = HubspotConfig::with_access_token("token");
        both.hapikey = Some("demo".to_string());
        let err = both.validate().unwrap_err();
        assert!(err.to_string().contains("access_token or an hapikey"));
    }

    #[test]
    fn test_blank_credentials_do_not_count() {
        let config = HubspotConfig::with_access_token("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_fallback() {
        let mut config = HubspotConfig::with_hapikey("demo").timeout(Duration::from_secs(5));
        config.read_timeout_secs = Some(20);
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.open_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_ensure_reports_missing_key() {
        let config = HubspotConfig::with_hapikey("demo").portal_id(62515);
        assert!(config.ensure(&["hapikey", "portal_id"]).is_ok());

        let err = config.ensure(&["client_id"]).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: 'client_id' not configured");
    }

    #[test]
    fn test_ensure_timeout_secs() {
        let config = HubspotConfig::with_hapikey("demo");
        assert!(config.ensure(&["timeout_secs"]).is_err());

        let config = config.timeout(Duration::from_secs(30));
        assert!(config.ensure(&["timeout_secs", "read_timeout_secs", "open_timeout_secs"]).is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = HubspotConfig::with_access_token("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}

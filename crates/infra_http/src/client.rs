//! reqwest-backed Transport
//!
//! `HttpTransport` is the production adapter for the `Transport` port. It
//! renders the request path against the configured base URL, attaches
//! credentials, sends the request, and decodes the response.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_http::{HttpTransport, HubspotConfig};
//! use core_kernel::Transport;
//! use std::sync::Arc;
//!
//! let transport = HttpTransport::new(HubspotConfig::with_access_token(token))?;
//! let transport: Arc<dyn Transport> = Arc::new(transport);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use core_kernel::{ApiRequest, CoreError, DomainPort, HttpMethod, PortError, Transport};

use crate::config::{Credentials, HubspotConfig};
use crate::error::{client_error, parse_body, status_to_port_error};

/// HTTP implementation of the `Transport` port
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    read_timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport from a configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The HubSpot configuration; validated here
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` when the credentials are ambiguous, the base
    /// URL does not parse, or the HTTP client cannot be built.
    pub fn new(config: HubspotConfig) -> Result<Self, CoreError> {
        let credentials = config.credentials()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CoreError::configuration(format!("Invalid base_url '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::configuration(format!(
                "Invalid base_url '{}': not a hierarchical URL",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.read_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.open_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::configuration(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            credentials,
            read_timeout: config.read_timeout(),
        })
    }

    /// Returns the API root requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the full URL for a request, including authentication query
    /// parameters
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, PortError> {
        let segments = request.path_segments()?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::validation("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments.iter().map(String::as_str));

        let mut query: Vec<(&str, &str)> = request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if let Credentials::ApiKey(key) = &self.credentials {
            query.push(("hapikey", key.as_str()));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
    }
}

impl DomainPort for HttpTransport {}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> Result<Value, PortError> {
        let url = self.url_for(&request)?;
        let rendered = url.path().to_string();
        let operation = format!("{} {}", request.method, rendered);

        let mut builder = self.client.request(to_method(request.method), url);
        if let Credentials::AccessToken(token) = &self.credentials {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(path = %rendered, has_body = request.body.is_some(), "Sending request");
        let response = builder
            .send()
            .await
            .map_err(|e| client_error(e, &operation, self.read_timeout))?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response
            .text()
            .await
            .map_err(|e| client_error(e, &operation, self.read_timeout))?;

        debug!(status = status.as_u16(), bytes = text.len(), "Response received");

        if !status.is_success() {
            return Err(status_to_port_error(status.as_u16(), &rendered, text, retry_after));
        }
        parse_body(&text, request.response_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_ambiguous_credentials() {
        assert!(HttpTransport::new(HubspotConfig::default()).is_err());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = HubspotConfig::with_hapikey("demo").base_url("not a url");
        assert!(HttpTransport::new(config).is_err());
    }

    #[test]
    fn test_url_with_path_params_and_hapikey() {
        let transport = HttpTransport::new(HubspotConfig::with_hapikey("demo")).unwrap();
        let request = ApiRequest::get(
            "/crm-associations/v1/associations/:resource_id/HUBSPOT_DEFINED/:definition_id",
        )
        .path_param("resource_id", 42)
        .path_param("definition_id", 3)
        .query("limit", 10);

        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.host_str(), Some("api.hubapi.com"));
        assert_eq!(url.path(), "/crm-associations/v1/associations/42/HUBSPOT_DEFINED/3");
        assert_eq!(url.query(), Some("limit=10&hapikey=demo"));
    }

    #[test]
    fn test_url_encodes_segments() {
        let transport = HttpTransport::new(HubspotConfig::with_access_token("t")).unwrap();
        let request = ApiRequest::get("/crm/v3/associations/:fromObjectType/:toObjectType/types")
            .path_param("fromObjectType", "p_custom objects")
            .path_param("toObjectType", "contacts");

        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.path(), "/crm/v3/associations/p_custom%20objects/contacts/types");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_url_keeps_base_path() {
        let config = HubspotConfig::with_access_token("t").base_url("http://localhost:8080/proxy/");
        let transport = HttpTransport::new(config).unwrap();
        let request = ApiRequest::get("/deals/v1/deal/:deal_id").path_param("deal_id", 1);
        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/deals/v1/deal/1");
    }
}

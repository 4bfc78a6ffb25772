//! Ports and Adapters Infrastructure
//!
//! This module provides the transport port through which every crate in the
//! workspace talks to HubSpot, following the hexagonal (ports and adapters)
//! pattern.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                            │
//! │   (AssociationClient, object lookups, transactional email)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Transport Port                           │
//! │        ApiRequest in, decoded JSON or PortError out         │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │   HttpTransport   │     │  MockTransport   │
//!         │    (reqwest)      │     │   (test_utils)   │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let request = ApiRequest::get("/deals/v1/deal/:deal_id")
//!     .path_param("deal_id", 42);
//! let body = transport.execute(request).await?;
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::CoreError;
use crate::path;

/// Error type for port operations
///
/// Every transport failure surfaces as one of these variants. HTTP failures
/// keep the original status code and response body so callers see exactly
/// what the remote system reported.
#[derive(Debug, Error)]
pub enum PortError {
    /// The remote system answered 404
    #[error("Not found: {path}")]
    NotFound {
        path: String,
        message: String,
    },

    /// Authentication or authorization failed (401/403)
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized {
        status: u16,
        message: String,
    },

    /// Rate limit exceeded (429)
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// Any other non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
    },

    /// Connection to the remote system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// A response body could not be decoded
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// The request could not be built
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(path: impl Into<String>, message: impl Into<String>) -> Self {
        PortError::NotFound {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an Http error for a status without a dedicated variant
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        PortError::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the HTTP status reported by the remote system, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PortError::NotFound { .. } => Some(404),
            PortError::Unauthorized { status, .. } => Some(*status),
            PortError::RateLimited { .. } => Some(429),
            PortError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

impl From<CoreError> for PortError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingPathParam { ref param, .. } => PortError::Validation {
                field: Some(param.clone()),
                message: err.to_string(),
            },
            other => PortError::validation(other.to_string()),
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// HTTP verb of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the transport should treat a successful response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Decode as JSON; an empty body decodes to `Value::Null`
    #[default]
    Json,
    /// Skip structured parsing: JSON if it happens to parse, the text as a
    /// string otherwise, `Value::Null` for an empty body
    Raw,
}

/// A single call to the HubSpot API
///
/// The path is kept as a template; `path_params` fill its `:name` segments
/// and `query` carries everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub path_params: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub response_mode: ResponseMode,
}

impl ApiRequest {
    /// Creates a request with no parameters and no body
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
            response_mode: ResponseMode::Json,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Sets the value of a `:name` path segment
    pub fn path_param(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.path_params.push((name.into(), value.to_string()));
        self
    }

    /// Appends a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Appends a query parameter only when a value is present
    pub fn query_opt<T: fmt::Display>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Serializes `body` as the JSON request body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, PortError> {
        let value = serde_json::to_value(body)
            .map_err(|e| PortError::transformation(format!("Cannot encode request body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Asks the transport not to parse the response strictly
    pub fn raw_response(mut self) -> Self {
        self.response_mode = ResponseMode::Raw;
        self
    }

    /// Concrete path segments with parameters substituted
    pub fn path_segments(&self) -> Result<Vec<String>, CoreError> {
        path::path_segments(&self.path, &self.path_params)
    }

    /// Concrete path with parameters substituted (unencoded)
    pub fn rendered_path(&self) -> Result<String, CoreError> {
        path::render_path(&self.path, &self.path_params)
    }
}

/// The transport port
///
/// Executes one API request and returns the decoded response body. Any
/// non-success status or network failure is returned as a `PortError`; the
/// transport neither retries nor imposes deadlines of its own beyond its
/// configured timeouts.
#[async_trait]
pub trait Transport: DomainPort {
    async fn execute(&self, request: ApiRequest) -> Result<Value, PortError>;
}

/// Decodes a response body into a typed value
pub fn decode_response<T: DeserializeOwned>(value: Value) -> Result<T, PortError> {
    serde_json::from_value(value)
        .map_err(|e| PortError::transformation(format!("Unexpected response shape: {}", e)))
}

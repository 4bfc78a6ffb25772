//! Scripted Mock Transport
//!
//! `MockTransport` implements the `Transport` port without a network. Tests
//! script a response per (method, rendered path), then inspect the requests
//! that were recorded, in order.
//!
//! ```rust,ignore
//! let transport = MockTransport::new();
//! transport.respond(HttpMethod::Get, "/deals/v1/deal/1", json!({"dealId": 1}));
//! transport.fail(HttpMethod::Get, "/deals/v1/deal/2", 500, "boom");
//!
//! // ... exercise code under test ...
//!
//! assert_eq!(transport.request_count(), 2);
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use core_kernel::{ApiRequest, DomainPort, HttpMethod, PortError, Transport};

/// What a scripted route answers with
#[derive(Debug, Clone)]
enum Reply {
    Body(Value),
    Status { status: u16, message: String },
}

#[derive(Debug, Clone)]
struct Route {
    method: HttpMethod,
    path: String,
    reply: Reply,
    delay: Option<Duration>,
}

/// In-memory `Transport` with scripted responses
///
/// Routes are matched on method and rendered path (query parameters are not
/// part of the match). A request with no matching route fails with
/// `PortError::NotFound`. Clones share their script and their request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Creates a mock with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the mock for code that expects a shared transport
    pub fn shared(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Answers `method path` with `body`
    pub fn respond(&self, method: HttpMethod, path: impl Into<String>, body: Value) -> &Self {
        self.add(method, path.into(), Reply::Body(body), None)
    }

    /// Answers `method path` with `body` after `delay`
    pub fn respond_after(
        &self,
        method: HttpMethod,
        path: impl Into<String>,
        body: Value,
        delay: Duration,
    ) -> &Self {
        self.add(method, path.into(), Reply::Body(body), Some(delay))
    }

    /// Answers `method path` with a non-success status
    pub fn fail(
        &self,
        method: HttpMethod,
        path: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> &Self {
        let reply = Reply::Status {
            status,
            message: message.into(),
        };
        self.add(method, path.into(), reply, None)
    }

    fn add(
        &self,
        method: HttpMethod,
        path: String,
        reply: Reply,
        delay: Option<Duration>,
    ) -> &Self {
        let mut routes = self.routes.lock().unwrap();
        routes.retain(|r| !(r.method == method && r.path == path));
        routes.push(Route {
            method,
            path,
            reply,
            delay,
        });
        self
    }

    /// Every request executed so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `"METHOD /rendered/path"` for every request, in order
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| {
                let path = r.rendered_path().unwrap_or_else(|_| r.path.clone());
                format!("{} {}", r.method, path)
            })
            .collect()
    }
}

impl DomainPort for MockTransport {}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, PortError> {
        self.requests.lock().unwrap().push(request.clone());
        let path = request.rendered_path()?;

        let route = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.method == request.method && r.path == path)
            .cloned();

        let Some(route) = route else {
            return Err(PortError::not_found(path, "no scripted response"));
        };
        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }
        match route.reply {
            Reply::Body(body) => Ok(body),
            Reply::Status { status: 404, message } => Err(PortError::not_found(path, message)),
            Reply::Status { status, message } => Err(PortError::http(status, message)),
        }
    }
}

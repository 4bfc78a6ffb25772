//! Transactional Email
//!
//! Sends one templated email through the marketing API.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use core_kernel::{ApiRequest, DomainPort, PortError, Transport};

pub const SINGLE_EMAIL_PATH: &str = "/marketing/v3/transactional/single-email/send";

/// Outcome of a single-email send
///
/// `properties` keeps the whole response; the other fields are lifted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionalEmail {
    pub properties: Value,
    pub event_id: Option<Value>,
    pub status_id: Option<String>,
    pub send_result: Option<String>,
    pub status: Option<String>,
}

impl TransactionalEmail {
    pub fn from_response(body: Value) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            event_id: body.get("eventId").cloned(),
            status_id: text("statusId"),
            send_result: text("sendResult"),
            status: text("status"),
            properties: body,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SingleEmailRequest<'a> {
    email_id: u64,
    message: &'a Value,
    contact_properties: &'a Value,
    custom_properties: &'a Value,
}

/// Sends transactional emails
#[derive(Clone)]
pub struct TransactionalEmailApi {
    transport: Arc<dyn Transport>,
}

impl DomainPort for TransactionalEmailApi {}

impl TransactionalEmailApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends one email built from a template
    ///
    /// # Arguments
    ///
    /// * `email_id` - Template identifier
    /// * `message` - Recipient and sender fields, e.g. `{"to": "a@b.com"}`
    /// * `contact_properties` - Contact properties to set on send
    /// * `custom_properties` - Template placeholders
    #[instrument(skip(self, message, contact_properties, custom_properties))]
    pub async fn create_single_email(
        &self,
        email_id: u64,
        message: &Value,
        contact_properties: &Value,
        custom_properties: &Value,
    ) -> Result<TransactionalEmail, PortError> {
        let body = SingleEmailRequest {
            email_id,
            message,
            contact_properties,
            custom_properties,
        };
        let request = ApiRequest::post(SINGLE_EMAIL_PATH).json(&body)?;
        let response = self.transport.execute(request).await?;

        let email = TransactionalEmail::from_response(response);
        debug!(status = ?email.status, "Transactional email sent");
        Ok(email)
    }
}

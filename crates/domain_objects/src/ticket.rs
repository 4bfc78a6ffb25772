//! Tickets
//!
//! Tickets live on the v3 objects API. They are not reachable through a
//! legacy definition code, but `TicketApi` still registers as the generic
//! find for `ObjectType::Ticket`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use core_kernel::{
    decode_response, ApiRequest, CrmObject, DomainPort, FindObject, ObjectId, ObjectKind,
    ObjectType, PortError, Transport,
};

pub const TICKETS_PATH: &str = "/crm/v3/objects/tickets";
pub const TICKET_PATH: &str = "/crm/v3/objects/tickets/:id";

/// A ticket as returned by the objects API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: ObjectId,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub archived: bool,
}

impl Ticket {
    /// Returns a property's value as text
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }
}

/// Creates and finds tickets
#[derive(Clone)]
pub struct TicketApi {
    transport: Arc<dyn Transport>,
}

impl TicketApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Creates a ticket
    ///
    /// # Arguments
    ///
    /// * `body` - Sent as-is, normally `{"properties": {...}}`
    ///
    /// # Errors
    ///
    /// Propagates transport failures; a response that is not a ticket is a
    /// `Transformation` error.
    #[instrument(skip_all)]
    pub async fn create(&self, body: &Value) -> Result<Ticket, PortError> {
        let request = ApiRequest::post(TICKETS_PATH).json(body)?;
        let ticket: Ticket = decode_response(self.transport.execute(request).await?)?;
        debug!(id = %ticket.id, "Ticket created");
        Ok(ticket)
    }

    /// Finds a ticket, asking for the named properties
    ///
    /// An empty `properties` slice returns the API's default property set.
    #[instrument(skip(self, properties))]
    pub async fn find(&self, id: ObjectId, properties: &[&str]) -> Result<Ticket, PortError> {
        let properties = (!properties.is_empty()).then(|| properties.join(","));
        let request = ApiRequest::get(TICKET_PATH)
            .path_param("id", id)
            .query_opt("properties", properties);
        decode_response(self.transport.execute(request).await?)
    }
}

impl DomainPort for TicketApi {}

impl ObjectKind for TicketApi {
    fn object_type(&self) -> ObjectType {
        ObjectType::Ticket
    }
}

#[async_trait]
impl FindObject for TicketApi {
    async fn find(&self, id: ObjectId) -> Result<CrmObject, PortError> {
        let request = ApiRequest::get(TICKET_PATH).path_param("id", id);
        let body = self.transport.execute(request).await?;
        crate::require_object(ObjectType::Ticket, id, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticket_decodes_string_id() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": "512",
            "properties": {"subject": "Printer"},
            "archived": false
        }))
        .unwrap();
        assert_eq!(ticket.id, ObjectId::new(512));
        assert_eq!(ticket.property("subject"), Some("Printer"));
        assert!(!ticket.archived);
    }
}

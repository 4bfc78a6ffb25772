//! Engagement lookup
//!
//! Engagements have no `properties` member. The loaded object takes its
//! properties from `metadata`, alongside the `engagement` header fields.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::instrument;

use core_kernel::{
    ApiRequest, CrmObject, DomainPort, FindObject, ObjectId, ObjectKind, ObjectType, PortError,
    Transport,
};

pub const ENGAGEMENT_PATH: &str = "/engagements/v1/engagements/:engagement_id";

/// Loads engagements through the generic find
#[derive(Clone)]
pub struct EngagementLookup {
    transport: Arc<dyn Transport>,
}

impl EngagementLookup {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl DomainPort for EngagementLookup {}

impl ObjectKind for EngagementLookup {
    fn object_type(&self) -> ObjectType {
        ObjectType::Engagement
    }
}

#[async_trait]
impl FindObject for EngagementLookup {
    #[instrument(skip(self), fields(kind = "engagement"))]
    async fn find(&self, id: ObjectId) -> Result<CrmObject, PortError> {
        let request = ApiRequest::get(ENGAGEMENT_PATH).path_param("engagement_id", id);
        let body = self.transport.execute(request).await?;
        engagement_object(id, body)
    }
}

/// Flattens an engagement response into a `CrmObject`
///
/// `metadata` fields become properties; the engagement's `type` is kept
/// under `type` unless metadata already defines it.
fn engagement_object(id: ObjectId, body: Value) -> Result<CrmObject, PortError> {
    let header = body
        .get("engagement")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            let message = format!("engagement {} response has no engagement header", id);
            PortError::transformation(message)
        })?;

    let mut properties: Map<String, Value> = body
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    if let Some(kind) = header.get("type") {
        properties.entry("type").or_insert_with(|| kind.clone());
    }

    Ok(CrmObject {
        object_type: ObjectType::Engagement,
        id,
        properties,
        raw: body,
    })
}

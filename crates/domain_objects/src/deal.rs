//! Deal lookup

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::{
    ApiRequest, CrmObject, DomainPort, FindObject, ObjectId, ObjectKind, ObjectType, PortError,
    Transport,
};

use crate::require_object;

pub const DEAL_PATH: &str = "/deals/v1/deal/:deal_id";

/// Loads deals through the generic find
#[derive(Clone)]
pub struct DealLookup {
    transport: Arc<dyn Transport>,
}

impl DealLookup {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl DomainPort for DealLookup {}

impl ObjectKind for DealLookup {
    fn object_type(&self) -> ObjectType {
        ObjectType::Deal
    }
}

#[async_trait]
impl FindObject for DealLookup {
    #[instrument(skip(self), fields(kind = "deal"))]
    async fn find(&self, id: ObjectId) -> Result<CrmObject, PortError> {
        let request = ApiRequest::get(DEAL_PATH).path_param("deal_id", id);
        let body = self.transport.execute(request).await?;
        require_object(ObjectType::Deal, id, body)
    }
}

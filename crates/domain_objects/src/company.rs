//! Company lookup

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::{
    ApiRequest, CrmObject, DomainPort, FindById, ObjectId, ObjectKind, ObjectType, PortError,
    Transport,
};

use crate::require_object;

pub const COMPANY_PATH: &str = "/companies/v2/companies/:company_id";

/// Loads companies through their dedicated by-id endpoint
#[derive(Clone)]
pub struct CompanyLookup {
    transport: Arc<dyn Transport>,
}

impl CompanyLookup {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl DomainPort for CompanyLookup {}

impl ObjectKind for CompanyLookup {
    fn object_type(&self) -> ObjectType {
        ObjectType::Company
    }
}

#[async_trait]
impl FindById for CompanyLookup {
    #[instrument(skip(self), fields(kind = "company"))]
    async fn find_by_id(&self, id: ObjectId) -> Result<CrmObject, PortError> {
        let request = ApiRequest::get(COMPANY_PATH).path_param("company_id", id);
        let body = self.transport.execute(request).await?;
        require_object(ObjectType::Company, id, body)
    }
}

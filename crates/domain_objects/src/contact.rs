//! Contact lookup
//!
//! Contacts are addressed by their `vid`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::{
    ApiRequest, CrmObject, DomainPort, FindById, ObjectId, ObjectKind, ObjectType, PortError,
    Transport,
};

use crate::require_object;

pub const CONTACT_PATH: &str = "/contacts/v1/contact/vid/:contact_id/profile";

/// Loads contacts through the profile endpoint
#[derive(Clone)]
pub struct ContactLookup {
    transport: Arc<dyn Transport>,
}

impl ContactLookup {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl DomainPort for ContactLookup {}

impl ObjectKind for ContactLookup {
    fn object_type(&self) -> ObjectType {
        ObjectType::Contact
    }
}

#[async_trait]
impl FindById for ContactLookup {
    #[instrument(skip(self), fields(kind = "contact"))]
    async fn find_by_id(&self, id: ObjectId) -> Result<CrmObject, PortError> {
        let request = ApiRequest::get(CONTACT_PATH).path_param("contact_id", id);
        let body = self.transport.execute(request).await?;
        require_object(ObjectType::Contact, id, body)
    }
}

//! HubSpot Object Kinds
//!
//! Lookups that load one CRM object by identifier, plus the two object
//! wrappers that only write: tickets and transactional email.
//!
//! # Lookup tiers
//!
//! | Kind | Capability | Endpoint |
//! |------|------------|----------|
//! | Company | `FindById` | `GET /companies/v2/companies/:company_id` |
//! | Contact | `FindById` | `GET /contacts/v1/contact/vid/:contact_id/profile` |
//! | Deal | `FindObject` | `GET /deals/v1/deal/:deal_id` |
//! | Engagement | `FindObject` | `GET /engagements/v1/engagements/:engagement_id` |
//! | Ticket | `FindObject` | `GET /crm/v3/objects/tickets/:id` |
//!
//! `standard_lookups` registers all of them against one transport.

use std::sync::Arc;

use core_kernel::{CrmObject, LookupTable, ObjectId, ObjectType, PortError, Transport};

pub mod company;
pub mod contact;
pub mod deal;
pub mod engagement;
pub mod ticket;
pub mod transactional_email;

pub use company::CompanyLookup;
pub use contact::ContactLookup;
pub use deal::DealLookup;
pub use engagement::EngagementLookup;
pub use ticket::{Ticket, TicketApi};
pub use transactional_email::{TransactionalEmail, TransactionalEmailApi};

/// Builds a lookup table covering every object kind
///
/// # Arguments
///
/// * `transport` - Transport shared by every lookup
pub fn standard_lookups(transport: Arc<dyn Transport>) -> LookupTable {
    let mut table = LookupTable::new();
    table
        .register_by_id(Arc::new(CompanyLookup::new(transport.clone())))
        .register_by_id(Arc::new(ContactLookup::new(transport.clone())))
        .register_find(Arc::new(DealLookup::new(transport.clone())))
        .register_find(Arc::new(EngagementLookup::new(transport.clone())))
        .register_find(Arc::new(TicketApi::new(transport)));
    table
}

/// Fails when a response carries no object at all
pub(crate) fn require_object(
    object_type: ObjectType,
    id: ObjectId,
    body: serde_json::Value,
) -> Result<CrmObject, PortError> {
    if !body.is_object() {
        return Err(PortError::transformation(format!(
            "{} {} response is not an object",
            object_type, id
        )));
    }
    Ok(CrmObject::from_response(object_type, id, body))
}

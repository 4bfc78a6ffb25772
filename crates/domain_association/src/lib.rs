//! Association Domain
//!
//! This crate relates CRM objects to each other and expands those
//! relationships back into loaded objects.
//!
//! # Two API generations
//!
//! HubSpot exposes two association APIs and both are supported side by side:
//!
//! - **Legacy (v1)**: relationships are named by a numeric definition code
//!   (`DEAL_TO_CONTACT = 3`, ...). Batch create/delete and the paginated
//!   listing used for expansion live here.
//! - **Typed (v3 paths)**: relationships are named by a type label between
//!   two object types (`deal_to_contact`). Only batch create/archive and
//!   label discovery exist; there is no typed listing.
//!
//! # Expansion
//!
//! Listing returns bare identifiers. `AssociationResolver::all` resolves the
//! definition code to the target object type, then loads every identifier
//! through that type's registered lookup, at a cost of one listing request
//! plus one request per identifier.
//!
//! # Examples
//!
//! ```rust,ignore
//! use domain_association::{AssociationClient, ListOptions, DEAL_TO_CONTACT};
//!
//! let client = AssociationClient::new(transport, lookups);
//! let contacts = client.all(ObjectId::new(42), DEAL_TO_CONTACT, ListOptions::default()).await?;
//! ```

pub mod error;
pub mod registry;
pub mod paths;
pub mod request;
pub mod resolver;
pub mod client;

pub use error::AssociationError;
pub use registry::{
    DefinitionCode, LEGACY_DEFINITION_MAX,
    resolve_target_type, validate_legacy_code, codes_targeting, definitions,
    CONTACT_TO_COMPANY, COMPANY_TO_CONTACT, CONTACT_TO_COMPANY_V2, COMPANY_TO_CONTACT_V2,
    DEAL_TO_CONTACT, CONTACT_TO_DEAL, DEAL_TO_COMPANY, COMPANY_TO_DEAL,
    CONTACT_TO_ENGAGEMENT, ENGAGEMENT_TO_CONTACT,
    PARENT_COMPANY_TO_CHILD_COMPANY, CHILD_COMPANY_TO_PARENT_COMPANY,
    TICKET_TO_CONTACT, TICKET_TO_COMPANY,
};
pub use request::{
    AssociationRecord, TypedAssociationRecord,
    LegacyAssociationBody, TypedAssociationBody, ObjectRef, BatchInputs,
    AssociationTypeList, AssociationTypeLabel,
    build_legacy_body, build_typed_body, build_legacy_batch, build_typed_batch,
    HUBSPOT_DEFINED,
};
pub use resolver::{
    AssociationResolver, AssociationPage, RawAssociations, ExpandedAssociations, Associations,
    ListOptions, ExpansionOptions,
};
pub use client::AssociationClient;

//! Core Kernel - Foundational types for the HubSpot associations client
//!
//! This crate provides the building blocks shared by every other crate in the
//! workspace:
//! - Object identifiers and the closed set of CRM object kinds
//! - The `Transport` port through which all HTTP traffic flows
//! - Path templates with `:name` parameters
//! - The two-tier object lookup capability used to expand associations

pub mod identifiers;
pub mod error;
pub mod path;
pub mod ports;
pub mod lookup;

pub use identifiers::{ObjectId, ObjectType};
pub use error::CoreError;
pub use ports::{
    ApiRequest, DomainPort, HttpMethod, PortError, ResponseMode, Transport,
    decode_response,
};
pub use lookup::{CrmObject, FindById, FindObject, LookupTable, ObjectKind, ObjectLookup};

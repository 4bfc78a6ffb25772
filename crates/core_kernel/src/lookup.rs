//! Object Lookup Capabilities
//!
//! Expanding an association turns bare identifiers into loaded objects, and
//! each object kind exposes one of two lookup capabilities:
//!
//! - **`FindById`**: a dedicated by-id endpoint (preferred)
//! - **`FindObject`**: a generic find operation (fallback)
//!
//! The choice between the two is made once, when a lookup is registered in a
//! `LookupTable`, and is carried by the `ObjectLookup` variant. Callers never
//! probe capabilities per request.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut table = LookupTable::new();
//! table.register_by_id(Arc::new(CompanyLookup::new(transport.clone())));
//! table.register_find(Arc::new(DealLookup::new(transport.clone())));
//!
//! let deal = table.get(ObjectType::Deal).unwrap().lookup(ObjectId::new(42)).await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::identifiers::{ObjectId, ObjectType};
use crate::ports::{DomainPort, PortError};

/// A fully loaded CRM object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrmObject {
    /// Kind of the object
    pub object_type: ObjectType,
    /// Object identifier
    pub id: ObjectId,
    /// The object's properties as returned by the API
    pub properties: Map<String, Value>,
    /// The complete response body
    #[serde(skip)]
    pub raw: Value,
}

impl CrmObject {
    /// Builds an object from a response body
    ///
    /// `properties` is taken from the top-level `properties` member when it
    /// is an object, and left empty otherwise.
    pub fn from_response(object_type: ObjectType, id: ObjectId, raw: Value) -> Self {
        let properties = raw
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self {
            object_type,
            id,
            properties,
            raw,
        }
    }

    /// Returns a property's value as text
    ///
    /// Handles both the legacy shape (`{"name": {"value": "Acme"}}`) and the
    /// v3 shape (`{"name": "Acme"}`).
    pub fn property(&self, name: &str) -> Option<&str> {
        match self.properties.get(name)? {
            Value::String(s) => Some(s),
            Value::Object(inner) => inner.get("value").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Common supertrait of both lookup capabilities
pub trait ObjectKind: DomainPort {
    /// The kind of object this lookup loads
    fn object_type(&self) -> ObjectType;
}

/// Dedicated by-id lookup
#[async_trait]
pub trait FindById: ObjectKind {
    async fn find_by_id(&self, id: ObjectId) -> Result<CrmObject, PortError>;
}

/// Generic find
#[async_trait]
pub trait FindObject: ObjectKind {
    async fn find(&self, id: ObjectId) -> Result<CrmObject, PortError>;
}

/// A lookup capability resolved at registration time
#[derive(Clone)]
pub enum ObjectLookup {
    ById(Arc<dyn FindById>),
    Find(Arc<dyn FindObject>),
}

impl ObjectLookup {
    /// Loads one object through whichever capability was registered
    pub async fn lookup(&self, id: ObjectId) -> Result<CrmObject, PortError> {
        match self {
            ObjectLookup::ById(finder) => finder.find_by_id(id).await,
            ObjectLookup::Find(finder) => finder.find(id).await,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectLookup::ById(finder) => finder.object_type(),
            ObjectLookup::Find(finder) => finder.object_type(),
        }
    }

    /// Returns true for the dedicated by-id capability
    pub fn is_by_id(&self) -> bool {
        matches!(self, ObjectLookup::ById(_))
    }
}

impl fmt::Debug for ObjectLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = if self.is_by_id() { "ById" } else { "Find" };
        write!(f, "ObjectLookup::{}({})", tier, self.object_type())
    }
}

/// Lookups keyed by object kind
///
/// Built once during wiring and then shared read-only.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    lookups: HashMap<ObjectType, ObjectLookup>,
}

impl LookupTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dedicated by-id lookup, replacing anything registered
    /// for the same kind
    pub fn register_by_id(&mut self, finder: Arc<dyn FindById>) -> &mut Self {
        self.lookups.insert(finder.object_type(), ObjectLookup::ById(finder));
        self
    }

    /// Registers a generic find
    ///
    /// A kind that already has a by-id lookup keeps it; the generic find is
    /// only the fallback.
    pub fn register_find(&mut self, finder: Arc<dyn FindObject>) -> &mut Self {
        let object_type = finder.object_type();
        let has_by_id = self
            .lookups
            .get(&object_type)
            .map(ObjectLookup::is_by_id)
            .unwrap_or(false);
        if !has_by_id {
            self.lookups.insert(object_type, ObjectLookup::Find(finder));
        }
        self
    }

    /// Returns the lookup registered for a kind
    pub fn get(&self, object_type: ObjectType) -> Option<&ObjectLookup> {
        self.lookups.get(&object_type)
    }

    pub fn contains(&self, object_type: ObjectType) -> bool {
        self.lookups.contains_key(&object_type)
    }

    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticLookup(ObjectType);

    impl DomainPort for StaticLookup {}

    impl ObjectKind for StaticLookup {
        fn object_type(&self) -> ObjectType {
            self.0
        }
    }

    #[async_trait]
    impl FindById for StaticLookup {
        async fn find_by_id(&self, id: ObjectId) -> Result<CrmObject, PortError> {
            Ok(CrmObject::from_response(self.0, id, json!({"tier": "by_id"})))
        }
    }

    #[async_trait]
    impl FindObject for StaticLookup {
        async fn find(&self, id: ObjectId) -> Result<CrmObject, PortError> {
            Ok(CrmObject::from_response(self.0, id, json!({"tier": "find"})))
        }
    }

    #[test]
    fn test_by_id_wins_over_find() {
        let mut table = LookupTable::new();
        table.register_by_id(Arc::new(StaticLookup(ObjectType::Company)));
        table.register_find(Arc::new(StaticLookup(ObjectType::Company)));

        assert!(table.get(ObjectType::Company).unwrap().is_by_id());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_by_id_replaces_find() {
        let mut table = LookupTable::new();
        table.register_find(Arc::new(StaticLookup(ObjectType::Deal)));
        assert!(!table.get(ObjectType::Deal).unwrap().is_by_id());

        table.register_by_id(Arc::new(StaticLookup(ObjectType::Deal)));
        assert!(table.get(ObjectType::Deal).unwrap().is_by_id());
    }

    #[tokio::test]
    async fn test_lookup_dispatches_to_registered_tier() {
        let mut table = LookupTable::new();
        table.register_find(Arc::new(StaticLookup(ObjectType::Engagement)));

        let object = table
            .get(ObjectType::Engagement)
            .unwrap()
            .lookup(ObjectId::new(9))
            .await
            .unwrap();
        assert_eq!(object.raw["tier"], "find");
        assert_eq!(object.id, ObjectId::new(9));
    }

    #[test]
    fn test_property_handles_both_shapes() {
        let legacy = CrmObject::from_response(
            ObjectType::Company,
            ObjectId::new(1),
            json!({"properties": {"name": {"value": "Acme"}}}),
        );
        let current = CrmObject::from_response(
            ObjectType::Ticket,
            ObjectId::new(2),
            json!({"properties": {"subject": "Printer"}}),
        );
        assert_eq!(legacy.property("name"), Some("Acme"));
        assert_eq!(current.property("subject"), Some("Printer"));
        assert_eq!(current.property("missing"), None);
    }
}

//! Association request builders
//!
//! Callers describe associations as records; the builders here turn them
//! into the exact wire shape each API generation expects. The builders are
//! pure and total: validation belongs to the operations that send them.
//!
//! Legacy body:
//!
//! ```json
//! {"fromObjectId": 1, "toObjectId": 2, "category": "HUBSPOT_DEFINED", "definitionId": 3}
//! ```
//!
//! Typed body (wrapped in `{"inputs": [...]}` for batch calls):
//!
//! ```json
//! {"from": {"id": 1}, "to": {"id": 2}, "type": "deal_to_contact"}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use core_kernel::ObjectId;

use crate::registry::DefinitionCode;

/// Category sent with every legacy association
pub const HUBSPOT_DEFINED: &str = "HUBSPOT_DEFINED";

/// A legacy association between two objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRecord {
    pub from_id: ObjectId,
    pub to_id: ObjectId,
    pub definition_id: DefinitionCode,
}

impl AssociationRecord {
    pub fn new(
        from_id: impl Into<ObjectId>,
        to_id: impl Into<ObjectId>,
        definition_id: impl Into<DefinitionCode>,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            definition_id: definition_id.into(),
        }
    }
}

/// A typed association between two objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedAssociationRecord {
    pub from_id: ObjectId,
    pub to_id: ObjectId,
    /// Relationship label, e.g. `deal_to_contact`
    #[serde(rename = "type")]
    pub association_type: String,
}

impl TypedAssociationRecord {
    pub fn new(
        from_id: impl Into<ObjectId>,
        to_id: impl Into<ObjectId>,
        association_type: impl Into<String>,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            association_type: association_type.into(),
        }
    }
}

/// Wire body of one legacy association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAssociationBody {
    pub from_object_id: ObjectId,
    pub to_object_id: ObjectId,
    pub category: &'static str,
    pub definition_id: DefinitionCode,
}

/// `{"id": ...}` reference used by the typed API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: ObjectId,
}

/// Wire body of one typed association
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedAssociationBody {
    pub from: ObjectRef,
    pub to: ObjectRef,
    #[serde(rename = "type")]
    pub association_type: String,
}

/// `{"inputs": [...]}` envelope of typed batch calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchInputs<T> {
    pub inputs: Vec<T>,
}

/// Builds the legacy wire body for one record
pub fn build_legacy_body(record: &AssociationRecord) -> LegacyAssociationBody {
    LegacyAssociationBody {
        from_object_id: record.from_id,
        to_object_id: record.to_id,
        category: HUBSPOT_DEFINED,
        definition_id: record.definition_id,
    }
}

/// Builds the typed wire body for one record
pub fn build_typed_body(record: &TypedAssociationRecord) -> TypedAssociationBody {
    TypedAssociationBody {
        from: ObjectRef { id: record.from_id },
        to: ObjectRef { id: record.to_id },
        association_type: record.association_type.clone(),
    }
}

/// Legacy batch body: a bare array, one element per record
pub fn build_legacy_batch(records: &[AssociationRecord]) -> Vec<LegacyAssociationBody> {
    records.iter().map(build_legacy_body).collect()
}

/// Typed batch body: the mapped records inside an `inputs` envelope
pub fn build_typed_batch(records: &[TypedAssociationRecord]) -> BatchInputs<TypedAssociationBody> {
    BatchInputs {
        inputs: records.iter().map(build_typed_body).collect(),
    }
}

/// One relationship label valid between two object types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationTypeLabel {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Response of the type discovery endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationTypeList {
    #[serde(default)]
    pub results: Vec<AssociationTypeLabel>,
}

impl AssociationTypeList {
    /// Label names, in response order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|label| label.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {}",
            other
        ))),
    }
}

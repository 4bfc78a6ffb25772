//! Association definition registry
//!
//! A fixed table from legacy definition codes to the object type found on
//! the "to" side of the relationship. Several codes can target the same type
//! (companies are the target of five of them). The table is plain static
//! data, so concurrent readers need no synchronisation.

use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::ObjectType;

use crate::error::AssociationError;

/// Highest code accepted by the legacy write endpoints
///
/// Codes above this are not HubSpot-defined legacy associations.
pub const LEGACY_DEFINITION_MAX: u32 = 100;

/// Numeric identifier of a relationship kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionCode(u32);

impl DefinitionCode {
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns true if the legacy write endpoints accept this code
    pub fn is_legacy(&self) -> bool {
        self.0 <= LEGACY_DEFINITION_MAX
    }
}

impl fmt::Display for DefinitionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DefinitionCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

pub const CONTACT_TO_COMPANY: DefinitionCode = DefinitionCode::new(1);
pub const COMPANY_TO_CONTACT: DefinitionCode = DefinitionCode::new(2);
pub const DEAL_TO_CONTACT: DefinitionCode = DefinitionCode::new(3);
pub const CONTACT_TO_DEAL: DefinitionCode = DefinitionCode::new(4);
pub const DEAL_TO_COMPANY: DefinitionCode = DefinitionCode::new(5);
pub const COMPANY_TO_DEAL: DefinitionCode = DefinitionCode::new(6);
pub const CONTACT_TO_ENGAGEMENT: DefinitionCode = DefinitionCode::new(9);
pub const ENGAGEMENT_TO_CONTACT: DefinitionCode = DefinitionCode::new(10);
pub const PARENT_COMPANY_TO_CHILD_COMPANY: DefinitionCode = DefinitionCode::new(13);
pub const CHILD_COMPANY_TO_PARENT_COMPANY: DefinitionCode = DefinitionCode::new(14);
pub const TICKET_TO_CONTACT: DefinitionCode = DefinitionCode::new(16);
pub const TICKET_TO_COMPANY: DefinitionCode = DefinitionCode::new(26);
pub const CONTACT_TO_COMPANY_V2: DefinitionCode = DefinitionCode::new(279);
pub const COMPANY_TO_CONTACT_V2: DefinitionCode = DefinitionCode::new(280);

// Ticket codes (16, 26) are named for callers but have no expansion target.
static DEFINITION_TARGETS: &[(ObjectType, &[DefinitionCode])] = &[
    (
        ObjectType::Company,
        &[
            CONTACT_TO_COMPANY,
            DEAL_TO_COMPANY,
            PARENT_COMPANY_TO_CHILD_COMPANY,
            CHILD_COMPANY_TO_PARENT_COMPANY,
            CONTACT_TO_COMPANY_V2,
        ],
    ),
    (
        ObjectType::Contact,
        &[
            COMPANY_TO_CONTACT,
            DEAL_TO_CONTACT,
            ENGAGEMENT_TO_CONTACT,
            COMPANY_TO_CONTACT_V2,
        ],
    ),
    (ObjectType::Deal, &[CONTACT_TO_DEAL, COMPANY_TO_DEAL]),
    (ObjectType::Engagement, &[CONTACT_TO_ENGAGEMENT]),
];

/// Resolves a definition code to the object type it targets
///
/// # Errors
///
/// `AssociationError::InvalidParameter` when no type lists the code.
pub fn resolve_target_type(code: DefinitionCode) -> Result<ObjectType, AssociationError> {
    DEFINITION_TARGETS
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map(|(object_type, _)| *object_type)
        .ok_or_else(|| AssociationError::definition_not_supported(code))
}

/// Rejects codes the legacy write endpoints do not accept
pub fn validate_legacy_code(code: DefinitionCode) -> Result<(), AssociationError> {
    if code.is_legacy() {
        Ok(())
    } else {
        Err(AssociationError::definition_not_supported(code))
    }
}

/// Codes whose target is the given object type (empty if none)
pub fn codes_targeting(object_type: ObjectType) -> &'static [DefinitionCode] {
    DEFINITION_TARGETS
        .iter()
        .find(|(target, _)| *target == object_type)
        .map(|(_, codes)| *codes)
        .unwrap_or(&[])
}

/// Every registered (code, target) pair
pub fn definitions() -> impl Iterator<Item = (DefinitionCode, ObjectType)> {
    DEFINITION_TARGETS
        .iter()
        .flat_map(|(object_type, codes)| codes.iter().map(move |code| (*code, *object_type)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_code_listed_once() {
        let mut codes: Vec<_> = definitions().map(|(code, _)| code).collect();
        let total = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn test_ticket_codes_are_unmapped() {
        assert!(resolve_target_type(TICKET_TO_CONTACT).is_err());
        assert!(resolve_target_type(TICKET_TO_COMPANY).is_err());
        assert!(codes_targeting(ObjectType::Ticket).is_empty());
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(validate_legacy_code(DefinitionCode::new(100)).is_ok());
        assert!(validate_legacy_code(DefinitionCode::new(101)).is_err());
    }
}

//! Definition registry tests

use proptest::prelude::*;

use core_kernel::ObjectType;
use domain_association::*;

#[test]
fn test_documented_mappings() {
    let expected = [
        (CONTACT_TO_COMPANY, ObjectType::Company),
        (COMPANY_TO_CONTACT, ObjectType::Contact),
        (DEAL_TO_CONTACT, ObjectType::Contact),
        (CONTACT_TO_DEAL, ObjectType::Deal),
        (DEAL_TO_COMPANY, ObjectType::Company),
        (COMPANY_TO_DEAL, ObjectType::Deal),
        (CONTACT_TO_ENGAGEMENT, ObjectType::Engagement),
        (ENGAGEMENT_TO_CONTACT, ObjectType::Contact),
        (PARENT_COMPANY_TO_CHILD_COMPANY, ObjectType::Company),
        (CHILD_COMPANY_TO_PARENT_COMPANY, ObjectType::Company),
        (CONTACT_TO_COMPANY_V2, ObjectType::Company),
        (COMPANY_TO_CONTACT_V2, ObjectType::Contact),
    ];
    for (code, object_type) in expected {
        assert_eq!(resolve_target_type(code).unwrap(), object_type, "code {}", code);
    }
    assert_eq!(definitions().count(), expected.len());
}

#[test]
fn test_company_has_five_codes() {
    assert_eq!(codes_targeting(ObjectType::Company).len(), 5);
}

#[test]
fn test_unknown_code_message() {
    let err = resolve_target_type(DefinitionCode::new(999)).unwrap_err();
    assert!(err.is_invalid_parameter());
    assert_eq!(err.to_string(), "Invalid parameter: Definition not supported: 999");
}

proptest! {
    #[test]
    fn prop_codes_above_threshold_are_rejected(code in 101u32..) {
        let err = validate_legacy_code(DefinitionCode::new(code)).unwrap_err();
        prop_assert!(err.is_invalid_parameter());
    }

    #[test]
    fn prop_codes_up_to_threshold_are_accepted(code in 0u32..=LEGACY_DEFINITION_MAX) {
        prop_assert!(validate_legacy_code(DefinitionCode::new(code)).is_ok());
    }

    #[test]
    fn prop_resolution_agrees_with_definitions(code in 0u32..400) {
        let code = DefinitionCode::new(code);
        let listed = definitions().find(|(c, _)| *c == code).map(|(_, t)| t);
        prop_assert_eq!(resolve_target_type(code).ok(), listed);
    }
}

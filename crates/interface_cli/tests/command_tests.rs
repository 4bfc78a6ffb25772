//! Command execution tests against a scripted transport

use serde_json::{json, Value};

use core_kernel::{HttpMethod, LookupTable};
use domain_association::AssociationClient;
use interface_cli::{execute, Command};
use test_utils::{AssociationFixtures, MockTransport};

fn client(transport: &MockTransport) -> AssociationClient {
    AssociationClient::new(transport.shared(), LookupTable::new())
}

#[tokio::test]
async fn test_raw_list_prints_page() {
    let transport = MockTransport::new();
    transport.respond(
        HttpMethod::Get,
        "/crm-associations/v1/associations/42/HUBSPOT_DEFINED/3",
        AssociationFixtures::page(&[7], 1, false),
    );

    let output = execute(
        &client(&transport),
        Command::List {
            resource_id: 42,
            definition: 3,
            offset: None,
            limit: None,
            raw: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(output, json!({"results": [7], "offset": 1, "hasMore": false}));
}

#[tokio::test]
async fn test_create_and_delete_commands() {
    let transport = MockTransport::new();
    transport
        .respond(HttpMethod::Put, "/crm-associations/v1/associations/create-batch", Value::Null)
        .respond(HttpMethod::Put, "/crm-associations/v1/associations/delete-batch", Value::Null);
    let client = client(&transport);

    let create = Command::Create {
        from: 1,
        to: 2,
        definition: 3,
    };
    let delete = Command::Delete {
        from: 1,
        to: 2,
        definition: 3,
    };
    let created = execute(&client, create).await.unwrap();
    let deleted = execute(&client, delete).await.unwrap();

    assert_eq!(created["created"]["to"], json!(2));
    assert_eq!(deleted["deleted"]["definition"], json!(3));
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_create_with_unsupported_code_fails_offline() {
    let transport = MockTransport::new();
    let err = execute(&client(&transport), Command::Create { from: 1, to: 2, definition: 279 })
        .await
        .unwrap_err();

    assert!(err.is_invalid_parameter());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_types_prints_names() {
    let transport = MockTransport::new();
    transport.respond(
        HttpMethod::Get,
        "/crm/v3/associations/deals/contacts/types",
        AssociationFixtures::types(&["deal_to_contact"]),
    );

    let output = execute(
        &client(&transport),
        Command::Types {
            from_type: "deals".to_string(),
            to_type: "contacts".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(output, json!(["deal_to_contact"]));
}

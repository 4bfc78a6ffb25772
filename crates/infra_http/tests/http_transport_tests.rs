//! End-to-end tests for HttpTransport against a local mock server

use core_kernel::{ApiRequest, PortError, Transport};
use infra_http::{HttpTransport, HubspotConfig};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer, config: HubspotConfig) -> HttpTransport {
    HttpTransport::new(config.base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deals/v1/deal/42"))
        .and(header("authorization", "Bearer pat-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"dealId": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, HubspotConfig::with_access_token("pat-test"));
    let body = transport
        .execute(ApiRequest::get("/deals/v1/deal/:deal_id").path_param("deal_id", 42))
        .await
        .unwrap();

    assert_eq!(body, json!({"dealId": 42}));
}

#[tokio::test]
async fn test_hapikey_travels_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/associations/deals/contacts/types"))
        .and(query_param("hapikey", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, HubspotConfig::with_hapikey("demo"));
    let request = ApiRequest::get("/crm/v3/associations/:fromObjectType/:toObjectType/types")
        .path_param("fromObjectType", "deals")
        .path_param("toObjectType", "contacts");

    assert_eq!(transport.execute(request).await.unwrap(), json!({"results": []}));
}

#[tokio::test]
async fn test_put_sends_json_body_and_tolerates_empty_response() {
    let server = MockServer::start().await;
    let payload = json!([{
        "fromObjectId": 1,
        "toObjectId": 2,
        "category": "HUBSPOT_DEFINED",
        "definitionId": 3
    }]);
    Mock::given(method("PUT"))
        .and(path("/crm-associations/v1/associations/create-batch"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, HubspotConfig::with_access_token("t"));
    let request = ApiRequest::put("/crm-associations/v1/associations/create-batch")
        .json(&payload)
        .unwrap()
        .raw_response();

    assert_eq!(transport.execute(request).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_error_status_preserves_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crm/v3/associations/deals/contacts/batch/create"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"message\":\"bad type\"}"))
        .mount(&server)
        .await;

    let transport = transport_for(&server, HubspotConfig::with_access_token("t"));
    let request = ApiRequest::post("/crm/v3/associations/deals/contacts/batch/create")
        .json(&json!({"inputs": []}))
        .unwrap();

    match transport.execute(request).await.unwrap_err() {
        PortError::Http { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("bad type"));
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_and_rate_limit_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deals/v1/deal/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/deals/v1/deal/429"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let transport = transport_for(&server, HubspotConfig::with_access_token("t"));
    let missing = transport
        .execute(ApiRequest::get("/deals/v1/deal/:deal_id").path_param("deal_id", 404))
        .await
        .unwrap_err();
    assert!(missing.is_not_found());

    let limited = transport
        .execute(ApiRequest::get("/deals/v1/deal/:deal_id").path_param("deal_id", 429))
        .await
        .unwrap_err();
    assert!(matches!(limited, PortError::RateLimited { retry_after_secs: 7 }));
}

#[tokio::test]
async fn test_missing_path_param_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let transport = transport_for(&server, HubspotConfig::with_access_token("t"));
    let err = transport
        .execute(ApiRequest::get("/deals/v1/deal/:deal_id"))
        .await
        .unwrap_err();

    assert!(matches!(err, PortError::Validation { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    let config = HubspotConfig::with_access_token("t").base_url("http://127.0.0.1:1");
    let transport = HttpTransport::new(config).unwrap();

    let err = transport
        .execute(ApiRequest::get("/deals/v1/deal/:deal_id").path_param("deal_id", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, PortError::Connection { .. }));
}

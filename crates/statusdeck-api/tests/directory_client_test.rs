#![allow(clippy::unwrap_used)]
// Integration tests for `DirectoryClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use statusdeck_api::{CountsFilter, DirectoryClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DirectoryClient) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&server.uri()).unwrap();
    let client = DirectoryClient::from_reqwest(endpoint, reqwest::Client::new());
    (server, client)
}

fn account_entity(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "addresses": [{ "line1": "1 Main St", "city": "Springfield" }],
        "ipAssignments": [{ "subnet": "10.0.0.8" }]
    })
}

// ── Counts query ────────────────────────────────────────────────────

#[tokio::test]
async fn test_equipment_counts() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": {
            "equipmentCounts": {
                "good": 1489, "warning": 9, "down": 71,
                "uninventoried": 1, "total": 1570
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("equipmentCounts"))
        .and(body_partial_json(json!({"variables": {"company": "Customer"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let counts = client
        .equipment_counts(&CountsFilter::company("Customer"))
        .await
        .unwrap();

    assert_eq!(counts.good, 1489);
    assert_eq!(counts.down, 71);
    assert_eq!(counts.total, 1570);
}

#[tokio::test]
async fn test_equipment_counts_status_filter_and_sparse_response() {
    let (server, client) = setup().await;

    let envelope = json!({ "data": { "equipmentCounts": { "down": 3 } } });

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"status": "DOWN"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let filter = CountsFilter {
        company: None,
        status: Some("DOWN".into()),
    };
    let counts = client.equipment_counts(&filter).await.unwrap();

    // Absent categories default to zero rather than failing the parse.
    assert_eq!(counts.down, 3);
    assert_eq!(counts.good, 0);
    assert_eq!(counts.total, 0);
}

// ── List queries ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_down_accounts() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": {
            "accounts": {
                "entities": [
                    account_entity("41", "Maple Street POP"),
                    account_entity("55", "Hillcrest Tower")
                ]
            }
        }
    });

    Mock::given(method("POST"))
        .and(body_string_contains("DownAccounts"))
        .and(body_partial_json(json!({"variables": {"limit": 100}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let accounts = client.list_down_accounts(100).await.unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].id, "41");
    assert_eq!(accounts[1].name, "Hillcrest Tower");
    assert_eq!(accounts[1].ip_assignments[0].subnet.as_deref(), Some("10.0.0.8"));
}

#[tokio::test]
async fn test_list_warning_accounts_numeric_ids() {
    let (server, client) = setup().await;

    // Directory reports ids as JSON numbers here — must canonicalize.
    let envelope = json!({
        "data": { "accounts": { "entities": [{ "id": 9, "name": "Depot" }] } }
    });

    Mock::given(method("POST"))
        .and(body_string_contains("WarningAccounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let accounts = client.list_warning_accounts(100).await.unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "9");
}

// ── Lookup query ────────────────────────────────────────────────────

#[tokio::test]
async fn test_account_by_id_found_and_missing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"id": "55"}})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "account": account_entity("55", "Hillcrest") } })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"id": "999"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "account": null } })))
        .mount(&server)
        .await;

    let found = client.account_by_id("55").await.unwrap();
    assert_eq!(found.unwrap().name, "Hillcrest");

    let missing = client.account_by_id("999").await.unwrap();
    assert!(missing.is_none());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_credential_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credential"))
        .mount(&server)
        .await;

    let result = client.equipment_counts(&CountsFilter::default()).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_query_errors_in_envelope() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": null,
        "errors": [
            { "message": "field 'equipmentCounts' is unavailable" },
            { "message": "rate budget exceeded" }
        ]
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let result = client.equipment_counts(&CountsFilter::default()).await;

    match result {
        Err(Error::Query { ref message }) => {
            assert!(message.contains("unavailable"), "got: {message}");
            assert!(message.contains("rate budget"), "got: {message}");
        }
        other => panic!("expected Query error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client.list_down_accounts(100).await.unwrap_err();

    assert!(
        matches!(err, Error::Status { status: 502, .. }),
        "expected Status error, got: {err:?}"
    );
    assert!(err.is_transient());
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.list_down_accounts(100).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

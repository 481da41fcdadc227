//! Spreadsheet sink against a mock token endpoint and values API.

use std::path::{Path, PathBuf};

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use catalog_core::CleanProductRecord;
use catalog_load::{LoadError, SheetsSink};
use catalog_transform::CleanTable;

const SPREADSHEET_ID: &str = "sheet-123";
const TEST_KEY_PEM: &str = include_str!("fixtures/test-service-account-key.pem");

fn table() -> CleanTable {
    CleanTable::new(vec![CleanProductRecord {
        title: "T-shirt 2".to_owned(),
        price: 1_634_400.0,
        rating: 3.9,
        colors: 3,
        size: "M".to_owned(),
        gender: "Women".to_owned(),
        timestamp: "2025-01-01T00:00:00+07:00".to_owned(),
    }])
}

fn write_credentials(dir: &Path, token_uri: &str) -> PathBuf {
    let creds = json!({
        "type": "service_account",
        "project_id": "catalog-test",
        "client_email": "loader@catalog-test.iam.gserviceaccount.com",
        "private_key": TEST_KEY_PEM,
        "token_uri": token_uri,
    });
    let path = dir.join("google-sheets-api.json");
    std::fs::write(&path, creds.to_string()).expect("write credentials");
    path
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_clear(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!(
            "/v4/spreadsheets/{SPREADSHEET_ID}/values/A1:Z100000:clear"
        )))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": SPREADSHEET_ID,
            "clearedRange": "Sheet1!A1:Z100000"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn writes_header_and_rows_after_clearing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let creds = write_credentials(dir.path(), &format!("{}/token", server.uri()));

    mount_token(&server).await;
    mount_clear(&server).await;
    Mock::given(method("PUT"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET_ID}/values/A1")))
        .and(query_param("valueInputOption", "RAW"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "majorDimension": "ROWS",
            "values": [
                ["Title", "Price", "Rating", "Colors", "Size", "Gender", "Timestamp"],
                ["T-shirt 2", 1_634_400.0, 3.9, 3, "M", "Women", "2025-01-01T00:00:00+07:00"]
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": SPREADSHEET_ID,
            "updatedRange": "Sheet1!A1:G2",
            "updatedRows": 2,
            "updatedColumns": 7,
            "updatedCells": 14
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = SheetsSink::new(SPREADSHEET_ID, creds).with_api_base(server.uri());
    let summary = sink.try_save(&table()).await.expect("sheets save");

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.location, SPREADSHEET_ID);
    assert_eq!(summary.cells_updated, Some(14));
}

#[tokio::test]
async fn missing_credentials_fail_without_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let sink = SheetsSink::new(SPREADSHEET_ID, dir.path().join("absent.json"))
        .with_api_base(server.uri());
    let err = sink.try_save(&table()).await.unwrap_err();

    assert!(matches!(err, LoadError::CredentialsNotFound { .. }), "got {err:?}");
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn malformed_credentials_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let creds = dir.path().join("google-sheets-api.json");
    std::fs::write(&creds, r#"{"client_email": "x@example.com"}"#).expect("write credentials");

    let sink = SheetsSink::new(SPREADSHEET_ID, creds);
    let err = sink.try_save(&table()).await.unwrap_err();
    assert!(matches!(err, LoadError::Credentials { .. }), "got {err:?}");
}

#[tokio::test]
async fn rejected_token_exchange_is_a_token_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let creds = write_credentials(dir.path(), &format!("{}/token", server.uri()));

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let sink = SheetsSink::new(SPREADSHEET_ID, creds).with_api_base(server.uri());
    let err = sink.try_save(&table()).await.unwrap_err();
    assert!(matches!(err, LoadError::Token(_)), "got {err:?}");
}

#[tokio::test]
async fn api_error_maps_to_sheets_api() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let creds = write_credentials(dir.path(), &format!("{}/token", server.uri()));

    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/v4/spreadsheets/{SPREADSHEET_ID}/values/A1:Z100000:clear"
        )))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let sink = SheetsSink::new(SPREADSHEET_ID, creds).with_api_base(server.uri());
    let err = sink.try_save(&table()).await.unwrap_err();

    match err {
        LoadError::SheetsApi { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "permission denied");
        }
        other => panic!("expected SheetsApi, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_table_is_refused() {
    let sink = SheetsSink::new(SPREADSHEET_ID, "google-sheets-api.json");
    let err = sink.try_save(&CleanTable::default()).await.unwrap_err();
    assert!(matches!(err, LoadError::EmptyTable));
}

//! Integration tests for pages, static assets, forms and error handling.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{FailingCatalog, TestClient, test_config};

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_home_lists_tours_with_weather() {
    let (mut client, _rx) = TestClient::new();

    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Hood River Day Trip"));
    assert!(response.body.contains("/tours/oregon-coast"));
    assert!(response.body.contains("Portland"));
    assert!(response.body.contains("Manzanita"));
}

#[tokio::test]
async fn test_about_shows_a_fortune() {
    let (mut client, _rx) = TestClient::new();

    let response = client.get("/about").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Your fortune for the day"));
}

#[tokio::test]
async fn test_tour_page_offers_waiver_only_when_required() {
    let (mut client, _rx) = TestClient::new();

    let climbing = client.get("/tours/rock-climbing-bend").await;
    assert_eq!(climbing.status, StatusCode::OK);
    assert!(climbing.body.contains("name=\"waiver\""));

    let hood_river = client.get("/tours/hood-river").await;
    assert_eq!(hood_river.status, StatusCode::OK);
    assert!(hood_river.body.contains("value=\"HR199\""));
    assert!(!hood_river.body.contains("name=\"waiver\""));
}

#[tokio::test]
async fn test_unknown_tour_is_not_found() {
    let (mut client, _rx) = TestClient::new();

    let response = client.get("/tours/moon-base").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let (mut client, _rx) = TestClient::new();

    let response = client.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

// =============================================================================
// Test Mode
// =============================================================================

#[tokio::test]
async fn test_test_scripts_only_with_query_flag() {
    let (mut client, _rx) = TestClient::new();

    let with_flag = client.get("/about?test=1").await;
    assert!(with_flag.body.contains("/qa/tests-global.js"));
    assert!(with_flag.body.contains("/qa/tests-about.js"));

    let without_flag = client.get("/about").await;
    assert!(!without_flag.body.contains("/qa/tests-global.js"));
    assert!(!without_flag.body.contains("/qa/tests-about.js"));
}

#[tokio::test]
async fn test_test_scripts_never_in_production() {
    let (mut client, _rx) = TestClient::with_config(test_config(&[("APP_ENV", "production")]));

    let response = client.get("/about?test=1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("/qa/tests-global.js"));
}

// =============================================================================
// Static Assets
// =============================================================================

#[tokio::test]
async fn test_static_file_served_before_routes() {
    let (mut client, _rx) = TestClient::new();

    let response = client.get("/css/main.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type().unwrap().starts_with("text/css"));
    assert!(response.body.contains(".weather-widget"));
}

#[tokio::test]
async fn test_post_to_static_path_falls_through_to_404() {
    let (mut client, _rx) = TestClient::new();

    let response = client.post_form("/css/main.css", "").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_unknown_path_renders_404_page() {
    let (mut client, _rx) = TestClient::new();

    let response = client.get("/no/such/page").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Not Found"));
    // Error pages still get the layout's weather widget.
    assert!(response.body.contains("Portland"));
}

#[tokio::test]
async fn test_unsupported_method_renders_404_page() {
    let (mut client, _rx) = TestClient::new();

    let response = client
        .send(Request::delete("/about"), Body::empty())
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_backend_failure_renders_generic_500() {
    let mut client = TestClient::with_catalog(Arc::new(FailingCatalog));

    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Server Error"));
    assert!(!response.body.contains("db-01"));
    assert!(!response.body.contains("unavailable"));
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let (mut client, _rx) = TestClient::new();

    let response = client
        .send(
            Request::get("/about").header("x-request-id", "trace-123"),
            Body::empty(),
        )
        .await;

    assert_eq!(
        response.headers.get("x-request-id").unwrap(),
        "trace-123"
    );
}

// =============================================================================
// Forms
// =============================================================================

#[tokio::test]
async fn test_process_answers_json_to_ajax() {
    let (mut client, _rx) = TestClient::new();

    let response = client
        .send(
            Request::post("/process")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::ACCEPT, "application/json"),
            Body::from("form=newsletter&name=Ann&email=ann%40example.com"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn test_process_redirects_browsers() {
    let (mut client, _rx) = TestClient::new();

    let response = client
        .send(
            Request::post("/process")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8"),
            Body::from("form=newsletter&name=Ann&email=ann%40example.com"),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/thank-you"));
}

#[tokio::test]
async fn test_newsletter_form_posts_to_process() {
    let (mut client, _rx) = TestClient::new();

    let response = client.get("/newsletter").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("action=\"/process\""));
}

// =============================================================================
// Photo Contest
// =============================================================================

#[tokio::test]
async fn test_contest_entry_redirects_to_thank_you() {
    let (mut client, _rx) = TestClient::new();
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"name\"\r\n\r\n\
         Ann\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"email\"\r\n\r\n\
         ann@example.com\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"photo\"; filename=\"beach.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         not-really-a-jpeg\r\n\
         --{boundary}--\r\n"
    );

    let response = client
        .send(
            Request::post("/contest/vacation-photo/2024/7").header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            ),
            Body::from(body),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/contest/vacation-photo/thank-you"));
}

#[tokio::test]
async fn test_malformed_contest_entry_redirects_to_error() {
    let (mut client, _rx) = TestClient::new();

    let response = client
        .send(
            Request::post("/contest/vacation-photo/2024/7")
                .header(header::CONTENT_TYPE, "text/plain"),
            Body::from("not multipart"),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/contest/vacation-photo/error"));
}

#[tokio::test]
async fn test_contest_form_targets_current_month() {
    use chrono::Datelike;

    let (mut client, _rx) = TestClient::new();
    let now = chrono::Utc::now();

    let response = client.get("/contest/vacation-photo").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(&format!(
        "/contest/vacation-photo/{}/{}",
        now.year(),
        now.month()
    )));
}

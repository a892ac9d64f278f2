//! Router tests: the lookup endpoint behind the admin guard.

mod mocks;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mocks::MockUserDirectory;
use phonefinder::server::LOOKUP_PATH;
use phonefinder::{router, AppState, LibPhoneNormalizer, Metrics, PhoneLookupHandler};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TOKEN: &str = "test-admin-token";

fn app(directory: &MockUserDirectory) -> Router {
    let metrics = Metrics::new();
    let normalizer = LibPhoneNormalizer::new().with_default_region("US").unwrap();
    let lookup = PhoneLookupHandler::new(
        Arc::new(directory.clone()),
        Arc::new(normalizer),
        metrics.clone(),
    );
    router(AppState::new(Arc::new(lookup), metrics, TOKEN))
}

fn sample_directory() -> MockUserDirectory {
    let directory = MockUserDirectory::new();
    directory.add_user("u1", "User One", Some("555-123-4567"));
    directory.add_user("u2", "User Two", Some(""));
    directory.add_user("u3", "User Three", Some("garbage"));
    directory
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_lookup_returns_matches() {
    let uri = format!("{}?number=%2B15551234567&region=US", LOOKUP_PATH);

    let (status, body) = send(app(&sample_directory()), get(&uri, Some(TOKEN))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "matches": [{
                "uid": "u1",
                "displayname": "User One",
                "phone": "+15551234567",
                "email": null
            }],
            "count": 1
        })
    );
}

#[tokio::test]
async fn test_lookup_without_region_param() {
    let uri = format!("{}?number=%2B1%20555%20123%204567", LOOKUP_PATH);

    let (status, body) = send(app(&sample_directory()), get(&uri, Some(TOKEN))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_missing_number_is_400() {
    for uri in [
        LOOKUP_PATH.to_string(),
        format!("{}?number=", LOOKUP_PATH),
        format!("{}?number=&region=US", LOOKUP_PATH),
    ] {
        let (status, body) = send(app(&sample_directory()), get(&uri, Some(TOKEN))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Missing number" }));
    }
}

#[tokio::test]
async fn test_invalid_number_is_400() {
    let uri = format!("{}?number=not-a-phone-number&region=US", LOOKUP_PATH);

    let (status, body) = send(app(&sample_directory()), get(&uri, Some(TOKEN))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid phone number" }));
}

#[tokio::test]
async fn test_repeated_number_param_is_json_400() {
    let uri = format!("{}?number=%2B15551234567&number=%2B15550000000", LOOKUP_PATH);

    let (status, body) = send(app(&sample_directory()), get(&uri, Some(TOKEN))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid query string" }));
}

#[tokio::test]
async fn test_international_number_with_unknown_region_is_200() {
    let uri = format!("{}?number=%2B15551234567&region=USA", LOOKUP_PATH);

    let (status, body) = send(app(&sample_directory()), get(&uri, Some(TOKEN))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let directory = sample_directory();
    let uri = format!("{}?number=%2B15551234567", LOOKUP_PATH);

    let (status, body) = send(app(&directory), get(&uri, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Authentication required" }));
    assert_eq!(directory.get_call_count("list_users"), 0);
}

#[tokio::test]
async fn test_wrong_token_is_403() {
    let directory = sample_directory();
    let uri = format!("{}?number=%2B15551234567", LOOKUP_PATH);

    let (status, body) = send(app(&directory), get(&uri, Some("not-the-token"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "Admin privileges required" }));
    assert_eq!(directory.get_call_count("list_users"), 0);
}

#[tokio::test]
async fn test_guard_runs_before_validation() {
    let uri = format!("{}?number=", LOOKUP_PATH);

    let (status, _) = send(app(&sample_directory()), get(&uri, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_directory_failure_is_500() {
    let directory = sample_directory();
    directory.fail_from(0);
    let uri = format!("{}?number=%2B15551234567", LOOKUP_PATH);

    let (status, body) = send(app(&directory), get(&uri, Some(TOKEN))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "User directory unavailable" }));
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let response = app(&sample_directory())
        .oneshot(get("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_metrics_reflect_lookups() {
    let app = app(&sample_directory());
    let uri = format!("{}?number=%2B15551234567", LOOKUP_PATH);

    let (status, _) = send(app.clone(), get(&uri, Some(TOKEN))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(app.clone(), get("/metrics", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(app, get("/metrics", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lookups_total"], 1);
    assert_eq!(body["users_scanned_total"], 3);
    assert_eq!(body["candidates_skipped_total"], 2);
    assert_eq!(body["matches_total"], 1);
}

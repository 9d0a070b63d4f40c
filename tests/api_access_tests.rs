//! Access gate behaviour across public, protected and unlisted paths

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_public_document_types_needs_no_credentials() {
    let app = create_test_app().await;

    let (status, body) = send(app, get_request("/api/v1/documents/types", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    let types: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(types.contains(&"ZERODHA"));
    assert!(types.contains(&"GROWW_TRADEBOOK"));
}

#[tokio::test]
async fn test_health_probes_are_public() {
    for path in [
        "/actuator/health",
        "/actuator/health/live",
        "/actuator/health/ready",
    ] {
        let app = create_test_app().await;
        let (status, body) = send(app, get_request(path, None, None)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(body["status"], "UP", "{path}");
    }
}

#[tokio::test]
async fn test_readiness_reports_disabled_event_bus() {
    let app = create_test_app().await;

    let (_, body) = send(app, get_request("/actuator/health/ready", None, None)).await;

    assert_eq!(body["components"]["eventBus"]["status"], "DISABLED");
}

#[tokio::test]
async fn test_protected_without_token_is_unauthorized() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get_request(
            "/api/v1/documents/status/00000000-0000-0000-0000-000000000000",
            None,
            Some("user-1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["www-authenticate"], "Bearer");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = create_test_app().await;
    let token = create_expired_token("gateway");

    let (status, body) = send(
        app,
        get_request(
            "/api/v1/documents/status/00000000-0000-0000-0000-000000000000",
            Some(&token),
            Some("user-1"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error_body(&body);
}

#[tokio::test]
async fn test_foreign_signature_is_unauthorized() {
    let app = create_test_app().await;
    let token = create_foreign_token("gateway");

    let (status, _) = send(
        app,
        upload_request(
            "/api/v1/documents/process",
            Some(&token),
            Some("user-1"),
            &[Part::Text("documentType", "ZERODHA")],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = create_test_app().await;
    let request = Request::builder()
        .uri("/api/v1/documents/status/00000000-0000-0000-0000-000000000000")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .header("x-user-id", "user-1")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unlisted_path_is_denied_even_with_valid_token() {
    let app = create_test_app().await;
    let token = create_test_token("gateway");

    let (status, body) = send(
        app,
        get_request("/api/v1/admin/users", Some(&token), Some("user-1")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error_body(&body);
}

#[tokio::test]
async fn test_unlisted_path_is_denied_without_token() {
    let app = create_test_app().await;

    let (status, _) = send(app, get_request("/internal/metrics", None, None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dot_segments_cannot_reach_public_prefix() {
    let app = create_test_app().await;

    let (status, _) = send(
        app,
        get_request("/swagger-ui/../api/v1/documents/process", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_prefix_without_route_is_not_found() {
    let app = create_test_app().await;

    let (status, body) = send(app, get_request("/swagger-ui/index.html", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_body(&body);
}

#[tokio::test]
async fn test_cors_preflight_is_answered_before_access_gate() {
    let app = create_test_app().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/documents/process")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization,x-user-id")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get_request("/actuator/health", None, None))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

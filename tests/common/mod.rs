#![allow(dead_code)]

//! Test infrastructure for the document API tests

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tower::ServiceExt;

use document_processor::app::{build_router, build_state};
use document_processor::config::{AppEnv, Config, EventTopics};
use document_processor::middleware::auth::RoutePolicy;
use document_processor::services::auth::build_credential_verifier;
use document_processor::services::documents::{ChecksumProcessor, DocumentService};
use document_processor::services::events::{
    DeliveryReceipt, EventEmitter, EventTransport, OutboundMessage, TransportError,
};
use document_processor::services::status::InMemoryStatusStore;
use document_processor::state::AppState;

pub const TEST_SECRET: &str = "integration-test-signing-secret";
pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

pub fn test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        app_env: AppEnv::Development,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        jwt_secret: Some(TEST_SECRET.to_string()),
        access_token_leeway_seconds: 0,
        event_bus_url: None,
        event_topics: EventTopics::default(),
        max_upload_bytes: 1024 * 1024,
        request_timeout: Duration::from_secs(5),
    }
}

/// Router wired exactly like production, with the event bus disabled
pub async fn create_test_app() -> Router {
    let config = test_config();
    let state = build_state(&config).await;
    build_router(state, &config)
}

/// Records every message handed to the bus
pub struct ChannelTransport {
    sent: mpsc::UnboundedSender<OutboundMessage>,
}

#[async_trait]
impl EventTransport for ChannelTransport {
    fn backend_name(&self) -> &'static str {
        "channel"
    }

    async fn send(&self, message: OutboundMessage) -> Result<DeliveryReceipt, TransportError> {
        let receipt = DeliveryReceipt {
            destination: message.destination.clone(),
            entry_id: "1-0".to_string(),
        };
        self.sent
            .send(message)
            .map_err(|e| TransportError::Command(e.to_string()))?;
        Ok(receipt)
    }
}

/// Router with an enabled emitter whose messages land in the returned receiver
pub fn create_test_app_with_events() -> (Router, mpsc::UnboundedReceiver<OutboundMessage>) {
    let config = test_config();
    let (tx, rx) = mpsc::unbounded_channel();
    let events = EventEmitter::new(
        Arc::new(ChannelTransport { sent: tx }),
        config.event_topics.clone(),
    );

    let documents = DocumentService::new(
        Arc::new(ChecksumProcessor),
        Arc::new(InMemoryStatusStore::new()),
        events,
    );
    let state = AppState::new(
        build_credential_verifier(&config),
        Arc::new(RoutePolicy::default()),
        Arc::new(documents),
    );

    (build_router(state, &config), rx)
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

/// Create a valid token for the gateway service identity
pub fn create_test_token(subject: &str) -> String {
    let now = now();
    sign(&json!({
        "sub": subject,
        "iat": now,
        "exp": now + 3600,
        "email": format!("{subject}@test.local"),
        "scopes": ["documents:write"],
    }))
}

/// Create a token that expired an hour ago
pub fn create_expired_token(subject: &str) -> String {
    let past = now() - 3600;
    sign(&json!({ "sub": subject, "iat": past - 3600, "exp": past }))
}

/// Create a token signed with a different secret
pub fn create_foreign_token(subject: &str) -> String {
    let now = now();
    encode(
        &Header::default(),
        &json!({ "sub": subject, "iat": now, "exp": now + 3600 }),
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .expect("Failed to encode JWT")
}

fn sign(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode JWT")
}

/// One part of a multipart/form-data body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        file_name: &'a str,
        content: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                field,
                file_name,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart form; `token` and `caller` are optional
pub fn upload_request(
    uri: &str,
    token: Option<&str>,
    caller: Option<&str>,
    parts: &[Part<'_>],
) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if let Some(caller) = caller {
        builder = builder.header("x-user-id", caller);
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>, caller: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if let Some(caller) = caller {
        builder = builder.header("x-user-id", caller);
    }
    builder.body(Body::empty()).unwrap()
}

/// Send one request and decode the JSON body (Null when empty)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn assert_error_body(body: &Value) {
    assert!(body["error"].is_string(), "missing error field: {body}");
    assert!(body["timestamp"].is_i64(), "missing timestamp field: {body}");
}

/*
 * Responsibility
 * - Config読み込み → tracing 初期化 → 依存生成 → Router 組み立て
 * - Middleware の適用順 (内側から): access gate → HTTP (request-id/limit/timeout/trace) → CORS
 *   - CORS を最外にして preflight を access gate より先に返す
 * - axum::serve() で起動
 */
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    config::Config,
    error::AppError,
    middleware::{self, auth::RoutePolicy},
    services::{
        auth::build_credential_verifier,
        documents::{ChecksumProcessor, DocumentService},
        events::build_event_emitter,
        status::InMemoryStatusStore,
    },
    state::AppState,
};

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    tracing::info!(?config, "starting document processor");

    let state = build_state(&config).await;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn build_state(config: &Config) -> AppState {
    let verifier = build_credential_verifier(config);
    let events = build_event_emitter(config).await;
    let documents = DocumentService::new(
        Arc::new(ChecksumProcessor),
        Arc::new(InMemoryStatusStore::new()),
        events,
    );

    AppState::new(
        verifier,
        Arc::new(RoutePolicy::default()),
        Arc::new(documents),
    )
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .merge(api::actuator::routes())
        .fallback(|| async { AppError::not_found("Not found") });

    let router = middleware::auth::access::apply(router, state.clone()).with_state(state);
    let router = middleware::http::apply(router, config.max_upload_bytes, config.request_timeout);
    middleware::cors::apply(router, config)
}

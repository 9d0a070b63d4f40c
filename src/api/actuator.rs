/*
 * Responsibility
 * - GET /actuator/health, /actuator/health/live, /actuator/health/ready
 * - すべて public (probe 用)
 */
use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

use crate::services::events::Topic;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/actuator/health", get(health))
        .route("/actuator/health/live", get(health))
        .route("/actuator/health/ready", get(ready))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "UP"}))
}

// The bus is best-effort, so a disabled emitter is reported but never makes us unready.
async fn ready(State(state): State<AppState>) -> Json<Value> {
    let events = state.documents.events();
    let event_bus = if events.is_enabled() {
        json!({
            "status": "UP",
            "portfolioTopic": events.destination(Topic::Portfolio),
            "tradeTopic": events.destination(Topic::Trade),
        })
    } else {
        json!({ "status": "DISABLED" })
    };
    Json(json!({
        "status": "UP",
        "components": { "eventBus": event_bus }
    }))
}

/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認可 (public / protected / denied) はここではなく middleware::auth::policy の表で決める
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::documents::{
    get_processing_status, list_document_types, process_batch, process_document,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents/types", get(list_document_types))
        .route("/documents/process", post(process_document))
        .route("/documents/batch-process", post(process_batch))
        .route("/documents/status/{process_id}", get(get_processing_status))
}

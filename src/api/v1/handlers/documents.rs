/*
 * Responsibility
 * - /documents 系 handler
 * - 呼び出し元は 2 層: Identity (検証済み bearer) と TrustedCallerId (X-User-ID)
 *   - 処理・ステータス・イベントに渡すユーザーは TrustedCallerId
 *   - Identity はログ (監査) にのみ使う。両者の突き合わせはしない
 * - DocumentError → AppError (400/404/500) への変換。500 の詳細はログにのみ残す
 */
use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::documents::{BATCH_FILES_FIELD, DocumentUploadForm, SINGLE_FILE_FIELD},
        extractors::{Identity, TrustedCallerId},
    },
    error::AppError,
    services::documents::{DocumentError, ProcessResult, ProcessingStatus},
    state::AppState,
};

fn into_app_error(err: DocumentError, caller: &TrustedCallerId, failure: &'static str) -> AppError {
    match err {
        DocumentError::InvalidArgument(reason) => {
            tracing::warn!(%caller, %reason, "invalid document parameters");
            AppError::invalid_parameters(reason)
        }
        DocumentError::NotFound(process_id) => {
            tracing::info!(%caller, %process_id, "process not found");
            AppError::not_found("Process not found")
        }
        other => {
            tracing::error!(%caller, error = %other, "document request failed");
            AppError::internal(failure)
        }
    }
}

async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
    file_field: &str,
) -> Result<DocumentUploadForm, AppError> {
    let multipart = multipart.map_err(|e| AppError::invalid_parameters(e.body_text()))?;
    DocumentUploadForm::read(multipart, file_field).await
}

pub async fn list_document_types(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    tracing::debug!("listing supported document types");
    Json(state.documents.supported_document_types())
}

pub async fn process_document(
    State(state): State<AppState>,
    Identity(identity): Identity,
    caller: TrustedCallerId,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessResult>, AppError> {
    let mut form = read_form(multipart, SINGLE_FILE_FIELD).await?;
    let document_type = form.document_type()?.to_string();
    let file = form.take_single_file()?;

    tracing::info!(
        %caller,
        service = %identity.user_id,
        %document_type,
        portfolio_id = ?form.portfolio_id,
        content_type = ?file.content_type,
        "processing document"
    );

    state
        .documents
        .process_document(file, &document_type, form.portfolio_id, &caller)
        .await
        .map(Json)
        .map_err(|e| into_app_error(e, &caller, "Failed to process document"))
}

pub async fn process_batch(
    State(state): State<AppState>,
    Identity(identity): Identity,
    caller: TrustedCallerId,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<ProcessResult>>, AppError> {
    let mut form = read_form(multipart, BATCH_FILES_FIELD).await?;
    let document_type = form.document_type()?.to_string();
    let files = form.take_files()?;

    tracing::info!(
        %caller,
        service = %identity.user_id,
        %document_type,
        count = files.len(),
        content_types = ?files.iter().map(|f| f.content_type.as_deref()).collect::<Vec<_>>(),
        "batch processing documents"
    );

    state
        .documents
        .process_batch(files, &document_type, form.portfolio_id, &caller)
        .await
        .map(Json)
        .map_err(|e| into_app_error(e, &caller, "Failed to process documents"))
}

// Status is keyed by process id only; the caller is logged, not checked against the owner.
pub async fn get_processing_status(
    State(state): State<AppState>,
    Identity(identity): Identity,
    caller: TrustedCallerId,
    Path(process_id): Path<String>,
) -> Result<Json<ProcessingStatus>, AppError> {
    let process_id = Uuid::parse_str(&process_id)
        .map_err(|_| AppError::invalid_parameters("processId must be a UUID"))?;

    tracing::info!(%caller, service = %identity.user_id, %process_id, "getting processing status");

    state
        .documents
        .get_status(process_id)
        .await
        .map(Json)
        .map_err(|e| into_app_error(e, &caller, "internal server error"))
}

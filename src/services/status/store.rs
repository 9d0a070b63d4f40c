//! Status store interface.
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::services::documents::types::ProcessingStatus;

pub type StatusResult<T> = Result<T, StatusStoreError>;

/// Kept apart from `AppError`; the document service decides how a failure surfaces.
#[derive(Debug, Error)]
pub enum StatusStoreError {
    #[error("status backend error: {0}")]
    Backend(String),
}

/// Writes and lookups are assumed atomic per `process_id`.
#[async_trait]
pub trait StatusStore: Send + Sync {
    // Insert or replace the record for `status.process_id`.
    async fn put(&self, status: ProcessingStatus) -> StatusResult<()>;

    async fn get(&self, process_id: Uuid) -> StatusResult<Option<ProcessingStatus>>;
}

/*
 * Responsibility
 * - ドキュメント処理のユースケース (単体 / バッチ / ステータス参照 / 種別一覧)
 * - 入力検証は処理コラボレータを呼ぶ前に全件行う (バッチは最初の不正で全体を中断)
 * - 処理成功後のイベント通知は fire-and-forget (結果はレスポンスに影響しない)
 */
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::services::auth::TrustedCallerId;
use crate::services::documents::processor::{DocumentJob, DocumentProcessor, ProcessorError};
use crate::services::documents::types::{
    DocumentType, ProcessResult, ProcessState, ProcessingStatus, StatementKind, UploadedFile,
};
use crate::services::events::{DomainEvent, EventEmitter};
use crate::services::status::{StatusStore, StatusStoreError};

const FAILED_STATUS_MESSAGE: &str = "Failed to process document";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("process not found: {0}")]
    NotFound(Uuid),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Status(#[from] StatusStoreError),
}

pub struct DocumentService {
    processor: Arc<dyn DocumentProcessor>,
    status: Arc<dyn StatusStore>,
    events: EventEmitter,
}

impl DocumentService {
    pub fn new(
        processor: Arc<dyn DocumentProcessor>,
        status: Arc<dyn StatusStore>,
        events: EventEmitter,
    ) -> Self {
        Self {
            processor,
            status,
            events,
        }
    }

    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// Supported type names, in declaration order.
    pub fn supported_document_types(&self) -> Vec<&'static str> {
        DocumentType::ALL.iter().map(DocumentType::as_str).collect()
    }

    pub async fn process_document(
        &self,
        file: UploadedFile,
        document_type: &str,
        portfolio_id: Option<String>,
        caller: &TrustedCallerId,
    ) -> Result<ProcessResult, DocumentError> {
        let document_type = parse_document_type(document_type)?;
        file.validate().map_err(DocumentError::InvalidArgument)?;

        self.run(file, document_type, portfolio_id, caller).await
    }

    pub async fn process_batch(
        &self,
        files: Vec<UploadedFile>,
        document_type: &str,
        portfolio_id: Option<String>,
        caller: &TrustedCallerId,
    ) -> Result<Vec<ProcessResult>, DocumentError> {
        let document_type = parse_document_type(document_type)?;
        if files.is_empty() {
            return Err(DocumentError::InvalidArgument(
                "at least one file is required".to_string(),
            ));
        }
        for (index, file) in files.iter().enumerate() {
            file.validate()
                .map_err(|e| DocumentError::InvalidArgument(format!("file #{}: {e}", index + 1)))?;
        }

        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(
                self.run(file, document_type, portfolio_id.clone(), caller)
                    .await?,
            );
        }
        Ok(results)
    }

    pub async fn get_status(&self, process_id: Uuid) -> Result<ProcessingStatus, DocumentError> {
        self.status
            .get(process_id)
            .await?
            .ok_or(DocumentError::NotFound(process_id))
    }

    async fn run(
        &self,
        file: UploadedFile,
        document_type: DocumentType,
        portfolio_id: Option<String>,
        caller: &TrustedCallerId,
    ) -> Result<ProcessResult, DocumentError> {
        let process_id = Uuid::new_v4();
        let now = Utc::now();
        let file_name = file.display_name().to_string();

        let pending = ProcessingStatus {
            process_id,
            user_id: caller.as_str().to_string(),
            document_type,
            portfolio_id: portfolio_id.clone(),
            file_name: file_name.clone(),
            status: ProcessState::Processing,
            message: None,
            created_at: now,
            updated_at: now,
        };
        self.status.put(pending.clone()).await?;

        let job = DocumentJob {
            process_id,
            user_id: caller.as_str().to_string(),
            document_type,
            portfolio_id: portfolio_id.clone(),
            file,
        };

        let outcome = match self.processor.process(&job).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(%process_id, %caller, error = %err, "document processor failed");
                // Status is readable by any caller; the processor's detail stays in the log.
                let failed = pending.transition(
                    ProcessState::Failed,
                    Some(FAILED_STATUS_MESSAGE.to_string()),
                );
                if let Err(store_err) = self.status.put(failed).await {
                    tracing::error!(%process_id, error = %store_err, "failed to record failure status");
                }
                return Err(err.into());
            }
        };

        let completed = pending.transition(ProcessState::Completed, Some(outcome.summary.clone()));
        let processed_at = completed.updated_at;
        self.status.put(completed).await?;

        let result = ProcessResult {
            process_id,
            user_id: caller.as_str().to_string(),
            document_type,
            portfolio_id,
            file_name,
            file_size: outcome.bytes_processed,
            checksum: outcome.checksum,
            status: ProcessState::Completed,
            message: outcome.summary,
            processed_at,
        };

        let event = match document_type.kind() {
            StatementKind::Holdings => DomainEvent::portfolio_update(&result),
            StatementKind::Trades => DomainEvent::trade_update(&result),
        };
        self.events.emit(event);

        Ok(result)
    }
}

fn parse_document_type(raw: &str) -> Result<DocumentType, DocumentError> {
    raw.parse::<DocumentType>()
        .map_err(|e| DocumentError::InvalidArgument(e.to_string()))
}

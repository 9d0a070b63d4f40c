//! Processing collaborator interface.
//!
//! Content extraction lives behind this trait; the service only needs an outcome or a failure.
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use super::types::{DocumentType, UploadedFile};

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("processing failed: {0}")]
    Failed(String),
}

/// Everything a processor gets to see about one document.
#[derive(Debug, Clone)]
pub struct DocumentJob {
    pub process_id: Uuid,
    pub user_id: String,
    pub document_type: DocumentType,
    pub portfolio_id: Option<String>,
    pub file: UploadedFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub checksum: String,
    pub bytes_processed: u64,
    pub summary: String,
}

#[async_trait]
pub trait DocumentProcessor: Send + Sync {
    async fn process(&self, job: &DocumentJob) -> Result<ProcessOutcome, ProcessorError>;
}

/// Default processor: fingerprints the upload (sha256) and accepts it.
#[derive(Debug, Clone, Default)]
pub struct ChecksumProcessor;

#[async_trait]
impl DocumentProcessor for ChecksumProcessor {
    async fn process(&self, job: &DocumentJob) -> Result<ProcessOutcome, ProcessorError> {
        let checksum = format!("{:x}", Sha256::digest(&job.file.content));
        let bytes_processed = job.file.content.len() as u64;

        Ok(ProcessOutcome {
            checksum,
            bytes_processed,
            summary: format!(
                "{} statement accepted for {}",
                job.document_type,
                job.document_type.broker()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn checksum_processor_fingerprints_content() {
        let job = DocumentJob {
            process_id: Uuid::new_v4(),
            user_id: "user-1".into(),
            document_type: DocumentType::Zerodha,
            portfolio_id: None,
            file: UploadedFile::new("h.pdf", "abc"),
        };

        let outcome = ChecksumProcessor.process(&job).await.unwrap();

        assert_eq!(
            outcome.checksum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(outcome.bytes_processed, 3);
    }
}

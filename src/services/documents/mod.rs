pub mod processor;
pub mod service;
pub mod types;

pub use processor::{ChecksumProcessor, DocumentJob, DocumentProcessor, ProcessOutcome, ProcessorError};
pub use service::{DocumentError, DocumentService};
pub use types::{
    DocumentType, ProcessResult, ProcessState, ProcessingStatus, StatementKind, UploadedFile,
};

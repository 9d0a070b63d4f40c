/*
 * Responsibility
 * - ドキュメント処理の型 (DocumentType / UploadedFile / ProcessResult / ProcessingStatus)
 * - DocumentType は固定の列挙 (順序も API 契約の一部)
 */
use std::{fmt, str::FromStr};

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File extensions accepted for upload (lowercase).
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "xlsx", "xls", "csv"];

/// Which downstream notification a processed document produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Holdings,
    Trades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Zerodha,
    Groww,
    Angelone,
    Dhan,
    Mstock,
    ZerodhaTradebook,
    GrowwTradebook,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Zerodha,
        DocumentType::Groww,
        DocumentType::Angelone,
        DocumentType::Dhan,
        DocumentType::Mstock,
        DocumentType::ZerodhaTradebook,
        DocumentType::GrowwTradebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Zerodha => "ZERODHA",
            DocumentType::Groww => "GROWW",
            DocumentType::Angelone => "ANGELONE",
            DocumentType::Dhan => "DHAN",
            DocumentType::Mstock => "MSTOCK",
            DocumentType::ZerodhaTradebook => "ZERODHA_TRADEBOOK",
            DocumentType::GrowwTradebook => "GROWW_TRADEBOOK",
        }
    }

    pub fn broker(&self) -> &'static str {
        match self {
            DocumentType::Zerodha | DocumentType::ZerodhaTradebook => "ZERODHA",
            DocumentType::Groww | DocumentType::GrowwTradebook => "GROWW",
            DocumentType::Angelone => "ANGELONE",
            DocumentType::Dhan => "DHAN",
            DocumentType::Mstock => "MSTOCK",
        }
    }

    pub fn kind(&self) -> StatementKind {
        match self {
            DocumentType::ZerodhaTradebook | DocumentType::GrowwTradebook => StatementKind::Trades,
            _ => StatementKind::Holdings,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDocumentType(pub String);

impl fmt::Display for UnknownDocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported document type: {}", self.0)
    }
}

impl std::error::Error for UnknownDocumentType {}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    // Exact match on the canonical name, same as the enum binding on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

/// One uploaded file as received from the multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: None,
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let name = self
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| "file name is required".to_string())?;

        if self.content.is_empty() {
            return Err(format!("file '{name}' is empty"));
        }

        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(format!(
                "file '{name}' has unsupported type (allowed: {})",
                ALLOWED_EXTENSIONS.join(", ")
            ));
        }

        Ok(())
    }

    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    Processing,
    Completed,
    Failed,
}

/// Status record of a processing request, keyed globally by `process_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatus {
    pub process_id: Uuid,
    pub user_id: String,
    pub document_type: DocumentType,
    pub portfolio_id: Option<String>,
    pub file_name: String,
    pub status: ProcessState,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcessingStatus {
    pub fn transition(&self, status: ProcessState, message: Option<String>) -> Self {
        Self {
            status,
            message,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    pub process_id: Uuid,
    pub user_id: String,
    pub document_type: DocumentType,
    pub portfolio_id: Option<String>,
    pub file_name: String,
    pub file_size: u64,
    pub checksum: String,
    pub status: ProcessState,
    pub message: String,
    pub processed_at: DateTime<Utc>,
}

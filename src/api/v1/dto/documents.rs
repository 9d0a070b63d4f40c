/*
 * Responsibility
 * - /documents の multipart request を読み取る DTO
 * - 必須項目チェック (file / files, documentType) は validate 系メソッドで行う
 * - documentType の値そのものの検証はサービス側 (DocumentType) に任せる
 */
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;

use crate::error::AppError;
use crate::services::documents::UploadedFile;

pub const SINGLE_FILE_FIELD: &str = "file";
pub const BATCH_FILES_FIELD: &str = "files";
const DOCUMENT_TYPE_FIELD: &str = "documentType";
const PORTFOLIO_ID_FIELD: &str = "portfolioId";

#[derive(Debug, Default)]
pub struct DocumentUploadForm {
    pub files: Vec<UploadedFile>,
    pub document_type: Option<String>,
    pub portfolio_id: Option<String>,
}

fn malformed(e: MultipartError) -> AppError {
    AppError::invalid_parameters(format!("malformed multipart body: {}", e.body_text()))
}

impl DocumentUploadForm {
    /// Read every field; files are collected from `file_field`, unknown fields are skipped.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_string();

            if name == file_field {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await.map_err(malformed)?;
                form.files.push(UploadedFile {
                    file_name,
                    content_type,
                    content,
                });
            } else if name == DOCUMENT_TYPE_FIELD {
                form.document_type = Some(field.text().await.map_err(malformed)?);
            } else if name == PORTFOLIO_ID_FIELD {
                let value = field.text().await.map_err(malformed)?;
                form.portfolio_id = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
        }

        Ok(form)
    }

    pub fn document_type(&self) -> Result<&str, AppError> {
        self.document_type
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::invalid_parameters("documentType is required"))
    }

    pub fn take_single_file(&mut self) -> Result<UploadedFile, AppError> {
        match self.files.len() {
            0 => Err(AppError::invalid_parameters("file is required")),
            1 => Ok(self.files.remove(0)),
            _ => Err(AppError::invalid_parameters("exactly one file is expected")),
        }
    }

    pub fn take_files(&mut self) -> Result<Vec<UploadedFile>, AppError> {
        if self.files.is_empty() {
            return Err(AppError::invalid_parameters("files are required"));
        }
        Ok(std::mem::take(&mut self.files))
    }
}

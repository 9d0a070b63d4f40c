/*
 * Responsibility
 * - アプリ共通の AppError 定義 (401/403/400/404/500)
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - エラー本文は常に { "error": <message>, "timestamp": <epoch millis> }
 * - 内部エラーの詳細はログにのみ残し、クライアントには汎用メッセージを返す
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: i64,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("request timeout")]
    Timeout,
    #[error("internal server error: {message}")]
    Internal { message: &'static str },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// 400 with the `Invalid parameters: ` prefix used for every validation failure.
    pub fn invalid_parameters(detail: impl std::fmt::Display) -> Self {
        Self::bad_request(format!("Invalid parameters: {detail}"))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// `message` is what the client sees; log the cause before converting.
    pub fn internal(message: &'static str) -> Self {
        Self::Internal { message }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message } | AppError::NotFound { message } => message,
            AppError::Unauthorized => "unauthorized".into(),
            AppError::Forbidden => "access denied".into(),
            AppError::Timeout => "request timeout".into(),
            AppError::Internal { message } => message.into(),
        };

        let mut response = (status, Json(ErrorResponse::new(message))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

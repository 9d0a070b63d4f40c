use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{CALLER_ID_HEADER, TrustedCallerId};
use crate::state::AppState;

// X-User-ID is required on every protected operation. Missing, blank or non-UTF-8 → 400.
impl FromRequestParts<AppState> for TrustedCallerId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_ID_HEADER)
            .and_then(|v| v.to_str().ok());

        TrustedCallerId::parse(raw)
            .ok_or_else(|| AppError::invalid_parameters("missing required header X-User-ID"))
    }
}

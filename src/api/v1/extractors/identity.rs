use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::IdentityContext;
use crate::state::AppState;

/// Handler で IdentityContext を受け取るための extractor
/// access middleware が request.extensions() に insert 済みである前提
/// 見つからない場合は 401 (保護されていないルートで使われた)
#[derive(Debug, Clone)]
pub struct Identity(pub IdentityContext);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .cloned()
            .map(Identity)
            .ok_or(AppError::Unauthorized)
    }
}

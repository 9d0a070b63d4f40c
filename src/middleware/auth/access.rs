//! Route-policy gate: classify path → (protected なら) bearer 検証 → IdentityContext を extensions に入れる
//!
//! Terminal states per request:
//! - Public: passes through untouched
//! - Protected: passes through with an `IdentityContext` in the request extensions
//! - Rejected: 403 for denied paths, 401 for missing/invalid credentials; nothing downstream runs
//!
//! Denied paths are decided from the path alone, before the Authorization header is read.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::middleware::auth::policy::{RouteClass, RoutePolicy};
use crate::services::auth::{IdentityContext, VerifyCredential, VerifyError, extract};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected(IdentityContext),
}

#[derive(Debug, thiserror::Error)]
pub enum AccessRejection {
    #[error("path is not in the access policy")]
    Denied,
    #[error("missing bearer credential")]
    MissingCredential,
    #[error("invalid bearer credential: {0}")]
    InvalidCredential(#[from] VerifyError),
}

impl From<AccessRejection> for AppError {
    fn from(e: AccessRejection) -> Self {
        match e {
            AccessRejection::Denied => AppError::Forbidden,
            AccessRejection::MissingCredential | AccessRejection::InvalidCredential(_) => {
                AppError::Unauthorized
            }
        }
    }
}

/// Apply the access gate to the whole router (routes and fallback).
///
/// 例：
/// ```ignore
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let access = match authorize(
        &state.policy,
        state.verifier.as_ref(),
        req.uri().path(),
        authorization,
    ) {
        Ok(access) => access,
        Err(err) => {
            tracing::warn!(
                path = %req.uri().path(),
                method = %req.method(),
                reason = %err,
                "request rejected by access policy"
            );
            return Err(err.into());
        }
    };

    if let Access::Protected(identity) = access {
        // middleware → extractor への受け渡し
        req.extensions_mut().insert(identity);
    }

    Ok(next.run(req).await)
}

/// Decide access for one request.
pub fn authorize<V>(
    policy: &RoutePolicy,
    verifier: &V,
    path: &str,
    authorization: Option<&str>,
) -> Result<Access, AccessRejection>
where
    V: VerifyCredential + ?Sized,
{
    match policy.classify(path) {
        RouteClass::Denied => Err(AccessRejection::Denied),
        RouteClass::Public => Ok(Access::Public),
        RouteClass::Protected => {
            let token = authorization
                .and_then(bearer_token)
                .ok_or(AccessRejection::MissingCredential)?;
            let claims = verifier.verify(token)?;
            tracing::debug!(
                subject = claims.subject(),
                issued_at = ?claims.issued_at(),
                expires_at = claims.expires_at(),
                "bearer credential verified"
            );
            Ok(Access::Protected(extract(&claims)))
        }
    }
}

// `Bearer <token>`; scheme is case-insensitive, any whitespace separates.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(char::is_whitespace)?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

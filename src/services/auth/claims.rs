/*
 * Responsibility
 * - 検証済み claims → IdentityContext への純粋な変換
 * - scope → authority ("SCOPE_" prefix) の変換
 *
 * Notes
 * - 任意 claim が無い/型が違う場合は None (エラーにしない)
 * - scopes が無い/null の場合は空
 */
use serde_json::Value;

use super::verifier::VerifiedClaims;

pub const SCOPE_AUTHORITY_PREFIX: &str = "SCOPE_";
pub const ADMIN_SCOPE: &str = "admin";

const EMAIL_CLAIM: &str = "email";
const NAME_CLAIM: &str = "name";
const PICTURE_CLAIM: &str = "picture";
const PROVIDER_ID_CLAIM: &str = "google_id";
const SCOPES_CLAIM: &str = "scopes";

/// Authenticated caller resolved from a verified bearer credential.
///
/// - `user_id` is the token subject (the calling service / gateway principal)
/// - the end user a request acts for is a separate `TrustedCallerId`, never stored here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub provider_id: Option<String>,
    pub scopes: Vec<String>,
}

impl IdentityContext {
    pub fn is_admin(&self) -> bool {
        self.has_scope(ADMIN_SCOPE)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    pub fn authorities(&self) -> Vec<String> {
        self.scopes.iter().map(|s| scope_to_authority(s)).collect()
    }
}

pub fn scope_to_authority(scope: &str) -> String {
    format!("{SCOPE_AUTHORITY_PREFIX}{scope}")
}

pub fn extract(claims: &VerifiedClaims) -> IdentityContext {
    IdentityContext {
        user_id: claims.subject().to_string(),
        email: string_claim(claims, EMAIL_CLAIM),
        name: string_claim(claims, NAME_CLAIM),
        picture: string_claim(claims, PICTURE_CLAIM),
        provider_id: string_claim(claims, PROVIDER_ID_CLAIM),
        scopes: scopes_claim(claims),
    }
}

fn string_claim(claims: &VerifiedClaims, name: &str) -> Option<String> {
    claims
        .claim(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn scopes_claim(claims: &VerifiedClaims) -> Vec<String> {
    match claims.claim(SCOPES_CLAIM) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Factory: build `CredentialVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::CredentialVerifier;

pub fn build_credential_verifier(config: &Config) -> Arc<CredentialVerifier> {
    let verifier = CredentialVerifier::new(
        config.jwt_secret.as_deref(),
        config.access_token_leeway_seconds,
    );

    if !verifier.is_configured() {
        tracing::warn!("AUTH_JWT_SECRET is not set; every protected request will be rejected");
    }

    Arc::new(verifier)
}

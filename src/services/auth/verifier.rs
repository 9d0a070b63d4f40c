use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Reasons a bearer credential is rejected.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("signature does not match the configured secret")]
    InvalidSignature,
    #[error("token is outside its validity window")]
    Expired,
    #[error("token is malformed: {0}")]
    Malformed(String),
    #[error("no signing secret configured")]
    SecretUnavailable,
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::InvalidSignature,
            ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => Self::Expired,
            _ => Self::Malformed(e.to_string()),
        }
    }
}

// Wire shape of the payload. `sub`, `exp` and `iat` are lifted out; everything else lands in `extra`.
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: String,
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Token payload that passed signature and validity checks.
///
/// Only [`CredentialVerifier`] can build one, so holding a value is proof of verification.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    subject: String,
    issued_at: Option<i64>,
    expires_at: i64,
    claims: Map<String, Value>,
}

impl VerifiedClaims {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.issued_at
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}

/// Seam used by the authorization gate.
pub trait VerifyCredential: Send + Sync {
    fn verify(&self, token: &str) -> Result<VerifiedClaims, VerifyError>;
}

/// HS256 bearer-token verifier over the process-wide shared secret.
///
/// - Without a secret it rejects everything (fail closed).
/// - Key material is not printable via Debug.
#[derive(Clone)]
pub struct CredentialVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("configured", &self.is_configured())
            .field("validation", &self.validation)
            .finish()
    }
}

impl CredentialVerifier {
    pub fn new(secret: Option<&str>, leeway_seconds: u64) -> Self {
        let decoding_key = secret
            .filter(|s| !s.trim().is_empty())
            .map(|s| DecodingKey::from_secret(s.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Service tokens from the gateway carry no audience we could pin.
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.decoding_key.is_some()
    }
}

impl VerifyCredential for CredentialVerifier {
    fn verify(&self, token: &str) -> Result<VerifiedClaims, VerifyError> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or(VerifyError::SecretUnavailable)?;

        let data = jsonwebtoken::decode::<RawClaims>(token, key, &self.validation)?;
        let raw = data.claims;

        if raw.sub.trim().is_empty() {
            return Err(VerifyError::Malformed("empty 'sub' claim".to_string()));
        }

        Ok(VerifiedClaims {
            subject: raw.sub,
            issued_at: raw.iat,
            expires_at: raw.exp,
            claims: raw.extra,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    pub(crate) const SECRET: &str = "test-secret-key-at-least-32-bytes";

    pub(crate) fn sign(payload: &Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    pub(crate) fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn valid_token_yields_subject_and_extra_claims() {
        let verifier = CredentialVerifier::new(Some(SECRET), 60);
        let token = sign(
            &json!({
                "sub": "gateway-user-1",
                "iat": now(),
                "exp": now() + 3600,
                "email": "a@example.com",
            }),
            SECRET,
        );

        let claims = verifier.verify(&token).unwrap();

        assert_eq!(claims.subject(), "gateway-user-1");
        assert_eq!(claims.claim("email"), Some(&json!("a@example.com")));
        assert!(claims.claim("sub").is_none());
        assert!(claims.issued_at().is_some());
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let verifier = CredentialVerifier::new(Some("another-secret-of-enough-length"), 60);
        let token = sign(&json!({"sub": "u", "exp": now() + 3600}), SECRET);

        assert!(matches!(
            verifier.verify(&token),
            Err(VerifyError::InvalidSignature)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = CredentialVerifier::new(Some(SECRET), 60);
        let token = sign(&json!({"sub": "u", "exp": now() - 3600}), SECRET);

        assert!(matches!(verifier.verify(&token), Err(VerifyError::Expired)));
    }

    #[test]
    fn token_not_yet_valid_is_rejected_as_expired() {
        let verifier = CredentialVerifier::new(Some(SECRET), 60);
        let token = sign(
            &json!({"sub": "u", "nbf": now() + 3600, "exp": now() + 7200}),
            SECRET,
        );

        assert!(matches!(verifier.verify(&token), Err(VerifyError::Expired)));
    }

    #[test]
    fn garbage_is_malformed() {
        let verifier = CredentialVerifier::new(Some(SECRET), 60);

        assert!(matches!(
            verifier.verify("not-a-jwt"),
            Err(VerifyError::Malformed(_))
        ));
    }

    #[test]
    fn missing_subject_is_malformed() {
        let verifier = CredentialVerifier::new(Some(SECRET), 60);
        let token = sign(&json!({"exp": now() + 3600}), SECRET);

        assert!(matches!(
            verifier.verify(&token),
            Err(VerifyError::Malformed(_))
        ));
    }

    #[test]
    fn blank_subject_is_malformed() {
        let verifier = CredentialVerifier::new(Some(SECRET), 60);
        let token = sign(&json!({"sub": "  ", "exp": now() + 3600}), SECRET);

        assert!(matches!(
            verifier.verify(&token),
            Err(VerifyError::Malformed(_))
        ));
    }

    #[test]
    fn missing_secret_fails_closed() {
        let token = sign(&json!({"sub": "u", "exp": now() + 3600}), SECRET);

        for verifier in [
            CredentialVerifier::new(None, 60),
            CredentialVerifier::new(Some("   "), 60),
        ] {
            assert!(!verifier.is_configured());
            assert!(matches!(
                verifier.verify(&token),
                Err(VerifyError::SecretUnavailable)
            ));
        }
    }

    #[test]
    fn debug_output_hides_key_material() {
        let verifier = CredentialVerifier::new(Some(SECRET), 60);
        let printed = format!("{verifier:?}");
        assert!(!printed.contains(SECRET));
        assert!(printed.contains("configured: true"));
    }
}

pub mod caller;
pub mod claims;
pub mod factory;
pub mod verifier;

pub use caller::{CALLER_ID_HEADER, TrustedCallerId};
pub use claims::{IdentityContext, extract, scope_to_authority};
pub use factory::build_credential_verifier;
pub use verifier::{CredentialVerifier, VerifiedClaims, VerifyCredential, VerifyError};

//! Stateless credential verification.
//!
//! Tokens are standard three-part HS256 JWTs signed with a process-wide
//! shared secret. Verification is a pure function of (token, secret, now):
//! nothing is looked up and nothing is retained between calls.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a credential was rejected.
///
/// The distinction is for internal logging only; the gate collapses all of
/// these into one opaque 401 so clients can't probe which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token is structurally malformed")]
    MalformedToken,
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// Identity embedded in a credential's `user` claim.
///
/// Trusted verbatim by downstream handlers once the gate has attached it.
/// Validity here means signature + expiry only; no role or permission
/// checks are performed anywhere in this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Full claim set carried by a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The identity this credential proves.
    pub user: AuthUser,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiry (Unix timestamp). Tokens at or past this instant are rejected.
    pub exp: i64,
}

/// Verifies credentials against the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    empty_secret: bool,
}

impl TokenVerifier {
    /// Create a verifier for the given shared secret.
    ///
    /// An empty secret produces a verifier that rejects everything rather
    /// than one that accepts unsigned input.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token even one second past exp is rejected.
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            empty_secret: secret.is_empty(),
        }
    }

    /// Validate a token and return its claims.
    ///
    /// The signature comparison is constant-time (inside `jsonwebtoken`),
    /// and the expiry check happens only after the signature holds.
    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        if self.empty_secret {
            return Err(VerifyError::InvalidSignature);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
                _ => VerifyError::MalformedToken,
            })?;

        // jsonwebtoken only rejects exp strictly before now; the boundary
        // here is inclusive, so a token expiring this very second is dead.
        if chrono::Utc::now().timestamp() >= data.claims.exp {
            return Err(VerifyError::Expired);
        }

        Ok(data.claims)
    }
}

//! Request gate enforcing credential verification.
//!
//! Applied in front of every protected route. A request either arrives at
//! its handler with an [`AuthUser`] in its extensions, or it is answered
//! here with a 401 and the handler never runs.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::TokenVerifier;

/// Response body for authentication failures.
///
/// Only two messages ever leave this module, regardless of why
/// verification failed; the specific failure kind is logged internally.
#[derive(Debug, Serialize)]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    fn missing() -> Self {
        Self {
            message: "No token, authorization denied".to_string(),
        }
    }

    fn invalid() -> Self {
        Self {
            message: "Token is not valid".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Extract and verify the bearer token from the request.
///
/// Expects `Authorization: <scheme> <token>`. The scheme keyword is not
/// checked; only the second whitespace-delimited segment is used.
pub async fn require_auth(
    State(verifier): State<TokenVerifier>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(AuthError::missing)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.split_whitespace().nth(1))
        .ok_or_else(AuthError::invalid)?;

    let claims = verifier.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AuthError::invalid()
    })?;

    // Handlers read the identity from extensions and trust it as-is.
    request.extensions_mut().insert(claims.user);

    Ok(next.run(request).await)
}

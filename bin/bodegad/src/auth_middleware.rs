//! Basic-auth middleware for the admin route group.
//!
//! Credentials come from the `[admin]` config section. Failures answer
//! 401 with a `WWW-Authenticate` challenge and the shared error envelope.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bodega_core::error::error_code;

/// Expected credentials, shared with the middleware as state.
#[derive(Clone)]
pub struct AdminAuth {
    pub username: String,
    pub password: String,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub enum AuthError {
    MissingCredentials,
    MalformedHeader,
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingCredentials => "missing authorization header",
            AuthError::MalformedHeader => "malformed authorization header",
            AuthError::InvalidCredentials => "invalid username or password",
        };
        let body = axum::Json(serde_json::json!({
            "code": error_code::UNAUTHENTICATED,
            "message": message,
        }));
        let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Basic realm=\"restricted\""),
        );
        response
    }
}

/// Middleware that checks `Authorization: Basic <credentials>` against
/// the configured admin user.
pub async fn basic_auth(
    State(auth): State<Arc<AdminAuth>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    // Scheme names are case-insensitive (RFC 7235).
    let (scheme, encoded) = header_value
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return Err(AuthError::MalformedHeader);
    }
    let decoded = BASE64
        .decode(encoded)
        .map_err(|_| AuthError::MalformedHeader)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedHeader)?;
    let (username, password) = decoded.split_once(':').ok_or(AuthError::MalformedHeader)?;

    if username != auth.username || password != auth.password {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(next.run(request).await)
}

//! Session-cookie authentication boundary
//!
//! The admin session token is issued and validated by the auth backend;
//! this service only requires its presence on the import boundary and
//! answers 401 with the standard envelope otherwise.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "token";

/// Reject requests without a session cookie
pub async fn require_session(request: Request, next: Next) -> Response {
    if session_token(request.headers()).is_none() {
        return ApiError::Unauthorized.into_response();
    }
    next.run(request).await
}

/// Extract the session token from the Cookie header
fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

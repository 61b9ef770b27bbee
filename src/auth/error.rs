// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization errors.
//!
//! Every failure in the verification pipeline is converted into an
//! [`AuthError`] before it leaves the component that produced it. Each
//! variant knows its machine-readable code, its human-readable description
//! and the HTTP status the request layer should answer with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authorization error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header on the request.
    #[error("Authorization header is expected")]
    MissingHeader,

    /// Header is not `Bearer <token>`.
    #[error("{0}")]
    MalformedHeader(&'static str),

    /// Token header carries no `kid`.
    #[error("Authorization malformed")]
    MissingKeyId,

    /// No key in the JWKS matches the token's `kid`.
    #[error("Unable to find the appropriate key")]
    KeyNotFound,

    /// JWKS could not be fetched or parsed.
    #[error("Unable to fetch signing keys: {0}")]
    KeySetUnavailable(String),

    /// Signature, payload or issuer rejected.
    #[error("Unable to parse authentication token: {0}")]
    InvalidToken(String),

    /// Signature valid but `exp` has passed.
    #[error("Token expired")]
    TokenExpired,

    /// `aud` does not match the configured audience.
    #[error("Incorrect claims, please check the audience and issuer")]
    InvalidAudience,

    /// Token has no usable `permissions` claim.
    #[error("Permissions not included in JWT")]
    InvalidClaims,

    /// `permissions` claim lacks the required permission.
    #[error("Permission not found")]
    Unauthorized,
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    error: u16,
    code: &'static str,
    description: String,
}

impl AuthError {
    /// Header does not split into exactly two parts.
    pub const fn wrong_part_count() -> Self {
        AuthError::MalformedHeader("Authorization header must be 'Bearer <token>'")
    }

    /// Header scheme is not `Bearer`.
    pub const fn wrong_scheme() -> Self {
        AuthError::MalformedHeader("Authorization header must start with 'Bearer'")
    }

    /// Get the machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader(_)
            | AuthError::MissingKeyId
            | AuthError::KeyNotFound
            | AuthError::KeySetUnavailable(_)
            | AuthError::InvalidToken(_) => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidAudience => "invalid_audience",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::Unauthorized => "unauthorized",
        }
    }

    /// Get the human-readable description, without diagnostic detail.
    pub fn description(&self) -> String {
        match self {
            AuthError::KeySetUnavailable(_) => "Unable to fetch signing keys".to_string(),
            AuthError::InvalidToken(_) => "Unable to parse authentication token".to_string(),
            other => other.to_string(),
        }
    }

    /// Underlying failure text, kept for diagnostics.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuthError::KeySetUnavailable(detail) | AuthError::InvalidToken(detail) => {
                Some(detail.as_str())
            }
            _ => None,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::MalformedHeader(_)
            | AuthError::MissingKeyId
            | AuthError::TokenExpired
            | AuthError::InvalidAudience => StatusCode::UNAUTHORIZED,
            AuthError::KeyNotFound
            | AuthError::KeySetUnavailable(_)
            | AuthError::InvalidToken(_)
            | AuthError::InvalidClaims => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            error: status.as_u16(),
            code: self.code(),
            description: self.description(),
        });
        (status, body).into_response()
    }
}

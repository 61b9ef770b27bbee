// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for verified claims.
//!
//! Use the `Auth` extractor as the first handler argument on routes behind
//! [`require_auth`](super::middleware::require_auth):
//!
//! ```rust,ignore
//! async fn drinks_detail(Auth(claims): Auth, State(state): State<AppState>) -> impl IntoResponse {
//!     // claims passed signature, issuer, audience, expiry and permission checks
//! }
//! ```

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::Claims;

/// Extractor for the verified claim set.
///
/// Claims are only placed in request extensions by the authorization
/// middleware. A route that uses `Auth` without it is a wiring bug, so the
/// rejection is a 500 rather than a client-facing auth error.
pub struct Auth(pub Claims);

/// Rejection for [`Auth`] on a route that has no authorization middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingAuthLayer;

impl IntoResponse for MissingAuthLayer {
    fn into_response(self) -> Response {
        tracing::error!("Auth extractor used on a route without require_auth");
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "code": "internal_error",
            "description": "Authorization is not configured for this route.",
        }));
        (status, body).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = MissingAuthLayer;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Auth)
            .ok_or(MissingAuthLayer)
    }
}

/// `Option<Auth>` for handlers that serve anonymous callers too.
impl<S: Send + Sync> OptionalFromRequestParts<S> for Auth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Claims>().cloned().map(Auth))
    }
}

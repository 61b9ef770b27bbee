// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{Auth, Claims};

/// Response for GET /v1/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// Subject (Auth0 user ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Token issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Token audiences
    pub audience: Vec<String>,
    /// Token expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Granted permissions
    pub permissions: Vec<String>,
}

impl From<&Claims> for UserMeResponse {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.subject().map(str::to_string),
            issuer: claims.issuer().map(str::to_string),
            audience: claims.audience().into_iter().map(str::to_string).collect(),
            expires_at: claims.expires_at(),
            permissions: claims.permissions().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Get the identity behind the presented access token.
#[utoipa::path(
    get,
    path = "/v1/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token identity", body = UserMeResponse),
        (status = 400, description = "Token could not be verified"),
        (status = 401, description = "Missing, malformed, expired or mis-addressed token"),
    )
)]
pub async fn get_current_user(Auth(claims): Auth) -> Json<UserMeResponse> {
    Json(UserMeResponse::from(&claims))
}

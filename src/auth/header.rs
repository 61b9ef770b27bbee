// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token extraction from the `Authorization` header.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::AuthError;

/// Scheme name, compared case-insensitively.
const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from request headers.
///
/// The header value is split on whitespace and must yield exactly two parts,
/// the first being `Bearer` in any case. The second part is returned as-is.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::wrong_part_count())?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(AuthError::wrong_part_count());
    };

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::wrong_scheme());
    }

    Ok(*token)
}

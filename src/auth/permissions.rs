// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission checks against the `permissions` claim.

use super::{claims::PermissionsClaim, AuthError, Claims};

/// Check that `claims` grants `required`.
///
/// A token without a usable `permissions` claim is a claims configuration
/// problem ([`AuthError::InvalidClaims`]); a claim that lacks the permission
/// is an authorization decision ([`AuthError::Unauthorized`]). Empty strings
/// are not special-cased here.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let granted = match claims.permissions_claim() {
        PermissionsClaim::Present(values) => values,
        PermissionsClaim::Absent | PermissionsClaim::Malformed => {
            return Err(AuthError::InvalidClaims)
        }
    };

    if granted.iter().any(|p| p.as_str() == Some(required)) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

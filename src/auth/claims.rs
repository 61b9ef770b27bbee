// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decoded JWT claim set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the RBAC claim Auth0 adds when "Add Permissions in the Access
/// Token" is enabled for the API.
pub const PERMISSIONS_CLAIM: &str = "permissions";

/// Claims decoded from a verified access token.
///
/// Only [`TokenVerifier`](super::TokenVerifier) builds values of this type
/// from untrusted input, so holding a `Claims` means signature, issuer,
/// audience and expiry have been checked. The set is never mutated after
/// decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

/// Shape of the `permissions` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionsClaim<'a> {
    /// Claim is not in the token.
    Absent,
    /// Claim is present but not an array of strings.
    Malformed,
    /// Claim is an array of strings.
    Present(&'a [Value]),
}

impl Claims {
    /// Look up a raw claim.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `sub` claim.
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// `iss` claim.
    pub fn issuer(&self) -> Option<&str> {
        self.get("iss").and_then(Value::as_str)
    }

    /// `aud` claim. Auth0 emits a string or an array of strings.
    pub fn audience(&self) -> Vec<&str> {
        match self.get("aud") {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// `exp` claim as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.get("exp").and_then(Value::as_i64)?;
        DateTime::from_timestamp(exp, 0)
    }

    /// Inspect the `permissions` claim.
    pub fn permissions_claim(&self) -> PermissionsClaim<'_> {
        match self.get(PERMISSIONS_CLAIM) {
            None => PermissionsClaim::Absent,
            Some(Value::Array(values)) if values.iter().all(Value::is_string) => {
                PermissionsClaim::Present(values)
            }
            Some(_) => PermissionsClaim::Malformed,
        }
    }

    /// Permission strings, empty unless the claim is well formed.
    pub fn permissions(&self) -> Vec<&str> {
        match self.permissions_claim() {
            PermissionsClaim::Present(values) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

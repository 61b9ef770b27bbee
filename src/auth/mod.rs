// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Auth0 access token verification and RBAC permission enforcement.
//!
//! ## Auth Flow
//!
//! 1. Client obtains an access token from Auth0 for `API_AUDIENCE`
//! 2. Client sends `Authorization: Bearer <access token>`
//! 3. Server:
//!    - Fetches `https://{AUTH0_DOMAIN}/.well-known/jwks.json`
//!    - Selects the key matching the token's `kid`
//!    - Verifies signature, expiry, issuer, audience
//!    - Checks the route's permission against the `permissions` claim
//!
//! ## Security
//!
//! - Signing algorithms are restricted to a configured allow-list
//! - JWKS is fetched over HTTPS with a bounded timeout
//! - Every failure is an [`AuthError`] with its own status code

pub mod claims;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod header;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testing;

pub use claims::Claims;
pub use error::AuthError;
pub use extractor::{Auth, MissingAuthLayer};
pub use guard::{AuthGuard, Guarded, RequiresAuth};
pub use jwks::JwksClient;
pub use middleware::require_auth;
pub use verifier::TokenVerifier;

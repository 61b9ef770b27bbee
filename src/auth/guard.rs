// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization guard.
//!
//! [`AuthGuard`] runs the full pipeline for one request:
//!
//! 1. extract the bearer token from the `Authorization` header
//! 2. fetch the tenant JWKS
//! 3. verify signature, issuer, audience and expiry
//! 4. check the required permission
//!
//! Each step fails fast. [`RequiresAuth`] binds a guard to one permission
//! and wraps protected operations, handing them the verified [`Claims`].

use std::future::Future;
use std::sync::Arc;

use axum::http::HeaderMap;

use super::header::extract_bearer;
use super::permissions::check_permission;
use super::{AuthError, Claims, JwksClient, TokenVerifier};
use crate::config::{AuthConfig, ConfigError};

/// Verification pipeline shared by every guarded route.
#[derive(Clone)]
pub struct AuthGuard {
    jwks: Arc<JwksClient>,
    verifier: Arc<TokenVerifier>,
}

impl AuthGuard {
    pub fn new(jwks: JwksClient, verifier: TokenVerifier) -> Self {
        Self {
            jwks: Arc::new(jwks),
            verifier: Arc::new(verifier),
        }
    }

    /// Build the guard from startup configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let jwks = JwksClient::for_domain(&config.domain, config.jwks_timeout)?;
        let verifier = TokenVerifier::new(&config.domain, config.audience.clone())
            .with_algorithms(config.algorithms.clone())
            .with_leeway(config.leeway);
        Ok(Self::new(jwks, verifier))
    }

    pub fn jwks(&self) -> &JwksClient {
        &self.jwks
    }

    /// Authenticate the request without a permission check.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = extract_bearer(headers)?;
        let key_set = self.jwks.fetch_key_set().await?;
        self.verifier.verify(token, &key_set)
    }

    /// Authenticate the request and check `permission`.
    ///
    /// An empty `permission` means the route only needs a valid token.
    pub async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let result = self.run(headers, permission).await;
        match &result {
            Ok(claims) => {
                tracing::debug!(sub = claims.subject(), permission, "request authorized");
            }
            Err(e) => {
                tracing::warn!(
                    code = e.code(),
                    status = e.status_code().as_u16(),
                    detail = e.detail(),
                    permission,
                    "request rejected: {e}"
                );
            }
        }
        result
    }

    async fn run(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let claims = self.authenticate(headers).await?;
        if !permission.is_empty() {
            check_permission(permission, &claims)?;
        }
        Ok(claims)
    }

    /// Guard value for routes that need `permission`.
    pub fn require(&self, permission: impl Into<String>) -> RequiresAuth {
        RequiresAuth {
            guard: self.clone(),
            permission: permission.into(),
        }
    }

    /// Guard value for routes that only need a valid token.
    pub fn authenticated(&self) -> RequiresAuth {
        self.require(String::new())
    }
}

/// An [`AuthGuard`] bound to one required permission.
#[derive(Clone)]
pub struct RequiresAuth {
    guard: AuthGuard,
    permission: String,
}

impl RequiresAuth {
    pub fn permission(&self) -> &str {
        &self.permission
    }

    /// Run the pipeline for `headers`.
    pub async fn check(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        self.guard.authorize(headers, &self.permission).await
    }

    /// Run `op` with the verified claims, or return the rejection.
    ///
    /// `op` is only called after every check has passed.
    pub async fn invoke<F, Fut, T>(&self, headers: &HeaderMap, op: F) -> Result<T, AuthError>
    where
        F: FnOnce(Claims) -> Fut,
        Fut: Future<Output = T>,
    {
        let claims = self.check(headers).await?;
        Ok(op(claims).await)
    }

    /// Wrap `op` into a handler taking headers plus the original arguments.
    pub fn wrap<F>(self, op: F) -> Guarded<F> {
        Guarded { guard: self, op }
    }
}

/// A protected operation wrapped by [`RequiresAuth::wrap`].
#[derive(Clone)]
pub struct Guarded<F> {
    guard: RequiresAuth,
    op: F,
}

impl<F> Guarded<F> {
    /// Authorize, then call the operation with `(claims, args)`.
    pub async fn call<A, Fut, T>(&self, headers: &HeaderMap, args: A) -> Result<T, AuthError>
    where
        F: Fn(Claims, A) -> Fut,
        Fut: Future<Output = T>,
    {
        let claims = self.guard.check(headers).await?;
        Ok((self.op)(claims, args).await)
    }
}

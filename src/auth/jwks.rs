// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and key selection.
//!
//! ## Security
//!
//! - JWKS is fetched from `https://{domain}/.well-known/jwks.json`
//! - The key set is fetched fresh for every verification, nothing is cached
//! - Every fetch is bounded by the client timeout
//!
//! Transport, status and parse failures all surface as
//! [`AuthError::KeySetUnavailable`].

use std::time::Duration;

use jsonwebtoken::jwk::{Jwk, JwkSet};
use url::Url;

use super::AuthError;

/// Default per-fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the well-known JWKS URL for a tenant domain.
pub fn jwks_url_for_domain(domain: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("https://{domain}/.well-known/jwks.json"))
}

/// Client for the tenant's published key set.
#[derive(Clone)]
pub struct JwksClient {
    /// JWKS endpoint
    jwks_url: Url,
    /// HTTP client (carries the fetch timeout)
    client: reqwest::Client,
}

impl JwksClient {
    /// Create a client for the given tenant domain.
    pub fn for_domain(domain: &str, timeout: Duration) -> Result<Self, JwksClientError> {
        let jwks_url = jwks_url_for_domain(domain)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(jwks_url, client))
    }

    /// Create a client with an explicit endpoint and HTTP client.
    pub fn with_client(jwks_url: Url, client: reqwest::Client) -> Self {
        Self { jwks_url, client }
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &Url {
        &self.jwks_url
    }

    /// Fetch the key set from the endpoint.
    pub async fn fetch_key_set(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!(url = %self.jwks_url, "fetching JWKS");

        let result = self.fetch().await;
        if let Err(ref e) = result {
            tracing::warn!(url = %self.jwks_url, error = %e, "JWKS fetch failed");
        }
        result
    }

    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::KeySetUnavailable(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))
    }
}

/// Errors building a [`JwksClient`].
#[derive(Debug, thiserror::Error)]
pub enum JwksClientError {
    #[error("invalid JWKS url: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Select the first key whose `kid` equals `kid`.
pub fn select_key<'a>(key_set: &'a JwkSet, kid: &str) -> Result<&'a Jwk, AuthError> {
    key_set
        .keys
        .iter()
        .find(|k| k.common.key_id.as_deref() == Some(kid))
        .ok_or(AuthError::KeyNotFound)
}

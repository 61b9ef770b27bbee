// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT signature and standard claim verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet};
use jsonwebtoken::{
    decode, decode_header, get_current_timestamp, Algorithm, DecodingKey, Validation,
};
use serde_json::Value;

use super::jwks::select_key;
use super::{AuthError, Claims};

/// Upper bound for the `exp` leeway, in seconds.
pub const MAX_CLOCK_SKEW_LEEWAY: u64 = 60;

/// Default algorithm allow-list.
pub const DEFAULT_ALGORITHMS: &[Algorithm] = &[Algorithm::RS256];

/// Verifies tokens issued by one tenant for one API audience.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    /// Expected `iss`, `https://{domain}/`
    issuer: String,
    /// Expected `aud`
    audience: String,
    /// Accepted signing algorithms
    algorithms: Vec<Algorithm>,
    /// Tolerance on `exp`, in seconds
    leeway: u64,
}

impl TokenVerifier {
    /// Create a verifier for the tenant `domain` and API `audience`.
    pub fn new(domain: &str, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer_for_domain(domain),
            audience: audience.into(),
            algorithms: DEFAULT_ALGORITHMS.to_vec(),
            leeway: 0,
        }
    }

    /// Replace the algorithm allow-list.
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Set the `exp` leeway, clamped to [`MAX_CLOCK_SKEW_LEEWAY`].
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway.min(MAX_CLOCK_SKEW_LEEWAY);
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Verify `token` against `key_set` and return its claims.
    pub fn verify(&self, token: &str, key_set: &JwkSet) -> Result<Claims, AuthError> {
        // Decode header to get kid
        let header =
            decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header.kid.as_deref().ok_or(AuthError::MissingKeyId)?;
        let jwk = select_key(key_set, kid)?;

        if !self.algorithms.contains(&header.alg) {
            return Err(AuthError::InvalidToken(format!(
                "algorithm {:?} is not allowed",
                header.alg
            )));
        }

        let decoding_key = jwk_to_decoding_key(jwk)?;

        // Build validation. The allow-list was checked above; jsonwebtoken wants
        // every listed algorithm to match the key family, so pass only this one.
        let mut validation = Validation::new(header.alg);
        validation.leeway = self.leeway;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidAudience => AuthError::InvalidAudience,
                ErrorKind::MissingRequiredClaim(claim) if claim == "aud" => {
                    AuthError::InvalidAudience
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        // `exp` is exclusive: a token is dead at its expiry second
        let claims = token_data.claims;
        if let Some(exp) = claims.get("exp").and_then(Value::as_u64) {
            if exp.saturating_add(self.leeway) <= get_current_timestamp() {
                return Err(AuthError::TokenExpired);
            }
        }

        Ok(claims)
    }
}

/// Issuer Auth0 stamps on tokens for `domain`.
pub fn issuer_for_domain(domain: &str) -> String {
    format!("https://{domain}/")
}

/// Convert a JWK to a DecodingKey.
fn jwk_to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|e| AuthError::InvalidToken(format!("Failed to create RSA key: {e}"))),
        AlgorithmParameters::EllipticCurve(ec) => DecodingKey::from_ec_components(&ec.x, &ec.y)
            .map_err(|e| AuthError::InvalidToken(format!("Failed to create EC key: {e}"))),
        _ => Err(AuthError::InvalidToken(
            "Unsupported key type in JWKS".to_string(),
        )),
    }
}

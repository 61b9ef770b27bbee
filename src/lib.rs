// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth0 Guard - Bearer token verification for Axum services
//!
//! This crate verifies Auth0-issued access tokens against the tenant JWKS
//! and enforces RBAC permissions before requests reach protected handlers.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token verification and permission checks
//! - `config` - Startup configuration from the environment
//! - `state` - Shared application state

pub mod api;
pub mod auth;
pub mod config;
pub mod state;

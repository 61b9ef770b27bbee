// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization middleware for Axum.
//!
//! Apply a [`RequiresAuth`] to a route or router subtree. On success the
//! verified [`Claims`](super::Claims) are placed in request extensions, where
//! the [`Auth`](super::Auth) extractor picks them up.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/drinks-detail", get(drinks_detail))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         guard.require("get:drinks-detail"),
//!         require_auth,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::RequiresAuth;

/// Authorization middleware function.
pub async fn require_auth(
    State(requires): State<RequiresAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        permission = requires.permission(),
        "authorizing request"
    );

    match requires.check(request.headers()).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

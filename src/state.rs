// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::auth::AuthGuard;

#[derive(Clone)]
pub struct AppState {
    pub guard: AuthGuard,
}

impl AppState {
    pub fn new(guard: AuthGuard) -> Self {
        Self { guard }
    }
}

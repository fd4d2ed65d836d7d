// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{AuthMode, AuthRequest, FinanceApi};
use crate::auth::AuthStore;
use tracing::warn;

pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    /// Inline message from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits the form; on success the session store holds the new
    /// credential. Failures are kept as the inline message, not retried.
    pub fn submit(&mut self, api: &dyn FinanceApi, auth: &AuthStore) -> bool {
        self.error = None;
        let req = AuthRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        let resp = match api.authenticate(self.mode, &req) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, mode = ?self.mode, "authentication failed");
                self.error = Some(e.to_string());
                return false;
            }
        };
        match auth.set_credential(&resp.token, resp.user) {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

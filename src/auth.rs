// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session store: the current credential, its durable copy, and the
//! listeners that re-render when it changes.

use crate::models::{Credential, User};
use crate::notify::{Listener, ListenerSet, Subscription};
use crate::storage::DurableStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Storage key holding the serialized credential.
pub const AUTH_KEY: &str = "auth";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("static email pattern"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credential: {0}")]
    InvalidCredential(&'static str),
}

pub struct AuthStore {
    state: RefCell<Option<Credential>>,
    // Set by an explicit clear; rehydration stays off until the next set.
    cleared: Cell<bool>,
    storage: Rc<dyn DurableStore>,
    listeners: Rc<ListenerSet>,
}

impl AuthStore {
    pub fn new(storage: Rc<dyn DurableStore>) -> Self {
        Self {
            state: RefCell::new(None),
            cleared: Cell::new(false),
            storage,
            listeners: Rc::new(ListenerSet::new()),
        }
    }

    pub fn set_credential(&self, token: &str, user: User) -> Result<(), AuthError> {
        validate(token, &user)?;
        let cred = Credential {
            token: token.to_string(),
            user,
        };
        info!(user_id = cred.user.id, email = %cred.user.email, "credential set");
        let serialized = serde_json::to_string(&cred);
        *self.state.borrow_mut() = Some(cred);
        self.cleared.set(false);
        match serialized {
            Ok(raw) => {
                if let Err(e) = self.storage.set_item(AUTH_KEY, &raw) {
                    warn!(error = %e, "failed to persist credential");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize credential"),
        }
        self.notify();
        Ok(())
    }

    pub fn clear_credential(&self) {
        *self.state.borrow_mut() = None;
        self.cleared.set(true);
        if let Err(e) = self.storage.remove_item(AUTH_KEY) {
            warn!(error = %e, "failed to remove persisted credential; overwriting it");
            // "null" rehydrates as absent in a later process.
            if let Err(e) = self.storage.set_item(AUTH_KEY, "null") {
                warn!(error = %e, "failed to overwrite persisted credential");
            }
        }
        info!("credential cleared");
        self.notify();
    }

    /// Current credential, loading the durable copy when memory is empty.
    /// Missing or unreadable storage yields `None`.
    pub fn credential(&self) -> Option<Credential> {
        if let Some(c) = self.state.borrow().as_ref() {
            return Some(c.clone());
        }
        if self.cleared.get() {
            return None;
        }
        let loaded = self.rehydrate()?;
        *self.state.borrow_mut() = Some(loaded.clone());
        Some(loaded)
    }

    pub fn token(&self) -> Option<String> {
        self.credential().map(|c| c.token)
    }

    pub fn user(&self) -> Option<User> {
        self.credential().map(|c| c.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.listeners.insert(listener);
        Subscription::new(Rc::downgrade(&self.listeners), id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self) {
        let n = self.listeners.notify_all();
        debug!(listeners = n, "auth listeners notified");
    }

    fn rehydrate(&self) -> Option<Credential> {
        let raw = match self.storage.get_item(AUTH_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(error = %e, "credential storage unreadable");
                return None;
            }
        };
        let stored: StoredCredential = match serde_json::from_str(&raw) {
            Ok(s) => s,
            Err(e) => {
                debug!(error = %e, "ignoring malformed stored credential");
                return None;
            }
        };
        let (token, user) = match (stored.token, stored.user) {
            (Some(t), Some(u)) => (t, u),
            _ => return None,
        };
        if validate(&token, &user).is_err() {
            debug!("ignoring stored credential with invalid fields");
            return None;
        }
        debug!(user_id = user.id, "credential rehydrated from storage");
        Some(Credential { token, user })
    }
}

// The persisted shape allows nulls for either half.
#[derive(Deserialize)]
struct StoredCredential {
    token: Option<String>,
    user: Option<User>,
}

fn validate(token: &str, user: &User) -> Result<(), AuthError> {
    if token.trim().is_empty() {
        return Err(AuthError::InvalidCredential("token must not be empty"));
    }
    if user.id <= 0 {
        return Err(AuthError::InvalidCredential("user id must be positive"));
    }
    if !EMAIL_RE.is_match(&user.email) {
        return Err(AuthError::InvalidCredential("user email is malformed"));
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::AuthStore;
use crate::models::User;
use crate::notify::Subscription;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    SignedOut,
    SignedIn(User),
}

/// Root view: picks the signed-out or signed-in shell from the session
/// store and re-renders whenever the store notifies.
pub struct RootShell {
    auth: Rc<AuthStore>,
    renders: Rc<Cell<u64>>,
    _sub: Subscription,
}

impl RootShell {
    pub fn mount(auth: Rc<AuthStore>) -> Self {
        let renders = Rc::new(Cell::new(0));
        let tick = Rc::clone(&renders);
        let sub = auth.subscribe(Rc::new(move || tick.set(tick.get() + 1)));
        Self {
            auth,
            renders,
            _sub: sub,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.auth.user() {
            Some(u) => Screen::SignedIn(u),
            None => Screen::SignedOut,
        }
    }

    /// Number of store notifications seen since mount.
    pub fn renders(&self) -> u64 {
        self.renders.get()
    }
}

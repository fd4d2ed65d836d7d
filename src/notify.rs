// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Synchronous listener registry shared by the session store and the refresh bus.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type Listener = Rc<dyn Fn()>;

#[derive(Default)]
pub struct ListenerSet {
    entries: RefCell<Vec<(u64, Listener)>>,
    next_id: std::cell::Cell<u64>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` unless the same `Rc` is already present, and
    /// returns the id of its entry either way.
    pub fn insert(&self, listener: Listener) -> u64 {
        let mut entries = self.entries.borrow_mut();
        if let Some((id, _)) = entries.iter().find(|(_, l)| same_listener(l, &listener)) {
            return *id;
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        entries.push((id, listener));
        id
    }

    pub fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(i, _)| *i != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Invokes every listener registered at call time, in registration order.
    /// The registry is not borrowed while listeners run, so they may
    /// subscribe, unsubscribe or notify again.
    pub fn notify_all(&self) -> usize {
        let snapshot: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for l in &snapshot {
            l();
        }
        snapshot.len()
    }
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Handle for one registration. Dropping it unregisters; call
/// [`Subscription::detach`] to keep the listener for the owner's lifetime.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    unregister: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(set: Weak<ListenerSet>, id: u64) -> Self {
        Self {
            unregister: Some(Box::new(move || {
                if let Some(set) = set.upgrade() {
                    set.remove(id);
                }
            })),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(f) = self.unregister.take() {
            f();
        }
    }

    pub fn detach(mut self) {
        self.unregister = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unregister.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}

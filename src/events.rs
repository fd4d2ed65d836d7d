// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Named-topic broadcast between views that mutate transactions and views
//! that display them. Delivery is synchronous and best-effort: a publish
//! reaches whoever is subscribed at that moment and is otherwise lost.

use crate::notify::{Listener, ListenerSet, Subscription};
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(Cow<'static, str>);

impl Topic {
    /// The transaction collection changed server-side; reload it.
    pub const TRANSACTIONS_CHANGED: Topic = Topic(Cow::Borrowed("tx:refresh"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Topic(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
pub struct RefreshBus {
    topics: RefCell<HashMap<Topic, Rc<ListenerSet>>>,
}

impl RefreshBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, topic: &Topic, handler: Listener) -> Subscription {
        let set = Rc::clone(
            self.topics
                .borrow_mut()
                .entry(topic.clone())
                .or_insert_with(|| Rc::new(ListenerSet::new())),
        );
        let id = set.insert(handler);
        debug!(topic = %topic, "refresh subscriber added");
        Subscription::new(Rc::downgrade(&set), id)
    }

    /// Invokes the handlers subscribed to `topic` right now and returns how
    /// many ran.
    pub fn publish(&self, topic: &Topic) -> usize {
        let set = self.topics.borrow().get(topic).cloned();
        let delivered = set.map_or(0, |s| s.notify_all());
        debug!(topic = %topic, delivered, "refresh published");
        delivered
    }

    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.topics.borrow().get(topic).map_or(0, |s| s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_are_independent() {
        let bus = RefreshBus::new();
        let other = Topic::new("budget:refresh");
        let hits = Rc::new(std::cell::Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = bus.subscribe(&other, Rc::new(move || h.set(h.get() + 1)));
        assert_eq!(bus.publish(&Topic::TRANSACTIONS_CHANGED), 0);
        assert_eq!(bus.publish(&other), 1);
        assert_eq!(hits.get(), 1);
    }
}

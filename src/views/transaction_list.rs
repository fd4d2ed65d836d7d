// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiError, FinanceApi};
use crate::events::{RefreshBus, Topic};
use crate::models::{TransactionFilter, TransactionPatch, TransactionRecord};
use crate::notify::Subscription;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct ListState {
    items: Vec<TransactionRecord>,
    filter: TransactionFilter,
    loading: bool,
    loads: u64,
}

/// Displayed transaction list. The cached items are replaced wholesale on
/// every load and reload on each `TRANSACTIONS_CHANGED` publish.
pub struct TransactionList {
    state: Rc<RefCell<ListState>>,
    api: Rc<dyn FinanceApi>,
    bus: Rc<RefreshBus>,
    _sub: Subscription,
}

impl TransactionList {
    /// Subscribes to the refresh topic and performs the initial load.
    pub fn mount(api: Rc<dyn FinanceApi>, bus: Rc<RefreshBus>, filter: TransactionFilter) -> Self {
        let state = Rc::new(RefCell::new(ListState {
            filter,
            ..ListState::default()
        }));
        let weak = Rc::downgrade(&state);
        let handler_api = Rc::clone(&api);
        let sub = bus.subscribe(
            &Topic::TRANSACTIONS_CHANGED,
            Rc::new(move || load_into(&weak, handler_api.as_ref())),
        );
        let list = Self {
            state,
            api,
            bus,
            _sub: sub,
        };
        list.reload();
        list
    }

    pub fn reload(&self) {
        load_into(&Rc::downgrade(&self.state), self.api.as_ref());
    }

    pub fn items(&self) -> Vec<TransactionRecord> {
        self.state.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Completed loads since mount.
    pub fn load_count(&self) -> u64 {
        self.state.borrow().loads
    }

    pub fn set_filter(&self, filter: TransactionFilter) {
        self.state.borrow_mut().filter = filter;
        self.reload();
    }

    /// Deletes on the server, then announces the change. The reload runs
    /// only after the delete response has been observed.
    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_transaction(id)?;
        self.bus.publish(&Topic::TRANSACTIONS_CHANGED);
        Ok(())
    }

    pub fn update(&self, id: i64, patch: &TransactionPatch) -> Result<TransactionRecord, ApiError> {
        let updated = self.api.update_transaction(id, patch)?;
        self.bus.publish(&Topic::TRANSACTIONS_CHANGED);
        Ok(updated)
    }
}

fn load_into(state: &Weak<RefCell<ListState>>, api: &dyn FinanceApi) {
    let filter = {
        let Some(s) = state.upgrade() else {
            return;
        };
        let mut s = s.borrow_mut();
        s.loading = true;
        s.filter.clone()
    };
    let items = match api.list_transactions(&filter) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "failed to load transactions; showing empty list");
            Vec::new()
        }
    };
    // The view may have been dropped while the request was in flight.
    let Some(s) = state.upgrade() else {
        debug!("transaction list gone before load completed; discarding result");
        return;
    };
    let mut s = s.borrow_mut();
    s.items = items;
    s.loading = false;
    s.loads += 1;
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FinanceApi;
use crate::auth::AuthStore;
use crate::client::{http_client, ApiClient, RequestAuthenticator};
use crate::config::Config;
use crate::db;
use crate::events::RefreshBus;
use crate::storage::{DurableStore, SqliteStore};
use anyhow::{Context, Result};
use std::rc::Rc;

/// One per process: the session store, the refresh bus, and the API client
/// wired to both. Views receive clones of these handles.
pub struct AppContext {
    pub auth: Rc<AuthStore>,
    pub bus: Rc<RefreshBus>,
    pub api: Rc<dyn FinanceApi>,
}

impl AppContext {
    /// Opens the on-disk store under `config.data_dir` and builds an HTTP
    /// client that authenticates each request from the session store.
    pub fn open(config: &Config) -> Result<Self> {
        let conn = db::open_or_init(&config.data_dir)?;
        let storage: Rc<dyn DurableStore> = Rc::new(SqliteStore::new(conn));
        let auth = Rc::new(AuthStore::new(storage));
        let http = http_client(config.timeout).context("Failed to build HTTP client")?;
        let client = ApiClient::new(http, config.api_base.clone())
            .with_interceptor(RequestAuthenticator::new(Rc::clone(&auth)));
        Ok(Self::from_parts(auth, Rc::new(client)))
    }

    pub fn from_parts(auth: Rc<AuthStore>, api: Rc<dyn FinanceApi>) -> Self {
        Self {
            auth,
            bus: Rc::new(RefreshBus::new()),
            api,
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The server contract consumed by the views.

use crate::models::{
    CategorySummary, NewTransaction, Period, PeriodSummary, TransactionFilter, TransactionPatch,
    TransactionRecord, User,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Login or signup rejected; carries the server's message.
    #[error("{0}")]
    Authentication(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed server payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid endpoint '{0}'")]
    Endpoint(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn path(&self) -> &'static str {
        match self {
            AuthMode::Login => "api/auth/login",
            AuthMode::Signup => "api/auth/signup",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

pub trait FinanceApi {
    fn authenticate(&self, mode: AuthMode, req: &AuthRequest) -> Result<AuthResponse, ApiError>;

    fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, ApiError>;

    fn create_transaction(&self, tx: &NewTransaction) -> Result<TransactionRecord, ApiError>;

    fn update_transaction(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<TransactionRecord, ApiError>;

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError>;

    fn summary(&self, period: Period) -> Result<PeriodSummary, ApiError>;

    /// Totals per category for transactions dated within `from..=to`.
    fn category_summary(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<CategorySummary, ApiError>;

    fn health(&self) -> Result<(), ApiError>;
}

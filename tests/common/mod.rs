// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use fintrack::api::{ApiError, AuthMode, AuthRequest, AuthResponse, FinanceApi};
use chrono::NaiveDate;
use fintrack::models::{
    CategorySummary, NewTransaction, Period, PeriodSummary, TransactionFilter, TransactionPatch,
    TransactionRecord, TxKind, User,
};
use std::cell::{Cell, RefCell};

/// In-memory stand-in for the REST server.
#[derive(Default)]
pub struct FakeServer {
    pub txs: RefCell<Vec<TransactionRecord>>,
    pub next_id: Cell<i64>,
    pub fail_reads: Cell<bool>,
    pub list_calls: Cell<u32>,
    pub summary_calls: Cell<u32>,
    pub deleted: RefCell<Vec<i64>>,
    /// Served by `summary` instead of totals computed from `txs`.
    pub summary_override: RefCell<Option<PeriodSummary>>,
}

impl FakeServer {
    pub fn new() -> Self {
        let s = Self::default();
        s.next_id.set(1);
        s
    }

    pub fn seed(&self, tx: NewTransaction) -> TransactionRecord {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let rec = tx.into_record(id);
        self.txs.borrow_mut().push(rec.clone());
        rec
    }
}

fn month_key(tx: &TransactionRecord, period: Period) -> String {
    match period {
        Period::Month => tx.date.format("%Y-%m").to_string(),
        Period::Year => tx.date.format("%Y").to_string(),
    }
}

impl FinanceApi for FakeServer {
    fn authenticate(&self, mode: AuthMode, req: &AuthRequest) -> Result<AuthResponse, ApiError> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(ApiError::Authentication(
                "Email and password required".into(),
            ));
        }
        if mode == AuthMode::Login && req.password != "secret" {
            return Err(ApiError::Authentication("Invalid credentials".into()));
        }
        Ok(AuthResponse {
            token: format!("tok-{}", req.email),
            user: User {
                id: 7,
                email: req.email.clone(),
            },
        })
    }

    fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_reads.get() {
            return Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            });
        }
        let mut out: Vec<_> = self
            .txs
            .borrow()
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    fn create_transaction(&self, tx: &NewTransaction) -> Result<TransactionRecord, ApiError> {
        if tx.category.is_empty() {
            return Err(ApiError::Status {
                status: 400,
                message: "Missing fields: category".into(),
            });
        }
        Ok(self.seed(tx.clone()))
    }

    fn update_transaction(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<TransactionRecord, ApiError> {
        let mut txs = self.txs.borrow_mut();
        let tx = txs
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Not found".into(),
            })?;
        patch.apply_to(tx);
        Ok(tx.clone())
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        let mut txs = self.txs.borrow_mut();
        let before = txs.len();
        txs.retain(|t| t.id != id);
        if txs.len() == before {
            return Err(ApiError::Status {
                status: 404,
                message: "Not found".into(),
            });
        }
        self.deleted.borrow_mut().push(id);
        Ok(())
    }

    fn summary(&self, period: Period) -> Result<PeriodSummary, ApiError> {
        self.summary_calls.set(self.summary_calls.get() + 1);
        if self.fail_reads.get() {
            return Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            });
        }
        if let Some(s) = self.summary_override.borrow().as_ref() {
            return Ok(s.clone());
        }
        let mut s = PeriodSummary::default();
        for tx in self.txs.borrow().iter() {
            let bucket = match tx.kind {
                TxKind::Income => &mut s.income,
                TxKind::Expense => &mut s.expense,
            };
            *bucket.entry(month_key(tx, period)).or_default() += tx.amount;
        }
        Ok(s)
    }

    fn category_summary(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<CategorySummary, ApiError> {
        let filter = TransactionFilter {
            from,
            to,
            ..Default::default()
        };
        let mut out = CategorySummary::default();
        for tx in self.txs.borrow().iter().filter(|t| filter.matches(t)) {
            let totals = out.0.entry(tx.category.clone()).or_default();
            let side = match tx.kind {
                TxKind::Income => &mut totals.income,
                TxKind::Expense => &mut totals.expense,
            };
            *side.get_or_insert_default() += tx.amount;
        }
        Ok(out)
    }

    fn health(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

pub fn new_tx(date: &str, category: &str, kind: TxKind, amount: &str) -> NewTransaction {
    NewTransaction {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: category.to_string(),
        kind,
        amount: amount.parse().unwrap(),
        notes: None,
    }
}

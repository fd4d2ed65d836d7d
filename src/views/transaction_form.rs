// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiError, FinanceApi};
use crate::events::{RefreshBus, Topic};
use crate::models::{NewTransaction, TransactionRecord, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::rc::Rc;
use tracing::info;

/// Draft state of the add-transaction form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub category: String,
    pub kind: TxKind,
    pub amount: Decimal,
    pub notes: String,
}

impl TransactionDraft {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today,
            category: String::new(),
            kind: TxKind::Expense,
            amount: Decimal::ZERO,
            notes: String::new(),
        }
    }

    pub fn to_new(&self) -> NewTransaction {
        let notes = self.notes.trim();
        NewTransaction {
            date: self.date,
            category: self.category.trim().to_string(),
            kind: self.kind,
            amount: self.amount,
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            },
        }
    }
}

pub struct TransactionForm {
    api: Rc<dyn FinanceApi>,
    bus: Rc<RefreshBus>,
    pub draft: TransactionDraft,
}

impl TransactionForm {
    pub fn new(api: Rc<dyn FinanceApi>, bus: Rc<RefreshBus>, today: NaiveDate) -> Self {
        Self {
            api,
            bus,
            draft: TransactionDraft::blank(today),
        }
    }

    /// Creates the drafted transaction, resets the draft, then publishes
    /// `TRANSACTIONS_CHANGED`. Nothing is published if the create fails.
    pub fn submit(&mut self) -> Result<TransactionRecord, ApiError> {
        let created = self.api.create_transaction(&self.draft.to_new())?;
        info!(id = created.id, category = %created.category, "transaction created");
        self.draft = TransactionDraft::blank(self.draft.date);
        self.bus.publish(&Topic::TRANSACTIONS_CHANGED);
        Ok(created)
    }
}

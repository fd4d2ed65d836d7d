// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Bearer token together with the identity it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(format!("Invalid type '{}', expected income|expense", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
}

/// Body of `POST /api/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn into_record(self, id: i64) -> TransactionRecord {
        TransactionRecord {
            id,
            date: self.date,
            category: self.category,
            kind: self.kind,
            amount: self.amount,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Body of `PUT /api/transactions/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TxKind>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.kind.is_none()
            && self.amount.is_none()
            && self.notes.is_none()
    }

    pub fn apply_to(&self, tx: &mut TransactionRecord) {
        if let Some(d) = self.date {
            tx.date = d;
        }
        if let Some(c) = &self.category {
            tx.category = c.trim().to_string();
        }
        if let Some(k) = self.kind {
            tx.kind = k;
        }
        if let Some(a) = self.amount {
            tx.amount = a;
        }
        if let Some(n) = &self.notes {
            let n = n.trim();
            tx.notes = if n.is_empty() { None } else { Some(n.to_string()) };
        }
    }
}

/// Optional query filters for `GET /api/transactions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub kind: Option<TxKind>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(d) = self.from {
            q.push(("from", d.to_string()));
        }
        if let Some(d) = self.to {
            q.push(("to", d.to_string()));
        }
        if let Some(k) = self.kind {
            q.push(("type", k.as_str().to_string()));
        }
        if let Some(c) = &self.category {
            q.push(("category", c.clone()));
        }
        q
    }

    pub fn matches(&self, tx: &TransactionRecord) -> bool {
        self.from.is_none_or(|d| tx.date >= d)
            && self.to.is_none_or(|d| tx.date <= d)
            && self.kind.is_none_or(|k| tx.kind == k)
            && self.category.as_ref().is_none_or(|c| &tx.category == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("Invalid period '{}', expected month|year", other)),
        }
    }
}

/// Server-computed totals per label for one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    #[serde(default)]
    pub income: HashMap<String, Decimal>,
    #[serde(default)]
    pub expense: HashMap<String, Decimal>,
}

/// Income and expense sums for one category. A side with no
/// transactions is absent from the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<Decimal>,
}

/// Per-category totals over a date range, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySummary(pub HashMap<String, CategoryTotals>);

impl CategorySummary {
    /// Splits into the income/expense maps the aggregator consumes,
    /// keyed by category. Absent sides are left out.
    pub fn to_period_summary(&self) -> PeriodSummary {
        let mut out = PeriodSummary::default();
        for (cat, t) in &self.0 {
            if let Some(v) = t.income {
                out.income.insert(cat.clone(), v);
            }
            if let Some(v) = t.expense {
                out.expense.insert(cat.clone(), v);
            }
        }
        out
    }
}

fn empty_as_none<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<String> = Option::deserialize(d)?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

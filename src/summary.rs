// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::PeriodSummary;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Chart-ready view of a period summary. All three sequences share one
/// index: `income_values[i]` and `expense_values[i]` belong to `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub income_values: Vec<Decimal>,
    pub expense_values: Vec<Decimal>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expense
    }

    /// `(label, income, expense)` rows in label order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, Decimal, Decimal)> + '_ {
        self.labels
            .iter()
            .zip(self.income_values.iter().zip(&self.expense_values))
            .map(|(l, (i, e))| (l.as_str(), *i, *e))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("{side} total overflows at label '{label}'")]
    Overflow { side: &'static str, label: String },
}

/// Builds the chart series. Totals use checked addition; a total past
/// `Decimal::MAX` is an error rather than a saturated value.
pub fn aggregate(
    income: &HashMap<String, Decimal>,
    expense: &HashMap<String, Decimal>,
) -> Result<ChartSeries, SummaryError> {
    // BTreeSet gives the union, deduplicated, in code-point order.
    let labels: BTreeSet<&String> = income.keys().chain(expense.keys()).collect();

    let mut out = ChartSeries::default();
    for label in labels {
        let inc = income.get(label).copied().unwrap_or(Decimal::ZERO);
        let exp = expense.get(label).copied().unwrap_or(Decimal::ZERO);
        out.total_income = checked_total(out.total_income, inc, "income", label)?;
        out.total_expense = checked_total(out.total_expense, exp, "expense", label)?;
        out.labels.push(label.clone());
        out.income_values.push(inc);
        out.expense_values.push(exp);
    }
    Ok(out)
}

pub fn aggregate_summary(summary: &PeriodSummary) -> Result<ChartSeries, SummaryError> {
    aggregate(&summary.income, &summary.expense)
}

fn checked_total(
    acc: Decimal,
    value: Decimal,
    side: &'static str,
    label: &str,
) -> Result<Decimal, SummaryError> {
    acc.checked_add(value).ok_or_else(|| SummaryError::Overflow {
        side,
        label: label.to_string(),
    })
}

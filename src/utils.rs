// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use rust_decimal::Decimal;

use crate::models::{TransactionRecord, TxKind};
use crate::summary::ChartSeries;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts are magnitudes; the transaction type carries the sign.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        anyhow::bail!("Amount must not be negative: '{}'", s);
    }
    Ok(d)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${:.2}", d.round_dp(2))
}

pub fn signed_amount(tx: &TransactionRecord) -> String {
    let sign = match tx.kind {
        TxKind::Income => '+',
        TxKind::Expense => '-',
    };
    format!("{}{}", sign, fmt_money(&tx.amount.abs()))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn transactions_table(items: &[TransactionRecord]) -> Table {
    let rows = items
        .iter()
        .map(|tx| {
            vec![
                tx.id.to_string(),
                tx.date.to_string(),
                tx.category.clone(),
                tx.kind.to_string(),
                signed_amount(tx),
                tx.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    let mut t = pretty_table(&["ID", "Date", "Category", "Type", "Amount", "Notes"], rows);
    if let Some(col) = t.column_mut(4) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    t
}

pub fn series_table(series: &ChartSeries) -> Table {
    let mut rows: Vec<Vec<String>> = series
        .rows()
        .map(|(label, inc, exp)| {
            vec![
                label.to_string(),
                format!("{:.2}", inc),
                format!("{:.2}", exp),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".to_string(),
        format!("{:.2}", series.total_income),
        format!("{:.2}", series.total_expense),
    ]);
    pretty_table(&["Label", "Income", "Expense"], rows)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

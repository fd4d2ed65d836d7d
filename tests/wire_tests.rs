// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::client::normalize_transaction_list;
use fintrack::models::{NewTransaction, TxKind};
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn server_list_payload_parses() {
    let body = json!([
        {"id": 2, "date": "2025-08-02", "category": "Salary", "type": "income",
         "amount": 3000.0, "notes": "", "user_id": 1},
        {"id": 1, "date": "2025-08-01", "category": "Food", "type": "expense",
         "amount": 12.5, "notes": "lunch", "user_id": 1}
    ]);
    let items = normalize_transaction_list(body).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, TxKind::Income);
    assert_eq!(items[0].notes, None);
    assert_eq!(items[1].amount, Decimal::new(125, 1));
    assert_eq!(items[1].notes.as_deref(), Some("lunch"));
    assert_eq!(items[1].date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
}

#[test]
fn non_array_payload_is_empty_list() {
    for body in [json!({"error": "Unauthorized"}), json!(null), json!("oops"), json!(3)] {
        assert!(normalize_transaction_list(body).unwrap().is_empty());
    }
}

#[test]
fn new_transaction_sends_numeric_amount() {
    let tx = NewTransaction {
        date: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
        category: "Dining".into(),
        kind: TxKind::Expense,
        amount: Decimal::new(1999, 2),
        notes: None,
    };
    let v = serde_json::to_value(&tx).unwrap();
    assert_eq!(
        v,
        json!({"date": "2025-08-03", "category": "Dining", "type": "expense", "amount": 19.99})
    );
}

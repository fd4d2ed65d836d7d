// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{new_tx, FakeServer};
use fintrack::api::{AuthMode, FinanceApi};
use fintrack::auth::{AuthStore, AUTH_KEY};
use fintrack::commands::transactions;
use fintrack::context::AppContext;
use fintrack::events::Topic;
use fintrack::models::{Period, PeriodSummary, TransactionFilter, TransactionPatch, TxKind};
use fintrack::storage::{DurableStore, MemoryStore};
use fintrack::summary::aggregate_summary;
use fintrack::views::{AuthForm, Dashboard, RootShell, Screen, TransactionForm, TransactionList};
use rust_decimal::Decimal;
use std::rc::Rc;

fn setup() -> (Rc<FakeServer>, Rc<MemoryStore>, AppContext) {
    let server = Rc::new(FakeServer::new());
    let storage = Rc::new(MemoryStore::new());
    let auth = Rc::new(AuthStore::new(storage.clone()));
    let api: Rc<dyn FinanceApi> = server.clone();
    (server, storage, AppContext::from_parts(auth, api))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
}

#[test]
fn create_then_refresh_reloads_list_with_new_record() {
    let (server, _storage, ctx) = setup();
    server.seed(new_tx("2025-08-01", "Rent", TxKind::Expense, "900"));

    let list = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), TransactionFilter::default());
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.load_count(), 1);

    let mut form = TransactionForm::new(ctx.api.clone(), ctx.bus.clone(), today());
    form.draft.category = "Groceries".into();
    form.draft.amount = Decimal::new(4250, 2);
    form.draft.notes = "  weekly shop ".into();
    let created = form.submit().unwrap();

    assert_eq!(list.load_count(), 2);
    let items = list.items();
    assert_eq!(items.len(), 2);
    let found = items.iter().find(|t| t.id == created.id).unwrap();
    assert_eq!(found.category, "Groceries");
    assert_eq!(found.notes.as_deref(), Some("weekly shop"));
    assert!(!list.is_loading());

    // Draft resets but keeps the date.
    assert!(form.draft.category.is_empty());
    assert_eq!(form.draft.date, today());
    assert_eq!(form.draft.kind, TxKind::Expense);
}

#[test]
fn failed_create_publishes_nothing() {
    let (server, _storage, ctx) = setup();
    let list = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), TransactionFilter::default());
    let mut form = TransactionForm::new(ctx.api.clone(), ctx.bus.clone(), today());
    assert!(form.submit().is_err());
    assert_eq!(list.load_count(), 1);
    assert_eq!(server.list_calls.get(), 1);
}

#[test]
fn delete_is_followed_by_reload() {
    let (server, _storage, ctx) = setup();
    let a = server.seed(new_tx("2025-08-01", "Rent", TxKind::Expense, "900"));
    server.seed(new_tx("2025-08-02", "Salary", TxKind::Income, "3000"));
    let list = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), TransactionFilter::default());
    assert_eq!(list.items().len(), 2);

    list.delete(a.id).unwrap();
    assert_eq!(*server.deleted.borrow(), vec![a.id]);
    assert_eq!(list.items().len(), 1);
    assert!(list.items().iter().all(|t| t.id != a.id));

    assert!(list.delete(a.id).is_err());
    assert_eq!(list.load_count(), 2);
}

#[test]
fn update_refreshes_list_and_dashboard() {
    let (server, _storage, ctx) = setup();
    let a = server.seed(new_tx("2025-08-01", "Food", TxKind::Expense, "40"));
    let list = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), TransactionFilter::default());
    let dash = Dashboard::mount(ctx.api.clone(), &ctx.bus, Period::Month);
    assert_eq!(dash.series().total_expense, Decimal::from(40));

    let patch = TransactionPatch {
        amount: Some(Decimal::from(55)),
        ..Default::default()
    };
    let updated = list.update(a.id, &patch).unwrap();
    assert_eq!(updated.amount, Decimal::from(55));
    assert_eq!(list.items()[0].amount, Decimal::from(55));
    assert_eq!(dash.series().total_expense, Decimal::from(55));
}

#[test]
fn transport_failure_degrades_to_empty_views() {
    let (server, _storage, ctx) = setup();
    server.seed(new_tx("2025-08-01", "Food", TxKind::Expense, "40"));
    server.fail_reads.set(true);
    let list = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), TransactionFilter::default());
    let dash = Dashboard::mount(ctx.api.clone(), &ctx.bus, Period::Month);
    assert!(list.items().is_empty());
    assert!(dash.series().is_empty());
    assert_eq!(dash.series().total_income, Decimal::ZERO);

    server.fail_reads.set(false);
    ctx.bus.publish(&Topic::TRANSACTIONS_CHANGED);
    assert_eq!(list.items().len(), 1);
    assert_eq!(dash.series().labels, vec!["2025-08"]);
}

#[test]
fn unmounted_list_ignores_refresh() {
    let (server, _storage, ctx) = setup();
    let list = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), TransactionFilter::default());
    assert_eq!(ctx.bus.subscriber_count(&Topic::TRANSACTIONS_CHANGED), 1);
    drop(list);
    assert_eq!(ctx.bus.subscriber_count(&Topic::TRANSACTIONS_CHANGED), 0);
    assert_eq!(ctx.bus.publish(&Topic::TRANSACTIONS_CHANGED), 0);
    assert_eq!(server.list_calls.get(), 1);
}

#[test]
fn filter_applies_to_reloads() {
    let (server, _storage, ctx) = setup();
    server.seed(new_tx("2025-07-30", "Food", TxKind::Expense, "10"));
    server.seed(new_tx("2025-08-02", "Salary", TxKind::Income, "3000"));
    let list = TransactionList::mount(
        ctx.api.clone(),
        ctx.bus.clone(),
        TransactionFilter {
            kind: Some(TxKind::Income),
            ..Default::default()
        },
    );
    assert_eq!(list.items().len(), 1);
    list.set_filter(TransactionFilter {
        from: NaiveDate::from_ymd_opt(2025, 7, 1),
        to: NaiveDate::from_ymd_opt(2025, 7, 31),
        ..Default::default()
    });
    let items = list.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "Food");
}

#[test]
fn login_logout_drive_root_shell() {
    let (_server, storage, ctx) = setup();
    let shell = RootShell::mount(ctx.auth.clone());
    assert_eq!(shell.screen(), Screen::SignedOut);

    let mut form = AuthForm::new(AuthMode::Login);
    form.email = "ann@example.com".into();
    form.password = "wrong".into();
    assert!(!form.submit(ctx.api.as_ref(), &ctx.auth));
    assert_eq!(form.error(), Some("Invalid credentials"));
    assert_eq!(shell.renders(), 0);

    form.password = "secret".into();
    assert!(form.submit(ctx.api.as_ref(), &ctx.auth));
    assert!(form.error().is_none());
    assert_eq!(shell.renders(), 1);
    match shell.screen() {
        Screen::SignedIn(u) => assert_eq!(u.email, "ann@example.com"),
        Screen::SignedOut => panic!("expected signed-in shell"),
    }
    assert!(storage.get_item(AUTH_KEY).unwrap().is_some());

    ctx.auth.clear_credential();
    assert_eq!(shell.renders(), 2);
    assert_eq!(shell.screen(), Screen::SignedOut);
    assert!(storage.get_item(AUTH_KEY).unwrap().is_none());
}

#[test]
fn signup_mode_toggle_clears_error() {
    let (_server, _storage, ctx) = setup();
    let mut form = AuthForm::new(AuthMode::Login);
    assert!(!form.submit(ctx.api.as_ref(), &ctx.auth));
    assert_eq!(form.error(), Some("Email and password required"));
    form.toggle_mode();
    assert_eq!(form.mode, AuthMode::Signup);
    assert!(form.error().is_none());
    form.email = "new@example.com".into();
    form.password = "anything".into();
    assert!(form.submit(ctx.api.as_ref(), &ctx.auth));
    assert_eq!(ctx.auth.token().as_deref(), Some("tok-new@example.com"));
}

#[test]
fn overflowing_summary_shows_zeros() {
    let (server, _storage, ctx) = setup();
    let half: Decimal = "50000000000000000000000000000".parse().unwrap();
    let mut summary = PeriodSummary::default();
    summary.income.insert("2025-01".into(), half);
    summary.income.insert("2025-02".into(), half);
    *server.summary_override.borrow_mut() = Some(summary);

    let dash = Dashboard::mount(ctx.api.clone(), &ctx.bus, Period::Month);
    assert!(dash.series().is_empty());
    assert_eq!(dash.series().total_income, Decimal::ZERO);

    // Recovers on the next refresh once the server reports sane totals.
    *server.summary_override.borrow_mut() = None;
    server.seed(new_tx("2025-08-01", "Pay", TxKind::Income, "10"));
    ctx.bus.publish(&Topic::TRANSACTIONS_CHANGED);
    assert_eq!(dash.series().total_income, Decimal::from(10));
}

#[test]
fn edit_command_updates_without_listing() {
    let (server, _storage, ctx) = setup();
    let a = server.seed(new_tx("2025-08-01", "Food", TxKind::Expense, "40"));
    let refreshes = Rc::new(std::cell::Cell::new(0));
    let r = Rc::clone(&refreshes);
    let _sub = ctx
        .bus
        .subscribe(&Topic::TRANSACTIONS_CHANGED, Rc::new(move || r.set(r.get() + 1)));

    let patch = TransactionPatch {
        category: Some("Groceries".into()),
        ..Default::default()
    };
    let tx = transactions::update_and_publish(&ctx, a.id, &patch).unwrap();
    assert_eq!(tx.category, "Groceries");
    assert_eq!(server.list_calls.get(), 0);
    assert_eq!(refreshes.get(), 1);

    assert!(transactions::update_and_publish(&ctx, 999, &patch).is_err());
    assert_eq!(refreshes.get(), 1);
}

#[test]
fn category_summary_feeds_aggregator() {
    let (server, _storage, _ctx) = setup();
    server.seed(new_tx("2025-07-30", "Food", TxKind::Expense, "5"));
    server.seed(new_tx("2025-08-01", "Food", TxKind::Expense, "40"));
    server.seed(new_tx("2025-08-02", "Salary", TxKind::Income, "900"));
    server.seed(new_tx("2025-08-03", "Food", TxKind::Expense, "2.5"));

    let from = NaiveDate::from_ymd_opt(2025, 8, 1);
    let cats = server.category_summary(from, None).unwrap();
    assert_eq!(cats.0["Food"].income, None);
    assert_eq!(cats.0["Food"].expense, Some(Decimal::new(425, 1)));

    let s = aggregate_summary(&cats.to_period_summary()).unwrap();
    assert_eq!(s.labels, vec!["Food", "Salary"]);
    assert_eq!(s.income_values, vec![Decimal::ZERO, Decimal::from(900)]);
    assert_eq!(s.expense_values, vec![Decimal::new(425, 1), Decimal::ZERO]);
}

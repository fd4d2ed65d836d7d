// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::require_session;
use crate::context::AppContext;
use crate::events::Topic;
use crate::models::{TransactionFilter, TransactionPatch, TransactionRecord, TxKind};
use crate::utils::{maybe_print_json, parse_amount, parse_date, transactions_table};
use crate::views::{TransactionDraft, TransactionForm, TransactionList};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    require_session(ctx)?;
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut form = TransactionForm::new(ctx.api.clone(), ctx.bus.clone(), today);
    form.draft = draft_from_matches(sub, today)?;
    let tx = form.submit().context("Failed to create transaction")?;
    println!(
        "Recorded {} {} on {} in '{}' (id {})",
        tx.kind,
        crate::utils::fmt_money(&tx.amount),
        tx.date,
        tx.category,
        tx.id
    );
    Ok(())
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from_matches(sub)?;
    let view = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), filter);
    let items = view.items();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        println!("{}", transactions_table(&items));
    }
    Ok(())
}

fn edit(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let patch = patch_from_matches(sub)?;
    if patch.is_empty() {
        anyhow::bail!("Nothing to change for transaction {}", id);
    }
    let tx = update_and_publish(ctx, id, &patch)?;
    println!("Updated transaction {} ({} {})", tx.id, tx.category, tx.kind);
    Ok(())
}

/// Sends the patch, then tells mounted views to refresh. Nothing is
/// fetched here.
pub fn update_and_publish(
    ctx: &AppContext,
    id: i64,
    patch: &TransactionPatch,
) -> Result<TransactionRecord> {
    let tx = ctx
        .api
        .update_transaction(id, patch)
        .with_context(|| format!("Failed to update transaction {}", id))?;
    let delivered = ctx.bus.publish(&Topic::TRANSACTIONS_CHANGED);
    debug!(id, delivered, "transaction updated");
    Ok(tx)
}

fn remove(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let view = TransactionList::mount(ctx.api.clone(), ctx.bus.clone(), Default::default());
    view.delete(id)
        .with_context(|| format!("Failed to delete transaction {}", id))?;
    println!("Deleted transaction {} ({} remaining)", id, view.items().len());
    Ok(())
}

fn parse_kind(s: &str) -> Result<TxKind> {
    s.parse::<TxKind>().map_err(anyhow::Error::msg)
}

pub fn draft_from_matches(sub: &clap::ArgMatches, today: NaiveDate) -> Result<TransactionDraft> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if category.is_empty() {
        anyhow::bail!("Category must not be empty");
    }
    let kind = match sub.get_one::<String>("type") {
        Some(t) => parse_kind(t)?,
        None => TxKind::Expense,
    };
    let amount = parse_amount(sub.get_one::<String>("amount").context("--amount is required")?)?;
    Ok(TransactionDraft {
        date,
        category,
        kind,
        amount,
        notes: sub.get_one::<String>("notes").cloned().unwrap_or_default(),
    })
}

pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        kind: sub.get_one::<String>("type").map(|s| parse_kind(s)).transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
    })
}

pub fn patch_from_matches(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        date: sub.get_one::<String>("date").map(|s| parse_date(s)).transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        kind: sub.get_one::<String>("type").map(|s| parse_kind(s)).transpose()?,
        amount: sub.get_one::<String>("amount").map(|s| parse_amount(s)).transpose()?,
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

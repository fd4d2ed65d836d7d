// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::require_session;
use crate::context::AppContext;
use crate::summary::aggregate_summary;
use crate::utils::{fmt_money, maybe_print_json, parse_date, series_table};
use anyhow::{Context, Result};

pub fn handle(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    require_session(ctx)?;
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    if let (Some(f), Some(t)) = (from, to) {
        if f > t {
            anyhow::bail!("--from {} is after --to {}", f, t);
        }
    }

    let summary = ctx
        .api
        .category_summary(from, to)
        .context("Failed to load category summary")?;
    let series = aggregate_summary(&summary.to_period_summary())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    if series.is_empty() {
        println!("No transactions in range.");
        return Ok(());
    }
    println!("{}", series_table(&series));
    println!("Net {}", fmt_money(&series.net()));
    Ok(())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::require_session;
use crate::context::AppContext;
use crate::models::Period;
use crate::utils::{fmt_money, maybe_print_json, series_table};
use crate::views::Dashboard;
use anyhow::Result;

pub fn handle(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    require_session(ctx)?;
    let period = match sub.get_one::<String>("period") {
        Some(p) => p.parse::<Period>().map_err(anyhow::Error::msg)?,
        None => Period::Month,
    };
    let dashboard = Dashboard::mount(ctx.api.clone(), &ctx.bus, period);
    let series = dashboard.series();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    if series.is_empty() {
        println!("No transactions for this {}.", period.as_str());
        return Ok(());
    }
    println!("{}", series_table(&series));
    println!(
        "Total income {}  Total expense {}  Net {}",
        fmt_money(&series.total_income),
        fmt_money(&series.total_expense),
        fmt_money(&series.net())
    );
    Ok(())
}

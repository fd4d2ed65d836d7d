// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use fintrack::{cli, commands, config::Config, context::AppContext};

fn init_logging(verbose: bool) {
    let default = if verbose { "fintrack=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    init_logging(matches.get_flag("verbose"));

    let config = Config::load(matches.get_one::<String>("api").map(String::as_str))?;
    let ctx = AppContext::open(&config)?;

    match matches.subcommand() {
        Some((name @ ("login" | "signup" | "logout" | "whoami"), sub)) => {
            commands::session::handle(&ctx, name, sub)?
        }
        Some(("tx", sub)) => commands::transactions::handle(&ctx, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&ctx, sub)?,
        Some(("categories", sub)) => commands::categories::handle(&ctx, sub)?,
        Some(("health", _)) => commands::health::handle(&ctx)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::AppContext;
use anyhow::{Context, Result};

pub fn handle(ctx: &AppContext) -> Result<()> {
    ctx.api.health().context("Server health check failed")?;
    println!("server: ok");
    match ctx.auth.user() {
        Some(u) => println!("session: {}", u.email),
        None => println!("session: none"),
    }
    Ok(())
}

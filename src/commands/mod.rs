// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod session;
pub mod transactions;
pub mod summary;
pub mod categories;
pub mod health;

use crate::context::AppContext;
use crate::models::User;
use anyhow::Result;

/// Gate for commands that need a signed-in user.
pub fn require_session(ctx: &AppContext) -> Result<User> {
    ctx.auth
        .user()
        .ok_or_else(|| anyhow::anyhow!("Not logged in; run `fintrack login` first"))
}

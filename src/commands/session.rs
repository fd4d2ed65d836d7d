// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::AuthMode;
use crate::context::AppContext;
use crate::views::{AuthForm, RootShell, Screen};
use anyhow::Result;

pub fn handle(ctx: &AppContext, name: &str, m: &clap::ArgMatches) -> Result<()> {
    match name {
        "login" => authenticate(ctx, AuthMode::Login, m)?,
        "signup" => authenticate(ctx, AuthMode::Signup, m)?,
        "logout" => {
            ctx.auth.clear_credential();
            println!("Logged out");
        }
        "whoami" => whoami(ctx),
        _ => {}
    }
    Ok(())
}

fn authenticate(ctx: &AppContext, mode: AuthMode, m: &clap::ArgMatches) -> Result<()> {
    let mut form = AuthForm::new(mode);
    form.email = m.get_one::<String>("email").cloned().unwrap_or_default();
    form.password = m.get_one::<String>("password").cloned().unwrap_or_default();
    if !form.submit(ctx.api.as_ref(), &ctx.auth) {
        let msg = form.error().unwrap_or("Failed");
        anyhow::bail!("{}", msg);
    }
    whoami(ctx);
    Ok(())
}

fn whoami(ctx: &AppContext) {
    let shell = RootShell::mount(ctx.auth.clone());
    match shell.screen() {
        Screen::SignedIn(u) => println!("Signed in as {} (id {})", u.email, u.id),
        Screen::SignedOut => println!("Not logged in"),
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn credentials(cmd: Command) -> Command {
    cmd.arg(Arg::new("email").long("email").required(true))
        .arg(Arg::new("password").long("password").required(true))
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .required(required)
        .value_parser(["income", "expense"])
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Personal finance tracker client")
        .arg(
            Arg::new("api")
                .long("api")
                .global(true)
                .help("Server base URL (overrides FINTRACK_API_URL)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log state changes and requests to stderr"),
        )
        .subcommand(credentials(Command::new("login").about("Sign in and store the session")))
        .subcommand(credentials(Command::new("signup").about("Create an account and sign in")))
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(Command::new("health").about("Check that the server is reachable"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(type_arg(false).default_value("expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("from").long("from"))
                        .arg(Arg::new("to").long("to"))
                        .arg(type_arg(false))
                        .arg(Arg::new("category").long("category")),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category"))
                        .arg(type_arg(false))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Income vs expense per label for a period")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_parser(["month", "year"])
                        .default_value("month"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("categories")
                .about("Income and expense per category over a date range")
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD, inclusive"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD, inclusive")),
        ))
}

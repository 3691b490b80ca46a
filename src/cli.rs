// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, crate_version};
use std::path::PathBuf;

pub fn build_cli() -> Command {
    Command::new("tally")
        .version(crate_version!())
        .about("Tally: record expenses and see where the money went")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Ledger file to use instead of the default data dir"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more to stderr (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the ledger if needed and print its path"))
        .subcommand(Command::new("shell").about("Interactive menu (the default)"))
        .subcommand(
            Command::new("export")
                .about("Export all expenses")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
        )
}

/// Ledger file for this run: `--db` when given, else the data-dir default.
pub fn db_location(matches: &ArgMatches) -> Result<PathBuf> {
    match matches.get_one::<String>("db") {
        Some(p) => Ok(PathBuf::from(p)),
        None => db::db_path(),
    }
}

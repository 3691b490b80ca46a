// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::io;

use tally::charts::TerminalCharts;
use tally::shell::{Console, Shell};
use tally::{cli, commands, db, logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    let store = db::Store::open(cli::db_location(&matches)?)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", store.path().display());
        }
        Some(("export", sub)) => store.with_conn(|conn| commands::exporter::handle(conn, sub))?,
        _ => {
            println!("Database ready at {}", store.path().display());
            let console = Console::new(io::stdin().lock(), io::stdout());
            let mut shell = Shell::new(store, console, Box::new(TerminalCharts));
            shell.run()?;
        }
    }
    Ok(())
}

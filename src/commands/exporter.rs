// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::repo;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = m
        .get_one::<String>("out")
        .context("--out is required")?;
    let n = export_expenses(conn, &fmt, Path::new(out))?;
    println!("Exported {} expenses to {}", n, out);
    Ok(())
}

/// Writes every expense, oldest first, as `csv` or `json`. Returns the number
/// of records written. An unknown format writes nothing.
pub fn export_expenses(conn: &Connection, fmt: &str, out: &Path) -> Result<usize> {
    if fmt != "csv" && fmt != "json" {
        return Err(LedgerError::UnknownFormat(fmt.to_string()).into());
    }
    let data = repo::list_chronological(conn)?;

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record(["id", "date", "amount", "category", "description"])?;
            for e in &data {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.amount.to_string(),
                    e.category.clone(),
                    e.description.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&data)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
    }
    Ok(data.len())
}

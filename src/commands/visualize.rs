// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::{ChartRenderer, pie_slices};
use crate::db::Store;
use crate::repo;
use crate::shell::Console;
use anyhow::Result;
use std::io::{BufRead, Write};

pub fn handle<R: BufRead, W: Write>(
    store: &Store,
    io: &mut Console<R, W>,
    charts: &mut dyn ChartRenderer,
) -> Result<()> {
    let (by_category, by_month) = store.with_conn(|conn| {
        Ok((repo::sum_by_category(conn)?, repo::monthly_totals(conn)?))
    })?;
    if by_month.is_empty() {
        writeln!(io.out, "No data available for visualization!")?;
        return Ok(());
    }

    writeln!(io.out, "\n--- Data Visualization ---")?;
    writeln!(io.out, "1. Category Pie Chart")?;
    writeln!(io.out, "2. Monthly Spending Trend")?;
    writeln!(io.out, "3. Back to Main Menu")?;
    let choice = io.ask_or_blank("Choose visualization (1-3): ")?;

    match choice.trim() {
        "1" => {
            let slices = pie_slices(&by_category);
            if slices.is_empty() {
                writeln!(
                    io.out,
                    "Nothing to chart: no category has a positive total."
                )?;
            } else {
                charts.pie(&slices)?;
            }
        }
        "2" => charts.line(&by_month)?,
        "3" => {}
        _ => writeln!(io.out, "Invalid choice!")?,
    }
    Ok(())
}

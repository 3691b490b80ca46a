// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Store;
use crate::report::{BreakdownRow, Period, percentage_breakdown};
use crate::repo;
use crate::shell::Console;
use crate::utils::{align_right, fmt_money, fmt_percent, pretty_table};
use anyhow::Result;
use chrono::{Datelike, Local};
use comfy_table::Table;
use std::io::{BufRead, Write};

fn breakdown_table(rows: &[BreakdownRow], total: Option<f64>) -> Table {
    let mut data: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.category.clone(),
                fmt_money(r.amount),
                fmt_percent(r.percent),
            ]
        })
        .collect();
    if let Some(t) = total {
        data.push(vec!["TOTAL".into(), fmt_money(t), String::new()]);
    }
    let mut table = pretty_table(&["Category", "Amount", "Share"], data);
    align_right(&mut table, &[1, 2]);
    table
}

pub fn category_summary<R: BufRead, W: Write>(
    store: &Store,
    io: &mut Console<R, W>,
) -> Result<()> {
    writeln!(io.out, "\n--- Spending by Category ---")?;
    let totals = store.with_conn(repo::sum_by_category)?;
    if totals.is_empty() {
        writeln!(io.out, "No expenses found!")?;
        return Ok(());
    }
    let total: f64 = totals.iter().map(|c| c.total).sum();
    let rows = percentage_breakdown(total, &totals);
    writeln!(io.out, "{}", breakdown_table(&rows, Some(total)))?;
    Ok(())
}

pub fn monthly<R: BufRead, W: Write>(store: &Store, io: &mut Console<R, W>) -> Result<()> {
    writeln!(io.out, "\n--- Monthly Spending Report ---")?;
    let now = Local::now().date_naive();
    let year = io.ask_or_blank(&format!(
        "Enter year for report [default: {}]: ",
        now.year()
    ))?;
    let month = io.ask_or_blank("Enter month (01-12) [default: current month]: ")?;
    let period = Period::parse(&year, &month)?;
    let month_name = period.month_name()?;

    let summary = store.with_conn(|conn| repo::sum_by_period(conn, &period.year, &period.month))?;

    writeln!(io.out, "\nMonthly Report for {} {}", month_name, period.year)?;
    writeln!(io.out, "{}", "=".repeat(40))?;
    writeln!(io.out, "Total Spending: {}", fmt_money(summary.total))?;
    if summary.breakdown.is_empty() {
        writeln!(io.out, "No expenses recorded for this period.")?;
        return Ok(());
    }
    writeln!(io.out, "\nBreakdown by Category:")?;
    let rows = percentage_breakdown(summary.total, &summary.breakdown);
    writeln!(io.out, "{}", breakdown_table(&rows, None))?;
    Ok(())
}

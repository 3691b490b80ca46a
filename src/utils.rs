// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};

pub fn parse_amount(s: &str) -> Result<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LedgerError::InvalidAmount(s.to_string()).into()),
    }
}

pub fn parse_id(s: &str) -> Result<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .map_err(|_| LedgerError::InvalidId(s.to_string()).into())
}

/// Trims a category and rejects the empty string.
pub fn parse_category(s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(LedgerError::EmptyCategory.into());
    }
    Ok(s.to_string())
}

/// Two-decimal dollars. The sign is decided after rounding, so tiny
/// negatives show as `$0.00`.
pub fn fmt_money(v: f64) -> String {
    let cents = format!("{:.2}", v.abs());
    if v < 0.0 && cents != "0.00" {
        format!("-${}", cents)
    } else {
        format!("${}", cents)
    }
}

pub fn fmt_percent(p: f64) -> String {
    format!("{:.1}%", p)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Right-aligns the given columns, for amounts and percentages.
pub fn align_right(table: &mut Table, columns: &[usize]) {
    for &i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

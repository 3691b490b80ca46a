// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::CategoryTotal;
use anyhow::Result;
use chrono::{Datelike, Local, Month};
use serde::Serialize;

/// A (year, month) pair in the text form the storage layer compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub year: String,  // YYYY
    pub month: String, // MM
}

impl Period {
    /// Parses user input, falling back to the current year or month when the
    /// corresponding input is blank.
    pub fn parse(year: &str, month: &str) -> Result<Self> {
        let today = Local::now().date_naive();
        let year = match year.trim() {
            "" => format!("{:04}", today.year()),
            y => parse_year(y)?,
        };
        let month = match month.trim() {
            "" => format!("{:02}", today.month()),
            m => parse_month(m)?,
        };
        Ok(Self { year, month })
    }

    pub fn month_name(&self) -> Result<&'static str> {
        month_name(&self.month)
    }
}

pub fn parse_year(s: &str) -> Result<String> {
    match s.parse::<u32>() {
        Ok(y) if (1..=9999).contains(&y) => Ok(format!("{:04}", y)),
        _ => Err(LedgerError::InvalidYear(s.to_string()).into()),
    }
}

/// Accepts `1`..`12` with or without a leading zero.
pub fn parse_month(s: &str) -> Result<String> {
    match s.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) && s.len() <= 2 => Ok(format!("{:02}", m)),
        _ => Err(LedgerError::InvalidMonth(s.to_string()).into()),
    }
}

/// Full English name for a two-digit month string, e.g. `"03"` -> `"March"`.
pub fn month_name(month: &str) -> Result<&'static str> {
    let m: u8 = month
        .parse()
        .map_err(|_| LedgerError::InvalidMonth(month.to_string()))?;
    let m = Month::try_from(m).map_err(|_| LedgerError::InvalidMonth(month.to_string()))?;
    Ok(m.name())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub category: String,
    pub amount: f64,
    pub percent: f64,
}

/// Annotates each category total with its share of `total`. A zero or
/// negative total gives 0% everywhere.
pub fn percentage_breakdown(total: f64, totals: &[CategoryTotal]) -> Vec<BreakdownRow> {
    totals
        .iter()
        .map(|c| BreakdownRow {
            category: c.category.clone(),
            amount: c.total,
            percent: if total > 0.0 {
                c.total / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reads and writes against the `expenses` table.
//!
//! Categories are grouped by exact string match, so "Food", "food" and
//! "Food " are three different categories.

use crate::models::{
    CategoryTotal, DeleteOutcome, Expense, ExpenseUpdate, MonthTotal, NewExpense, PeriodSummary,
    UpdateOutcome,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter, types::Value};
use tracing::debug;

const SELECT_EXPENSE: &str = "SELECT id, date, amount, category, description FROM expenses";

fn row_to_expense(r: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: r.get(0)?,
        date: r.get(1)?,
        amount: r.get(2)?,
        category: r.get(3)?,
        description: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// Inserts an expense stamped with today's local date and returns its id.
pub fn add(conn: &Connection, new: &NewExpense) -> Result<i64> {
    add_dated(conn, Local::now().date_naive(), new)
}

pub fn add_dated(conn: &Connection, date: NaiveDate, new: &NewExpense) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses(date, amount, category, description) VALUES (?1, ?2, ?3, ?4)",
        params![date, new.amount, new.category, new.description],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, %date, amount = new.amount, category = %new.category, "expense added");
    Ok(id)
}

/// All expenses, newest date first.
pub fn list_all(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!("{SELECT_EXPENSE} ORDER BY date DESC, id DESC"))?;
    let rows = stmt.query_map([], row_to_expense)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// All expenses oldest first, the order exports are written in.
pub fn list_chronological(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!("{SELECT_EXPENSE} ORDER BY date, id"))?;
    let rows = stmt.query_map([], row_to_expense)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Expense>> {
    let e = conn
        .query_row(
            &format!("{SELECT_EXPENSE} WHERE id=?1"),
            params![id],
            row_to_expense,
        )
        .optional()?;
    Ok(e)
}

/// Applies only the fields present in `changes`. An unknown id is reported as
/// `NotFound` even when `changes` is empty.
pub fn update(conn: &Connection, id: i64, changes: &ExpenseUpdate) -> Result<UpdateOutcome> {
    let exists: Option<i64> = conn
        .query_row("SELECT id FROM expenses WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    if exists.is_none() {
        return Ok(UpdateOutcome::NotFound);
    }
    if changes.is_empty() {
        return Ok(UpdateOutcome::NoChanges);
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(amount) = changes.amount {
        sets.push("amount = ?");
        values.push(Value::Real(amount));
    }
    if let Some(category) = &changes.category {
        sets.push("category = ?");
        values.push(Value::Text(category.clone()));
    }
    if let Some(description) = &changes.description {
        sets.push("description = ?");
        values.push(Value::Text(description.clone()));
    }
    values.push(Value::Integer(id));

    let sql = format!("UPDATE expenses SET {} WHERE id = ?", sets.join(", "));
    let n = conn.execute(&sql, params_from_iter(values))?;
    debug!(id, fields = sets.len(), "expense updated");
    Ok(if n > 0 {
        UpdateOutcome::Updated
    } else {
        UpdateOutcome::NotFound
    })
}

/// Deletes unconditionally; confirmation is the caller's job.
pub fn delete(conn: &Connection, id: i64) -> Result<DeleteOutcome> {
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    debug!(id, removed = n, "expense delete");
    Ok(if n > 0 {
        DeleteOutcome::Removed
    } else {
        DeleteOutcome::NotFound
    })
}

/// Totals per category over all time, largest first, ties by name.
pub fn sum_by_category(conn: &Connection) -> Result<Vec<CategoryTotal>> {
    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount) AS total
         FROM expenses
         GROUP BY category
         ORDER BY total DESC, category ASC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(CategoryTotal {
            category: r.get(0)?,
            total: r.get(1)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// Total and per-category breakdown for one month. `year` is four digits and
/// `month` two, matching what `strftime` yields on the stored dates.
pub fn sum_by_period(conn: &Connection, year: &str, month: &str) -> Result<PeriodSummary> {
    let total: Option<f64> = conn.query_row(
        "SELECT SUM(amount) FROM expenses
         WHERE strftime('%Y', date) = ?1 AND strftime('%m', date) = ?2",
        params![year, month],
        |r| r.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount) AS total
         FROM expenses
         WHERE strftime('%Y', date) = ?1 AND strftime('%m', date) = ?2
         GROUP BY category
         ORDER BY total DESC, category ASC",
    )?;
    let rows = stmt.query_map(params![year, month], |r| {
        Ok(CategoryTotal {
            category: r.get(0)?,
            total: r.get(1)?,
        })
    })?;
    let mut breakdown = Vec::new();
    for row in rows {
        breakdown.push(row?);
    }
    Ok(PeriodSummary {
        total: total.unwrap_or(0.0),
        breakdown,
    })
}

/// One total per calendar month that has records, oldest first.
pub fn monthly_totals(conn: &Connection) -> Result<Vec<MonthTotal>> {
    let mut stmt = conn.prepare(
        "SELECT strftime('%Y-%m', date) AS month, SUM(amount)
         FROM expenses
         GROUP BY month
         ORDER BY month",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(MonthTotal {
            month: r.get(0)?,
            total: r.get(1)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// Number of stored expenses.
pub fn count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?)
}

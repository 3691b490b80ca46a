// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Store;
use crate::models::{DeleteOutcome, Expense, ExpenseUpdate, NewExpense, UpdateOutcome};
use crate::repo;
use crate::shell::Console;
use crate::utils::{align_right, fmt_money, parse_amount, parse_category, parse_id, pretty_table};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

pub fn add<R: BufRead, W: Write>(store: &Store, io: &mut Console<R, W>) -> Result<()> {
    writeln!(io.out, "\n--- Add New Expense ---")?;
    let amount = parse_amount(&io.ask_or_blank("Enter amount: $")?)?;
    let category = parse_category(
        &io.ask_or_blank("Enter category (e.g., Food, Transport, Entertainment): ")?,
    )?;
    let description = io.ask_or_blank("Enter description: ")?.trim().to_string();

    let new = NewExpense {
        amount,
        category,
        description,
    };
    let id = store.with_conn(|conn| repo::add(conn, &new))?;
    info!(id, "expense recorded");
    writeln!(io.out, "Expense #{} added successfully!", id)?;
    Ok(())
}

pub fn list<R: BufRead, W: Write>(store: &Store, io: &mut Console<R, W>) -> Result<()> {
    writeln!(io.out, "\n--- All Expenses ---")?;
    let data = store.with_conn(repo::list_all)?;
    write_listing(&mut io.out, &data)
}

/// Aligned table of expenses with a closing TOTAL row.
pub fn write_listing<W: Write>(out: &mut W, data: &[Expense]) -> Result<()> {
    if data.is_empty() {
        writeln!(out, "No expenses found!")?;
        return Ok(());
    }
    let mut rows: Vec<Vec<String>> = data
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.to_string(),
                fmt_money(e.amount),
                e.category.clone(),
                e.description.clone(),
            ]
        })
        .collect();
    let total: f64 = data.iter().map(|e| e.amount).sum();
    rows.push(vec![
        "TOTAL".into(),
        String::new(),
        fmt_money(total),
        String::new(),
        String::new(),
    ]);
    let mut table = pretty_table(&["ID", "Date", "Amount", "Category", "Description"], rows);
    align_right(&mut table, &[2]);
    writeln!(out, "{}", table)?;
    Ok(())
}

pub fn edit<R: BufRead, W: Write>(store: &Store, io: &mut Console<R, W>) -> Result<()> {
    writeln!(io.out, "\n--- Edit Expense ---")?;
    list(store, io)?;

    let Some(raw) = io.ask("\nEnter the ID of the expense you want to edit: ")? else {
        return Ok(());
    };
    let id = parse_id(&raw)?;
    let Some(current) = store.with_conn(|conn| repo::get(conn, id))? else {
        writeln!(io.out, "Expense ID not found!")?;
        return Ok(());
    };

    writeln!(
        io.out,
        "\nEditing expense #{}: {} {} {} {}",
        current.id,
        current.date,
        fmt_money(current.amount),
        current.category,
        current.description
    )?;
    writeln!(io.out, "\nLeave blank to keep current value:")?;
    let amount = io.ask_or_blank(&format!(
        "New amount [current: {}]: ",
        fmt_money(current.amount)
    ))?;
    let category = io.ask_or_blank(&format!("New category [current: {}]: ", current.category))?;
    let description = io.ask_or_blank(&format!(
        "New description [current: {}]: ",
        current.description
    ))?;

    // A bad amount aborts before anything is written.
    let changes = ExpenseUpdate {
        amount: match amount.trim() {
            "" => None,
            a => Some(parse_amount(a)?),
        },
        category: non_blank(&category),
        description: non_blank(&description),
    };

    match store.with_conn(|conn| repo::update(conn, id, &changes))? {
        UpdateOutcome::Updated => {
            info!(id, "expense edited");
            writeln!(io.out, "Expense updated successfully!")?;
        }
        UpdateOutcome::NoChanges => writeln!(io.out, "No changes made.")?,
        UpdateOutcome::NotFound => writeln!(io.out, "Expense ID not found!")?,
    }
    Ok(())
}

fn non_blank(s: &str) -> Option<String> {
    match s.trim() {
        "" => None,
        t => Some(t.to_string()),
    }
}

pub fn delete<R: BufRead, W: Write>(store: &Store, io: &mut Console<R, W>) -> Result<()> {
    writeln!(io.out, "\n--- Delete Expense ---")?;
    list(store, io)?;

    let Some(raw) = io.ask("\nEnter the ID of the expense you want to delete: ")? else {
        return Ok(());
    };
    let id = parse_id(&raw)?;
    let confirm = io.ask_or_blank("Are you sure you want to delete this expense? (y/n): ")?;
    if !confirm.trim().eq_ignore_ascii_case("y") {
        writeln!(io.out, "Deletion cancelled.")?;
        return Ok(());
    }

    match store.with_conn(|conn| repo::delete(conn, id))? {
        DeleteOutcome::Removed => {
            info!(id, "expense deleted");
            writeln!(io.out, "Expense deleted successfully!")?;
        }
        DeleteOutcome::NotFound => writeln!(io.out, "Expense ID not found!")?,
    }
    Ok(())
}

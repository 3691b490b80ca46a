// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;
use tally::charts::{ChartRenderer, PieSlice};
use tally::db::Store;
use tally::models::{MonthTotal, NewExpense};
use tally::repo;
use tally::shell::{Console, Shell};
use tempfile::{TempDir, tempdir};

#[derive(Default)]
struct Drawn {
    pies: Vec<Vec<PieSlice>>,
    lines: Vec<Vec<MonthTotal>>,
}

struct Recorder(Rc<RefCell<Drawn>>);

impl ChartRenderer for Recorder {
    fn pie(&mut self, slices: &[PieSlice]) -> Result<()> {
        self.0.borrow_mut().pies.push(slices.to_vec());
        Ok(())
    }

    fn line(&mut self, months: &[MonthTotal]) -> Result<()> {
        self.0.borrow_mut().lines.push(months.to_vec());
        Ok(())
    }
}

fn store() -> (TempDir, Store) {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("expenses.db")).unwrap();
    (dir, store)
}

fn seed(store: &Store, date: &str, amount: f64, category: &str, description: &str) -> i64 {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    store
        .with_conn(|conn| {
            repo::add_dated(
                conn,
                date,
                &NewExpense {
                    amount,
                    category: category.into(),
                    description: description.into(),
                },
            )
        })
        .unwrap()
}

fn run_with(store: &Store, input: &str) -> (String, Rc<RefCell<Drawn>>) {
    let drawn = Rc::new(RefCell::new(Drawn::default()));
    let console = Console::new(Cursor::new(input.to_string()), Vec::new());
    let mut shell = Shell::new(
        store.clone(),
        console,
        Box::new(Recorder(Rc::clone(&drawn))),
    );
    shell.run().unwrap();
    let out = String::from_utf8(shell.into_console().out).unwrap();
    (out, drawn)
}

#[test]
fn add_reports_new_id_and_lists_it() {
    let (_dir, store) = store();
    let (out, _) = run_with(&store, "1\n12.50\nFood\nLunch\n2\n8\n");
    assert!(out.contains("Expense #1 added successfully!"));
    assert!(out.contains("Lunch"));
    assert!(out.contains("$12.50"));
    assert!(out.contains("TOTAL"));
    assert!(out.contains("Goodbye"));
}

#[test]
fn bad_amount_aborts_add_and_returns_to_menu() {
    let (_dir, store) = store();
    let (out, _) = run_with(&store, "1\nabc\n8\n");
    assert!(out.contains("Invalid amount 'abc'! Please enter a number."));
    assert!(out.contains("Goodbye"));
    assert_eq!(store.with_conn(repo::count).unwrap(), 0);
}

#[test]
fn blank_category_is_rejected() {
    let (_dir, store) = store();
    let (out, _) = run_with(&store, "1\n5\n   \n8\n");
    assert!(out.contains("Category cannot be empty"));
    assert_eq!(store.with_conn(repo::count).unwrap(), 0);
}

#[test]
fn empty_listing_has_its_own_message() {
    let (_dir, store) = store();
    let (out, _) = run_with(&store, "2\n5\n8\n");
    assert_eq!(out.matches("No expenses found!").count(), 2);
}

#[test]
fn edit_changes_only_supplied_fields() {
    let (_dir, store) = store();
    let id = seed(&store, "2025-05-01", 40.0, "Food", "Dinner");
    let (out, _) = run_with(&store, &format!("3\n{id}\n\nTravel\n\n8\n"));
    assert!(out.contains("Expense updated successfully!"));
    let e = store.with_conn(|c| repo::get(c, id)).unwrap().unwrap();
    assert_eq!(e.amount, 40.0);
    assert_eq!(e.category, "Travel");
    assert_eq!(e.description, "Dinner");
}

#[test]
fn edit_with_all_blanks_makes_no_changes() {
    let (_dir, store) = store();
    let id = seed(&store, "2025-05-01", 40.0, "Food", "Dinner");
    let (out, _) = run_with(&store, &format!("3\n{id}\n\n\n\n8\n"));
    assert!(out.contains("No changes made."));
}

#[test]
fn edit_with_bad_amount_writes_nothing() {
    let (_dir, store) = store();
    let id = seed(&store, "2025-05-01", 40.0, "Food", "Dinner");
    let (out, _) = run_with(&store, &format!("3\n{id}\nten\nTravel\n\n8\n"));
    assert!(out.contains("Invalid amount 'ten'"));
    let e = store.with_conn(|c| repo::get(c, id)).unwrap().unwrap();
    assert_eq!(e.category, "Food");
}

#[test]
fn edit_unknown_and_malformed_ids() {
    let (_dir, store) = store();
    seed(&store, "2025-05-01", 40.0, "Food", "Dinner");
    let (out, _) = run_with(&store, "3\n99\n3\nxyz\n8\n");
    assert!(out.contains("Expense ID not found!"));
    assert!(out.contains("Please enter a valid ID number."));
}

#[test]
fn delete_needs_confirmation() {
    let (_dir, store) = store();
    let id = seed(&store, "2025-05-01", 40.0, "Food", "Dinner");

    let (out, _) = run_with(&store, &format!("4\n{id}\nn\n8\n"));
    assert!(out.contains("Deletion cancelled."));
    assert_eq!(store.with_conn(repo::count).unwrap(), 1);

    let (out, _) = run_with(&store, &format!("4\n{id}\ny\n4\n{id}\ny\n8\n"));
    assert!(out.contains("Expense deleted successfully!"));
    assert!(out.contains("Expense ID not found!"));
    assert_eq!(store.with_conn(repo::count).unwrap(), 0);
}

#[test]
fn category_summary_with_totals() {
    let (_dir, store) = store();
    seed(&store, "2025-01-01", 10.0, "Food", "");
    seed(&store, "2025-01-02", 5.0, "Food", "");
    seed(&store, "2025-01-03", 7.0, "Transport", "");
    let (out, _) = run_with(&store, "5\n8\n");
    assert!(out.contains("Spending by Category"));
    assert!(out.contains("$15.00"));
    assert!(out.contains("$7.00"));
    assert!(out.contains("$22.00"));
    let food = out.find("Food").unwrap();
    let transport = out.find("Transport").unwrap();
    assert!(food < transport);
}

#[test]
fn monthly_report_for_given_period() {
    let (_dir, store) = store();
    seed(&store, "2025-03-02", 20.0, "Food", "");
    seed(&store, "2025-03-10", 30.0, "Food", "");
    seed(&store, "2025-03-20", 50.0, "Bills", "");
    let (out, _) = run_with(&store, "6\n2025\n03\n8\n");
    assert!(out.contains("Monthly Report for March 2025"));
    assert!(out.contains("Total Spending: $100.00"));
    assert_eq!(out.matches("50.0%").count(), 2);
    assert!(out.find("Bills").unwrap() < out.rfind("Food").unwrap());
}

#[test]
fn monthly_report_empty_and_invalid() {
    let (_dir, store) = store();
    let (out, _) = run_with(&store, "6\n2020\n1\n6\n2025\n13\n8\n");
    assert!(out.contains("Monthly Report for January 2020"));
    assert!(out.contains("Total Spending: $0.00"));
    assert!(out.contains("No expenses recorded for this period."));
    assert!(out.contains("Invalid month '13', expected 01-12"));
}

#[test]
fn visualize_without_data() {
    let (_dir, store) = store();
    let (out, drawn) = run_with(&store, "7\n8\n");
    assert!(out.contains("No data available for visualization!"));
    assert!(drawn.borrow().pies.is_empty());
}

#[test]
fn visualize_sends_series_to_renderer() {
    let (_dir, store) = store();
    seed(&store, "2025-01-15", 30.0, "Food", "");
    seed(&store, "2025-02-15", 10.0, "Bills", "");
    let (out, drawn) = run_with(&store, "7\n1\n7\n2\n7\n9\n7\n3\n8\n");
    assert!(out.contains("Invalid choice!"));

    let drawn = drawn.borrow();
    assert_eq!(drawn.pies.len(), 1);
    let labels: Vec<&str> = drawn.pies[0].iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Food", "Bills"]);
    assert_eq!(drawn.pies[0][0].percent, 75.0);

    assert_eq!(drawn.lines.len(), 1);
    let months: Vec<&str> = drawn.lines[0].iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2025-01", "2025-02"]);
}

#[test]
fn invalid_choice_and_closed_input() {
    let (_dir, store) = store();
    let (out, _) = run_with(&store, "9\n");
    assert!(out.contains("Invalid choice! Please enter 1-8."));
    assert!(!out.contains("Goodbye"));
}

#[test]
fn non_utf8_answer_is_a_bad_amount_not_a_crash() {
    let (_dir, store) = store();
    let drawn = Rc::new(RefCell::new(Drawn::default()));
    let console = Console::new(Cursor::new(b"1\n\xff\xfe\n8\n".to_vec()), Vec::new());
    let mut shell = Shell::new(store.clone(), console, Box::new(Recorder(drawn)));
    shell.run().unwrap();
    let out = String::from_utf8(shell.into_console().out).unwrap();
    assert!(out.contains("Invalid amount"));
    assert!(out.contains("Goodbye"));
    assert_eq!(store.with_conn(repo::count).unwrap(), 0);
}

#[derive(Clone, Default)]
struct LogBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn user_mistakes_stay_quiet_at_default_log_level() {
    let (_dir, store) = store();
    let logs = LogBuf::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            tally::logging::default_level(0),
        ))
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, || {
        run_with(&store, "9\n1\nabc\n3\nxyz\n8\n").0
    });
    assert!(out.contains("Invalid choice!"));
    assert!(out.contains("Invalid amount 'abc'"));
    assert!(logs.0.lock().unwrap().is_empty());
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::ChartRenderer;
use crate::commands::{expenses, reports, visualize};
use crate::db::Store;
use crate::error::as_user_error;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const MENU: &str = "\
1. Add New Expense
2. View All Expenses
3. Edit Expense
4. Delete Expense
5. View Category Summary
6. Monthly Spending Report
7. Data Visualization
8. Exit";

/// Line-oriented input paired with the output the prompts are written to.
pub struct Console<R, W> {
    input: R,
    pub out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Prints `prompt` and reads one line. `None` means the input is closed.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        // Raw bytes so a non-UTF-8 line turns into an unparseable answer
        // rather than an I/O error.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like `ask`, but a closed input reads as a blank answer.
    pub fn ask_or_blank(&mut self, prompt: &str) -> Result<String> {
        Ok(self.ask(prompt)?.unwrap_or_default())
    }
}

pub struct Shell<R, W> {
    store: Store,
    console: Console<R, W>,
    charts: Box<dyn ChartRenderer>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: Store, console: Console<R, W>, charts: Box<dyn ChartRenderer>) -> Self {
        Self {
            store,
            console,
            charts,
        }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Menu loop. Returns on choice 8 or end of input; user mistakes are
    /// reported and the loop continues, anything else is returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.console.out, "\n{}", "=".repeat(50))?;
            writeln!(self.console.out, "{:^50}", "EXPENSE TRACKER")?;
            writeln!(self.console.out, "{}", "=".repeat(50))?;
            writeln!(self.console.out, "{}", MENU)?;

            let Some(choice) = self.console.ask("\nEnter your choice (1-8): ")? else {
                info!("input closed, leaving shell");
                break;
            };
            let outcome = match choice.trim() {
                "1" => expenses::add(&self.store, &mut self.console),
                "2" => expenses::list(&self.store, &mut self.console),
                "3" => expenses::edit(&self.store, &mut self.console),
                "4" => expenses::delete(&self.store, &mut self.console),
                "5" => reports::category_summary(&self.store, &mut self.console),
                "6" => reports::monthly(&self.store, &mut self.console),
                "7" => visualize::handle(&self.store, &mut self.console, self.charts.as_mut()),
                "8" => {
                    writeln!(
                        self.console.out,
                        "Thank you for using Tally! Goodbye!"
                    )?;
                    break;
                }
                other => {
                    debug!(choice = other, "invalid menu choice");
                    writeln!(self.console.out, "Invalid choice! Please enter 1-8.")?;
                    Ok(())
                }
            };
            if let Err(e) = outcome {
                match as_user_error(&e) {
                    Some(user) => {
                        info!(error = %user, "operation aborted");
                        writeln!(self.console.out, "{}", user)?;
                    }
                    None => return Err(e),
                }
            }
        }
        Ok(())
    }
}

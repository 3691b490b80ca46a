// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Tally", "tally"));

const DB_FILE: &str = "expenses.db";

/// Default location of the ledger file in the platform data dir.
pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(DB_FILE))
}

/// Creates the expenses table if it is missing. Existing rows are untouched.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS expenses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount REAL NOT NULL,
        category TEXT NOT NULL,
        description TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
    "#,
    )
    .context("Failed to create expenses schema")?;
    Ok(())
}

/// Opens the ledger at `path` and makes sure the schema exists.
pub fn open_or_init(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Handle to the ledger file. Holds no connection: every operation opens its
/// own and drops it before returning, so each call sees the latest committed
/// state.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Initialises the schema once and returns a handle for later operations.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        open_or_init(&path)?;
        info!(path = %path.display(), "ledger ready");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        debug!(path = %self.path.display(), "opening connection");
        Connection::open(&self.path)
            .with_context(|| format!("Open DB at {}", self.path.display()))
    }

    /// Runs `f` against a fresh connection. The connection is closed when this
    /// returns, on success and on error alike.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.connect()?;
        f(&conn)
    }
}

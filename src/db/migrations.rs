// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered schema migrations.
//!
//! Scripts are plain `.sql` files applied in filename order on every
//! startup. There is no ledger of already-applied scripts, so every script
//! must be idempotent (`IF NOT EXISTS` guards); scripts are reviewed before
//! deploy.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Apply every `.sql` script in `dir`, in filename order.
///
/// Each script runs as one multi-statement batch. The first read or
/// execution error aborts the run.
pub fn apply_all(conn: &Connection, dir: &Path) -> Result<()> {
    let mut scripts: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read migrations directory: {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("Failed to list migrations directory: {}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            scripts.push(path);
        }
    }
    scripts.sort();

    for path in &scripts {
        let sql = fs::read_to_string(path)
            .with_context(|| format!("Failed to read migration: {}", path.display()))?;
        conn.execute_batch(&sql)
            .with_context(|| format!("Migration failed: {}", path.display()))?;
        tracing::info!(file = %path.display(), "Applied migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_applies_in_filename_order() {
        let dir = tempfile::tempdir().unwrap();
        // The second script only works if the first ran before it.
        fs::write(
            dir.path().join("0001_table.sql"),
            "CREATE TABLE IF NOT EXISTS items (id INTEGER PRIMARY KEY);",
        )
        .unwrap();
        fs::write(
            dir.path().join("0002_seed.sql"),
            "INSERT INTO items (id) VALUES (1);",
        )
        .unwrap();

        let conn = memory_conn();
        apply_all(&conn, dir.path()).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_shipped_migrations_are_idempotent() {
        let conn = memory_conn();
        let dir = Path::new("migrations");

        apply_all(&conn, dir).unwrap();
        apply_all(&conn, dir).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_fails_fast_on_bad_script() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0001_bad.sql"), "NOT VALID SQL;").unwrap();
        fs::write(
            dir.path().join("0002_good.sql"),
            "CREATE TABLE IF NOT EXISTS items (id INTEGER PRIMARY KEY);",
        )
        .unwrap();

        let conn = memory_conn();
        let err = apply_all(&conn, dir.path()).unwrap_err();
        assert!(err.to_string().contains("0001_bad.sql"));

        // Nothing after the failing script ran.
        let later: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'items'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(later, 0);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let conn = memory_conn();
        assert!(apply_all(&conn, Path::new("does/not/exist")).is_err());
    }

    #[test]
    fn test_non_sql_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "not sql").unwrap();

        let conn = memory_conn();
        apply_all(&conn, dir.path()).unwrap();
    }
}

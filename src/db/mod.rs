// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (SQLite).
//!
//! A single connection is opened at startup and shared behind a mutex for
//! the lifetime of the process. All access goes through parameterized
//! statements; SQLite's 0/1 integer columns are coerced to booleans at the
//! row-mapping seam.

pub mod migrations;

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::models::{Activity, ActivityCounts, ActivityDraft};

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (creating if needed) the database file.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create DB directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite DB: {}", path.display()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Apply the ordered migration scripts in `dir`.
    pub fn migrate(&self, dir: &Path) -> anyhow::Result<()> {
        migrations::apply_all(&self.lock_conn(), dir)
    }

    /// Close the connection. Called once at shutdown.
    pub fn close(self) -> anyhow::Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| anyhow::anyhow!("database mutex poisoned"))?;
        conn.close()
            .map_err(|(_, err)| err)
            .context("Failed to close database connection")
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Pick one active activity uniformly at random.
    pub fn random_active(&self) -> Result<Option<Activity>> {
        let conn = self.lock_conn();
        let activity = conn
            .query_row(
                "SELECT id, name, description, repeatable, endDate, selected
                 FROM activities
                 WHERE endDate IS NULL
                 ORDER BY RANDOM()
                 LIMIT 1",
                [],
                row_to_activity,
            )
            .optional()?;

        Ok(activity)
    }

    /// All completed activities, most recently completed first.
    pub fn history(&self) -> Result<Vec<Activity>> {
        let conn = self.lock_conn();
        let mut statement = conn.prepare(
            "SELECT id, name, description, repeatable, endDate, selected
             FROM activities
             WHERE endDate IS NOT NULL
             ORDER BY endDate DESC",
        )?;

        let rows = statement
            .query_map([], row_to_activity)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn counts(&self) -> Result<ActivityCounts> {
        let conn = self.lock_conn();
        let counts = conn.query_row(
            "SELECT COUNT(*),
                    COUNT(CASE WHEN endDate IS NULL THEN 1 END),
                    COUNT(endDate)
             FROM activities",
            [],
            |row| {
                Ok(ActivityCounts {
                    total: row.get(0)?,
                    active: row.get(1)?,
                    done: row.get(2)?,
                })
            },
        )?;

        Ok(counts)
    }

    pub fn find(&self, id: i64) -> Result<Option<Activity>> {
        let conn = self.lock_conn();
        let activity = conn
            .query_row(
                "SELECT id, name, description, repeatable, endDate, selected
                 FROM activities
                 WHERE id = ?1",
                params![id],
                row_to_activity,
            )
            .optional()?;

        Ok(activity)
    }

    /// The activity currently flagged as selected, if any.
    pub fn selected(&self) -> Result<Option<Activity>> {
        let conn = self.lock_conn();
        let activity = conn
            .query_row(
                "SELECT id, name, description, repeatable, endDate, selected
                 FROM activities
                 WHERE selected = 1
                 LIMIT 1",
                [],
                row_to_activity,
            )
            .optional()?;

        Ok(activity)
    }

    /// Complete an activity. Completed activities drop out of the random
    /// and selected queries.
    pub fn mark_done(&self, id: i64, completed_at: DateTime<Utc>) -> Result<()> {
        let conn = self.lock_conn();
        conn.execute(
            "UPDATE activities SET endDate = ?1, selected = 0 WHERE id = ?2",
            params![completed_at, id],
        )?;

        Ok(())
    }

    /// Flag one activity as selected and every other as not.
    ///
    /// A single statement, so the at-most-one invariant holds without a
    /// transaction.
    pub fn select(&self, id: i64) -> Result<()> {
        let conn = self.lock_conn();
        conn.execute(
            "UPDATE activities SET selected = CASE WHEN id = ?1 THEN 1 ELSE 0 END",
            params![id],
        )?;

        Ok(())
    }

    pub fn insert(&self, draft: ActivityDraft<'_>) -> Result<()> {
        let conn = self.lock_conn();
        conn.execute(
            "INSERT INTO activities (name, description, repeatable) VALUES (?1, ?2, ?3)",
            params![draft.name, draft.description, draft.repeatable],
        )?;

        Ok(())
    }

    /// Complete an activity and insert a fresh copy of it, atomically.
    ///
    /// The copy keeps the name, description, and repeatable flag; it gets a
    /// new id, no end date, and is not selected. Returns `false` when the
    /// id does not exist.
    pub fn repeat(&self, id: i64, completed_at: DateTime<Utc>) -> Result<bool> {
        let mut conn = self.lock_conn();
        let tx = conn.transaction()?;

        let activity = tx
            .query_row(
                "SELECT id, name, description, repeatable, endDate, selected
                 FROM activities
                 WHERE id = ?1",
                params![id],
                row_to_activity,
            )
            .optional()?;

        let Some(activity) = activity else {
            return Ok(false);
        };

        tx.execute(
            "UPDATE activities SET endDate = ?1, selected = 0 WHERE id = ?2",
            params![completed_at, id],
        )?;
        tx.execute(
            "INSERT INTO activities (name, description, repeatable) VALUES (?1, ?2, ?3)",
            params![activity.name, activity.description, activity.repeatable],
        )?;

        tx.commit()?;
        Ok(true)
    }
}

fn row_to_activity(row: &Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        repeatable: row.get(3)?,
        end_date: row.get(4)?,
        selected: row.get(5)?,
    })
}

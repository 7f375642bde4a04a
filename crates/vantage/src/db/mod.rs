//! `SQLite` storage layer for the topology store.
//!
//! This module manages the `SQLite` database holding services, dependency
//! edges, and alert incidents. `SQLite` is the source of truth for all
//! persistent data; the graph pipeline only ever reads it through the
//! [`TopologyReader`](crate::graph::TopologyReader) surface implemented in
//! the `graph` submodule here.
//!
//! ## Module Structure
//!
//! - `schema` - Database schema (DDL)
//! - `helpers` - Row conversion and parsing utilities
//! - `select` - Structured WHERE-clause / parameter builder
//! - `services` - Service write operations
//! - `dependencies` - Service-dependency write operations and full listing
//! - `namespaces` - Namespace-dependency write operations and full listing
//! - `alerts` - Alert incident write operations
//! - `graph` - The read-only query surface used by the graph pipeline

mod alerts;
mod dependencies;
mod graph;
mod helpers;
mod namespaces;
mod schema;
mod select;
mod services;

pub(crate) use schema::SCHEMA;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;

use crate::error::{Error, Result};

/// `SQLite` database wrapper for the topology store.
///
/// The connection is wrapped in a `Mutex` so concurrent graph builds can
/// share one store; every build acquires the lock per query. The path is
/// retained for diagnostics (in-memory stores report `:memory:`).
pub struct Store {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl Store {
    /// Open or create the topology database at `path`.
    ///
    /// Enables WAL journaling and foreign keys, and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the parent directory cannot be created, or
    /// [`Error::Database`] if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        conn.execute_batch(SCHEMA)?;

        tracing::debug!(path = %path.display(), "Opened topology store");

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_path_buf(),
        })
    }

    /// Create an ephemeral in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the in-memory database cannot be
    /// created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: PathBuf::from(":memory:"),
        })
    }

    /// Path the store was opened at (`:memory:` for ephemeral stores).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the connection lock.
    ///
    /// Returns a `MutexGuard` providing exclusive access to the underlying
    /// connection. Used internally by all database operations.
    pub(crate) fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            Error::Internal(format!(
                "store connection mutex poisoned (a thread panicked while holding the lock): {e}"
            ))
        })
    }

    /// Row counts across the store's tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if any count query fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.connection()?;
        let count = |sql: &str| -> Result<u64> {
            let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
            // Row counts are non-negative
            #[allow(clippy::cast_sign_loss)]
            let n = n as u64;
            Ok(n)
        };

        Ok(StoreStats {
            services: count("SELECT COUNT(*) FROM services")?,
            service_dependencies: count("SELECT COUNT(*) FROM service_deps")?,
            namespace_dependencies: count("SELECT COUNT(*) FROM namespace_deps")?,
            firing_alerts: count("SELECT COUNT(*) FROM alerts WHERE status = 'firing'")?,
        })
    }
}

/// Row counts for the store's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Number of known services.
    pub services: u64,
    /// Number of service-dependency edges.
    pub service_dependencies: u64,
    /// Number of namespace-dependency edges.
    pub namespace_dependencies: u64,
    /// Number of currently firing alerts.
    pub firing_alerts: u64,
}

//! Alert incident write operations.
//!
//! Lifecycle transitions live here on the write surface; the graph pipeline
//! only ever reads firing incidents.

use chrono::{DateTime, Utc};
use rusqlite::params;

use super::Store;
use super::helpers;
use crate::error::Result;
use crate::types::AlertIncident;

impl Store {
    /// Record an alert incident, returning its row id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the write fails.
    pub fn record_alert(&self, alert: &AlertIncident) -> Result<i64> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO alerts (
                service_namespace, service_name, severity, status,
                instance, message, started_at, resolved_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                alert.service.namespace,
                alert.service.name,
                alert.severity.as_str(),
                alert.status.as_str(),
                alert.instance,
                alert.message,
                helpers::to_timestamp(&alert.started_at),
                alert.resolved_at.as_ref().map(helpers::to_timestamp),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Mark an alert as resolved at the given time.
    ///
    /// Returns `true` if a firing alert was transitioned, `false` if the id
    /// was unknown or already resolved.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the write fails.
    pub fn resolve_alert(&self, id: i64, resolved_at: DateTime<Utc>) -> Result<bool> {
        let conn = self.connection()?;
        let changed = conn.execute(
            "UPDATE alerts SET status = 'resolved', resolved_at = ?2
             WHERE id = ?1 AND status = 'firing'",
            params![id, helpers::to_timestamp(&resolved_at)],
        )?;
        Ok(changed > 0)
    }
}

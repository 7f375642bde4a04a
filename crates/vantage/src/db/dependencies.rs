//! Service-dependency write operations and full-edge listing.

use rusqlite::params;

use super::Store;
use super::helpers::{self, SERVICE_DEPS_COLUMNS};
use crate::error::Result;
use crate::types::ServiceDependency;

impl Store {
    /// Record a directed dependency edge, refreshing `last_seen` if the edge
    /// already exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the write fails.
    pub fn record_dependency(&self, dep: &ServiceDependency) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO service_deps (
                from_namespace, from_name, to_namespace, to_name, last_seen
             ) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(from_namespace, from_name, to_namespace, to_name)
             DO UPDATE SET last_seen = excluded.last_seen",
            params![
                dep.from_namespace,
                dep.from_name,
                dep.to_namespace,
                dep.to_name,
                helpers::to_timestamp(&dep.last_seen),
            ],
        )?;
        Ok(())
    }

    /// List every service-dependency edge in the store.
    ///
    /// The full-chain closure engine builds its adjacency structure from
    /// this complete edge set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the query fails.
    pub fn all_dependencies(&self) -> Result<Vec<ServiceDependency>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SERVICE_DEPS_COLUMNS} FROM service_deps"
        ))?;
        let deps = stmt
            .query_map([], helpers::row_to_service_dependency)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(deps)
    }
}

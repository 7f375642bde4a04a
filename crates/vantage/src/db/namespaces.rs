//! Namespace-dependency write operations and full listing.
//!
//! Namespace dependencies are static reference data; they change when the
//! deployment topology is re-declared, not per telemetry report.

use rusqlite::params;

use super::Store;
use super::helpers::{self, NAMESPACE_DEPS_COLUMNS};
use crate::error::Result;
use crate::types::NamespaceDependency;

impl Store {
    /// Record a namespace-level dependency edge, replacing its metadata if
    /// the edge already exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the write fails.
    pub fn record_namespace_dependency(&self, dep: &NamespaceDependency) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO namespace_deps (
                from_namespace, to_namespace, dependency_type, description
             ) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(from_namespace, to_namespace) DO UPDATE SET
                dependency_type = excluded.dependency_type,
                description = excluded.description",
            params![
                dep.from_namespace,
                dep.to_namespace,
                dep.dependency_type,
                dep.description,
            ],
        )?;
        Ok(())
    }

    /// List every namespace-dependency edge.
    ///
    /// The set is small and fetched unconditionally per graph build; the
    /// assembler filters it down to emitted namespaces.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the query fails.
    pub fn list_namespace_dependencies(&self) -> Result<Vec<NamespaceDependency>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NAMESPACE_DEPS_COLUMNS} FROM namespace_deps"
        ))?;
        let deps = stmt
            .query_map([], helpers::row_to_namespace_dependency)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(deps)
    }
}

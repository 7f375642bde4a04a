//! Service write operations.
//!
//! Writes belong to the ingestion path; the graph pipeline itself never
//! mutates the store.

use rusqlite::params;

use super::Store;
use super::helpers::{self, SERVICES_COLUMNS};
use crate::error::Result;
use crate::types::{Service, ServiceKey};

impl Store {
    /// Insert a service or update it in place if its natural key exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the write fails.
    pub fn upsert_service(&self, service: &Service) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO services (
                namespace, name, environment, team, component_type,
                tags, tag_sources, external_calls, database_calls, rpc_calls, last_seen
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(namespace, name) DO UPDATE SET
                environment = excluded.environment,
                team = excluded.team,
                component_type = excluded.component_type,
                tags = excluded.tags,
                tag_sources = excluded.tag_sources,
                external_calls = excluded.external_calls,
                database_calls = excluded.database_calls,
                rpc_calls = excluded.rpc_calls,
                last_seen = excluded.last_seen",
            params![
                service.key.namespace,
                service.key.name,
                service.environment,
                service.team,
                service.component_type,
                helpers::to_json_array(&service.tags),
                helpers::to_json_map(&service.tag_sources),
                helpers::to_json_map(&service.external_calls),
                helpers::to_json_map(&service.database_calls),
                helpers::to_json_map(&service.rpc_calls),
                helpers::to_timestamp(&service.last_seen),
            ],
        )?;
        Ok(())
    }

    /// Load a single service by natural key.
    ///
    /// Returns `None` if the service is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the query fails.
    pub fn get_service(&self, key: &ServiceKey) -> Result<Option<Service>> {
        use rusqlite::OptionalExtension;

        let conn = self.connection()?;
        let service = conn
            .query_row(
                &format!("SELECT {SERVICES_COLUMNS} FROM services WHERE namespace = ?1 AND name = ?2"),
                params![key.namespace, key.name],
                helpers::row_to_service,
            )
            .optional()?;
        Ok(service)
    }
}

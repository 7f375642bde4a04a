//! Read-only topology queries implemented directly on [`Store`].
//!
//! This module implements the [`TopologyReader`] trait the graph pipeline
//! consumes, composing its scoped predicates with the structured
//! [`QueryBuilder`] so placeholder indexes can never drift as filters
//! compose.

use rusqlite::{ToSql, params_from_iter};
use std::collections::BTreeSet;

use super::Store;
use super::helpers::{self, ALERTS_COLUMNS, SERVICE_DEPS_COLUMNS, SERVICES_COLUMNS};
use super::select::{QueryBuilder, placeholders};
use crate::error::Result;
use crate::graph::TopologyReader;
use crate::types::{
    AlertIncident, GraphFilters, NamespaceDependency, Service, ServiceDependency, ServiceKey,
    Severity,
};

impl TopologyReader for Store {
    fn namespace_dependencies(&self) -> Result<Vec<NamespaceDependency>> {
        self.list_namespace_dependencies()
    }

    fn service_dependencies(&self) -> Result<Vec<ServiceDependency>> {
        self.all_dependencies()
    }

    fn services_matching(&self, filters: &GraphFilters) -> Result<Vec<Service>> {
        let mut q = QueryBuilder::new();

        if !filters.namespaces.is_empty() {
            q.in_list("services.namespace", filters.namespaces.iter().cloned());
        }

        // Tag overlap is ANY-match: one shared tag is enough.
        if !filters.tags.is_empty() {
            let params: Vec<Box<dyn ToSql>> = filters
                .tags
                .iter()
                .map(|t| Box::new(t.clone()) as Box<dyn ToSql>)
                .collect();
            q.clause(
                format!(
                    "EXISTS (SELECT 1 FROM json_each(services.tags) AS jt \
                     WHERE jt.value IN ({}))",
                    placeholders(params.len())
                ),
                params,
            );
        }

        // Case-insensitive substring match against namespace or name.
        // instr() is used instead of LIKE so wildcard characters in the
        // needle match literally.
        if let Some(search) = &filters.search {
            let needle = search.to_lowercase();
            q.clause(
                "(instr(lower(services.namespace), ?) > 0 \
                 OR instr(lower(services.name), ?) > 0)",
                vec![
                    Box::new(needle.clone()) as Box<dyn ToSql>,
                    Box::new(needle) as Box<dyn ToSql>,
                ],
            );
        }

        let sql = format!(
            "SELECT {SERVICES_COLUMNS} FROM services{} ORDER BY namespace, name",
            q.where_clause()
        );

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let services = stmt
            .query_map(params_from_iter(q.params()), helpers::row_to_service)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            matched = services.len(),
            namespaces = filters.namespaces.len(),
            tags = filters.tags.len(),
            search = filters.search.is_some(),
            "Topology query complete"
        );

        Ok(services)
    }

    fn dependencies_touching(&self, keys: &[ServiceKey]) -> Result<Vec<ServiceDependency>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        // Either endpoint matching pulls the edge in; the far endpoint may
        // lie outside the service result set.
        let mut endpoints = QueryBuilder::new();
        endpoints.key_list("from_namespace", "from_name", keys);
        endpoints.key_list("to_namespace", "to_name", keys);

        let mut q = QueryBuilder::new();
        q.any(endpoints);

        let sql = format!(
            "SELECT {SERVICE_DEPS_COLUMNS} FROM service_deps{}",
            q.where_clause()
        );

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let deps = stmt
            .query_map(
                params_from_iter(q.params()),
                helpers::row_to_service_dependency,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(deps)
    }

    fn firing_alerts(
        &self,
        keys: &[ServiceKey],
        severities: &BTreeSet<Severity>,
    ) -> Result<Vec<AlertIncident>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut q = QueryBuilder::new();
        q.clause("status = 'firing'", Vec::new());
        q.key_list("service_namespace", "service_name", keys);
        if !severities.is_empty() {
            q.in_list("severity", severities.iter().map(|s| s.as_str().to_string()));
        }

        let sql = format!("SELECT {ALERTS_COLUMNS} FROM alerts{}", q.where_clause());

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let alerts = stmt
            .query_map(params_from_iter(q.params()), helpers::row_to_alert)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(alerts)
    }
}

//! # Vantage: Service Topology Store and Dependency Graph Engine
//!
//! Vantage maintains a `SQLite` store of services, dependency edges, and
//! alert incidents, and assembles filtered dependency-graph views for
//! topology dashboards.
//!
//! ## Design Philosophy
//!
//! - **Store, not collector** - Vantage persists and queries topology;
//!   discovery agents feed it
//! - **Views, not state** - every graph build is computed from scratch from
//!   the store; nothing is cached between requests
//! - **Annotate, then filter** - alert severity is overlaid on services
//!   before filters drop anything
//! - **Embeddable** - library first, CLI second
//!
//! ## Quick Start
//!
//! ```no_run
//! use vantage::{GraphQuery, Vantage};
//! use std::path::Path;
//!
//! let vantage = Vantage::open(Path::new("/var/lib/vantage/topology.db"))?;
//!
//! let query = GraphQuery {
//!     namespaces: Some("payments".to_string()),
//!     include_dependents: true,
//!     ..GraphQuery::default()
//! };
//! let graph = vantage.build_graph(&query)?;
//! println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! # Ok::<(), vantage::Error>(())
//! ```

mod db;
mod error;
mod graph;
mod types;

pub use db::{Store, StoreStats};
pub use error::{Error, Result};
pub use graph::{TopologyReader, build_graph};
pub use types::{
    AlertIncident, AlertStatus, EdgeType, GraphEdge, GraphFilters, GraphNode, GraphQuery,
    GraphResponse, NamespaceDependency, NodeType, Service, ServiceDependency, ServiceKey,
    Severity,
};

use std::path::Path;

use chrono::{DateTime, Utc};

/// Service topology store and graph query interface.
///
/// `Vantage` is the main entry point: it owns the backing [`Store`] and
/// exposes the ingestion surface plus [`Vantage::build_graph`]. The store is
/// internally synchronized, so a single instance can serve concurrent graph
/// builds through a shared reference.
pub struct Vantage {
    store: Store,
}

impl Vantage {
    /// Open or create the topology database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the parent directory cannot be created, or
    /// [`Error::Database`] if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            store: Store::open(path)?,
        })
    }

    /// Create an ephemeral in-memory instance. Useful in tests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the in-memory database cannot be
    /// created.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            store: Store::in_memory()?,
        })
    }

    /// Path to the backing `SQLite` database (`:memory:` when ephemeral).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.store.path()
    }

    /// Borrow the backing store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    // === Ingestion ===

    /// Insert or refresh a service record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the write fails.
    pub fn upsert_service(&self, service: &Service) -> Result<()> {
        self.store.upsert_service(service)
    }

    /// Insert or refresh a service-level dependency edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the write fails.
    pub fn record_dependency(&self, dep: &ServiceDependency) -> Result<()> {
        self.store.record_dependency(dep)
    }

    /// Insert or refresh a namespace-level dependency edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the write fails.
    pub fn record_namespace_dependency(&self, dep: &NamespaceDependency) -> Result<()> {
        self.store.record_namespace_dependency(dep)
    }

    /// Record an alert incident; returns its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the write fails.
    pub fn record_alert(&self, alert: &AlertIncident) -> Result<i64> {
        self.store.record_alert(alert)
    }

    /// Mark a firing alert as resolved. Returns `false` if no firing alert
    /// with that id exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the write fails.
    pub fn resolve_alert(&self, id: i64, resolved_at: DateTime<Utc>) -> Result<bool> {
        self.store.resolve_alert(id, resolved_at)
    }

    // === Queries ===

    /// Fetch a single service by key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the query fails.
    pub fn get_service(&self, key: &ServiceKey) -> Result<Option<Service>> {
        self.store.get_service(key)
    }

    /// Row counts across the store's tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if any count query fails.
    pub fn stats(&self) -> Result<StoreStats> {
        self.store.stats()
    }

    /// Build a dependency-graph view for the given raw request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] for malformed filter values, or
    /// [`Error::Database`] if a store query fails.
    pub fn build_graph(&self, query: &GraphQuery) -> Result<GraphResponse> {
        graph::build_graph(&self.store, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topology.db");
        let vantage = Vantage::open(&path).unwrap();

        assert_eq!(vantage.db_path(), path);
        assert!(path.exists());
    }

    #[test]
    fn empty_store_builds_empty_graph() {
        let vantage = Vantage::in_memory().unwrap();
        let graph = vantage.build_graph(&GraphQuery::default()).unwrap();

        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
        assert!(!graph.large_result_warning);
        assert!(graph.expanded_namespaces.is_none());
    }
}

//! Dependency graph assembly pipeline.
//!
//! Turns a raw filter request into a consistent, deduplicated node/edge
//! graph annotated with alert-severity overlays. Stages run strictly in
//! sequence — each depends on the previous stage's output:
//!
//! 1. `filter` — normalize raw input into canonical filters (fail-fast
//!    severity validation)
//! 2. `expand` — one-hop namespace expansion (both directions)
//! 3. `closure` — full-chain BFS closure, re-deriving the namespace filter
//! 4. topology queries via [`TopologyReader`]
//! 5. `correlate` — severity aggregation and the severity-filter drop rule
//! 6. `assemble` — deduplicated node/edge emission
//!
//! A build holds no state beyond its own stack; concurrent builds share only
//! read access to the store.

mod assemble;
mod closure;
mod correlate;
mod expand;
pub(crate) mod filter;

use std::collections::BTreeSet;

use crate::error::Result;
use crate::types::{
    AlertIncident, GraphFilters, GraphQuery, GraphResponse, NamespaceDependency, Service,
    ServiceDependency, ServiceKey, Severity,
};

/// Read-only query surface the pipeline needs from the topology store.
///
/// Implementations must not mutate stored data on behalf of the pipeline;
/// retry/backoff policy belongs to the implementation, not the pipeline (a
/// failed query fails the whole build).
pub trait TopologyReader {
    /// List every namespace-level dependency edge.
    ///
    /// # Errors
    ///
    /// Fails if the underlying store is unavailable.
    fn namespace_dependencies(&self) -> Result<Vec<NamespaceDependency>>;

    /// List every service-level dependency edge (closure engine input).
    ///
    /// # Errors
    ///
    /// Fails if the underlying store is unavailable.
    fn service_dependencies(&self) -> Result<Vec<ServiceDependency>>;

    /// List services matching the canonical filter set (namespace
    /// membership, tag ANY-overlap, case-insensitive substring search),
    /// sorted by `(namespace, name)` for determinism.
    ///
    /// # Errors
    ///
    /// Fails if the underlying store is unavailable.
    fn services_matching(&self, filters: &GraphFilters) -> Result<Vec<Service>>;

    /// List dependency edges where *either* endpoint is in `keys`.
    ///
    /// # Errors
    ///
    /// Fails if the underlying store is unavailable.
    fn dependencies_touching(&self, keys: &[ServiceKey]) -> Result<Vec<ServiceDependency>>;

    /// List firing alerts for `keys`, restricted to `severities` when the
    /// set is non-empty.
    ///
    /// # Errors
    ///
    /// Fails if the underlying store is unavailable.
    fn firing_alerts(
        &self,
        keys: &[ServiceKey],
        severities: &BTreeSet<Severity>,
    ) -> Result<Vec<AlertIncident>>;
}

/// Build a graph view for the given raw request.
///
/// The returned response echoes the canonical filter set after any
/// expansion or closure re-derivation of the namespace filter.
/// `expanded_namespaces` is present only when one-hop expansion actually
/// ran (the flag was set against a non-empty namespace filter).
///
/// # Errors
///
/// - [`crate::Error::InvalidFilter`] if a filter value fails validation.
/// - [`crate::Error::Database`] if any store query fails; the build aborts
///   with no partial graph.
pub fn build_graph(store: &dyn TopologyReader, query: &GraphQuery) -> Result<GraphResponse> {
    let mut filters = filter::normalize(query)?;

    // Namespace-level edges feed both expansion and final assembly.
    let namespace_edges = store.namespace_dependencies()?;

    let mut expanded_namespaces = None;
    if filters.include_dependents && !filters.namespaces.is_empty() {
        let grown = expand::one_hop(&filters.namespaces, &namespace_edges);
        tracing::debug!(
            before = filters.namespaces.len(),
            after = grown.len(),
            "One-hop namespace expansion"
        );
        expanded_namespaces = Some(grown.iter().cloned().collect());
        filters.namespaces = grown;
    }

    let mut large_result_warning = false;
    if filters.show_full_chain {
        let edges = store.service_dependencies()?;
        let chain = closure::full_chain(&edges, &filters.namespaces);
        tracing::debug!(
            services = chain.services.len(),
            namespaces = chain.namespaces.len(),
            "Full-chain closure replaced the namespace filter"
        );
        large_result_warning = chain.large_result;

        // A seeded closure that visited nothing means no service in the
        // filtered namespaces participates in any dependency edge. The
        // empty re-derived set must not degrade into "no filter".
        if chain.namespaces.is_empty() && !filters.namespaces.is_empty() {
            filters.namespaces = chain.namespaces;
            let show_full_chain = filters.show_full_chain;
            return Ok(GraphResponse {
                nodes: Vec::new(),
                edges: Vec::new(),
                filters,
                expanded_namespaces,
                show_full_chain,
                large_result_warning: false,
            });
        }

        // The re-derived namespace set replaces the filter for all
        // downstream stages.
        filters.namespaces = chain.namespaces;
    }

    let services = store.services_matching(&filters)?;
    let keys: Vec<ServiceKey> = services.iter().map(|s| s.key.clone()).collect();

    let dependencies = store.dependencies_touching(&keys)?;
    let alerts = store.firing_alerts(&keys, &filters.severities)?;

    let (surviving, summaries) = correlate::correlate(&services, &alerts, &filters.severities);
    let (nodes, edges) = assemble::assemble(
        &surviving,
        &summaries,
        &dependencies,
        &namespace_edges,
    );

    tracing::info!(
        nodes = nodes.len(),
        edges = edges.len(),
        services = surviving.len(),
        large_result = large_result_warning,
        "Graph build complete"
    );

    let show_full_chain = filters.show_full_chain;
    Ok(GraphResponse {
        nodes,
        edges,
        filters,
        expanded_namespaces,
        show_full_chain,
        large_result_warning,
    })
}

//! Graph assembly: node and edge emission with per-invocation deduplication.
//!
//! All dedup sets live on the stack of a single build; nothing is shared
//! across concurrent requests.
//!
//! Dangling-edge policy: a service-dependency edge is emitted only when both
//! endpoints are present among the emitted service nodes. Edges whose far
//! endpoint was pulled in by the either-endpoint fetch but whose node was
//! dropped (severity filter) or never matched are dropped with it. The
//! alternative — synthesizing placeholder nodes — would reintroduce services
//! the severity filter explicitly removed.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{
    EdgeType, GraphEdge, GraphNode, NamespaceDependency, NodeType, Service, ServiceDependency,
    ServiceKey,
};

use super::correlate::AlertSummary;

/// Assemble deduplicated nodes and edges from the surviving services.
///
/// Emission order: namespace/service nodes with
/// containment edges first, then service-dependency edges, then
/// namespace-dependency edges gated on both endpoint namespaces having been
/// emitted. Consumers must still treat nodes and edges as sets.
pub(crate) fn assemble(
    services: &[&Service],
    summaries: &HashMap<ServiceKey, AlertSummary>,
    dependencies: &[ServiceDependency],
    namespace_dependencies: &[NamespaceDependency],
) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    // Dedup state scoped to this invocation only
    let mut emitted_namespaces: BTreeSet<String> = BTreeSet::new();
    let mut emitted_services: HashSet<String> = HashSet::new();

    for service in services {
        if emitted_namespaces.insert(service.key.namespace.clone()) {
            nodes.push(GraphNode::namespace(service.key.namespace.clone()));
        }

        let node_id = service.key.node_id();
        let summary = summaries
            .get(&service.key)
            .copied()
            .unwrap_or_default();

        nodes.push(GraphNode {
            id: node_id.clone(),
            label: service.key.name.clone(),
            node_type: NodeType::Service,
            team: service.team.clone(),
            environment: service.environment.clone(),
            component_type: service.component_type.clone(),
            tags: service.tags.clone(),
            tag_sources: service.tag_sources.clone(),
            external_calls: service.external_calls.clone(),
            database_calls: service.database_calls.clone(),
            rpc_calls: service.rpc_calls.clone(),
            alert_count: Some(summary.alert_count),
            highest_severity: Some(summary.highest_severity),
        });

        edges.push(GraphEdge {
            id: None,
            from: service.key.namespace.clone(),
            to: node_id.clone(),
            edge_type: None,
            dependency_type: None,
            description: None,
        });

        emitted_services.insert(node_id);
    }

    // Service-dependency edges: dedup by composite id, drop dangling ones
    let mut seen_dep_edges: HashSet<String> = HashSet::new();
    for dep in dependencies {
        let from = dep.from_key().node_id();
        let to = dep.to_key().node_id();
        if !emitted_services.contains(&from) || !emitted_services.contains(&to) {
            continue;
        }
        let id = format!("{from}-->{to}");
        if seen_dep_edges.insert(id.clone()) {
            edges.push(GraphEdge {
                id: Some(id),
                from,
                to,
                edge_type: Some(EdgeType::Service),
                dependency_type: None,
                description: None,
            });
        }
    }

    // Namespace-dependency edges: only between emitted namespace nodes
    let mut seen_ns_edges: HashSet<String> = HashSet::new();
    for dep in namespace_dependencies {
        if !emitted_namespaces.contains(&dep.from_namespace)
            || !emitted_namespaces.contains(&dep.to_namespace)
        {
            continue;
        }
        let id = format!("{}==>{}", dep.from_namespace, dep.to_namespace);
        if seen_ns_edges.insert(id.clone()) {
            edges.push(GraphEdge {
                id: Some(id),
                from: dep.from_namespace.clone(),
                to: dep.to_namespace.clone(),
                edge_type: Some(EdgeType::Namespace),
                dependency_type: dep.dependency_type.clone(),
                description: dep.description.clone(),
            });
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        namespaces = emitted_namespaces.len(),
        "Graph assembly complete"
    );

    (nodes, edges)
}

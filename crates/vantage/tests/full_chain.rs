//! Full-chain closure behavior through the public API.

mod common;

use common::{dep, ns_dep, seeded, service};
use vantage::{GraphQuery, GraphResponse, NodeType, Vantage};

fn service_node_ids(graph: &GraphResponse) -> Vec<&str> {
    let mut ids: Vec<&str> = graph
        .nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Service)
        .map(|n| n.id.as_str())
        .collect();
    ids.sort_unstable();
    ids
}

/// s1 - s2 - s3 form one component spanning two namespaces; s4 is isolated.
fn chained_store() -> Vantage {
    seeded(
        &[
            service("a", "s1"),
            service("a", "s2"),
            service("b", "s3"),
            service("c", "s4"),
        ],
        &[dep(("a", "s1"), ("a", "s2")), dep(("a", "s2"), ("b", "s3"))],
        &[],
        &[],
    )
}

#[test]
fn full_chain_pulls_in_connected_namespaces_and_drops_isolated_ones() {
    let vantage = chained_store();

    let query = GraphQuery {
        namespaces: Some("a".to_string()),
        show_full_chain: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    assert_eq!(service_node_ids(&graph), vec!["a::s1", "a::s2", "b::s3"]);

    // The namespace filter was re-derived from the visited services
    let namespaces: Vec<&str> = graph.filters.namespaces.iter().map(String::as_str).collect();
    assert_eq!(namespaces, vec!["a", "b"]);
    assert!(graph.show_full_chain);
    assert!(!graph.large_result_warning);
}

#[test]
fn full_chain_reaches_upstream_dependents() {
    // Seeding from the downstream namespace still visits upstream services
    let vantage = chained_store();

    let query = GraphQuery {
        namespaces: Some("b".to_string()),
        show_full_chain: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    assert_eq!(service_node_ids(&graph), vec!["a::s1", "a::s2", "b::s3"]);
}

#[test]
fn full_chain_with_unconnected_namespace_yields_empty_graph() {
    // s4 appears in no dependency edge, so the closure visits nothing
    let vantage = chained_store();

    let query = GraphQuery {
        namespaces: Some("c".to_string()),
        show_full_chain: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
}

#[test]
fn full_chain_composes_with_one_hop_expansion() {
    // Namespace edge x -> a grows the filter to {x, a} before the closure
    let vantage = seeded(
        &[
            service("x", "edge"),
            service("a", "s1"),
            service("a", "s2"),
            service("b", "s3"),
        ],
        &[dep(("a", "s1"), ("a", "s2")), dep(("a", "s2"), ("b", "s3"))],
        &[ns_dep("x", "a")],
        &[],
    );

    let query = GraphQuery {
        namespaces: Some("x".to_string()),
        include_dependents: true,
        show_full_chain: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    // Expansion ran first, then the closure traversed from {x, a}
    assert_eq!(
        graph.expanded_namespaces.as_deref(),
        Some(["a".to_string(), "x".to_string()].as_slice())
    );
    assert_eq!(service_node_ids(&graph), vec!["a::s1", "a::s2", "b::s3"]);
}

#[test]
fn large_component_raises_the_advisory_flag() {
    let services: Vec<_> = (0..102).map(|i| service("big", &format!("s{i}"))).collect();
    let deps: Vec<_> = (0..101)
        .map(|i| dep(("big", &format!("s{i}")), ("big", &format!("s{}", i + 1))))
        .collect();
    let vantage = seeded(&services, &deps, &[], &[]);

    let query = GraphQuery {
        namespaces: Some("big".to_string()),
        show_full_chain: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    assert!(graph.large_result_warning);
    // Advisory only: every service is still present
    assert_eq!(service_node_ids(&graph).len(), 102);
}

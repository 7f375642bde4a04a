//! Filter normalization and namespace expansion through the public API.

mod common;

use common::{ns_dep, seeded, service};
use vantage::{Error, GraphQuery, NodeType};

#[test]
fn unknown_severity_is_rejected_before_any_query() {
    let vantage = seeded(&[service("net", "api")], &[], &[], &[]);

    let query = GraphQuery {
        severities: Some("critical,urgent".to_string()),
        ..GraphQuery::default()
    };
    let err = vantage.build_graph(&query).unwrap_err();

    assert!(matches!(err, Error::InvalidFilter(_)));
    assert!(err.is_client_error());
    assert!(err.to_string().contains("urgent"));
}

#[test]
fn severity_tokens_are_case_sensitive() {
    let vantage = seeded(&[service("net", "api")], &[], &[], &[]);

    let query = GraphQuery {
        severities: Some("CRITICAL".to_string()),
        ..GraphQuery::default()
    };
    assert!(vantage.build_graph(&query).is_err());
}

#[test]
fn include_dependents_grows_the_filter_by_one_hop() {
    // a -> b -> c at the namespace level; each namespace holds one service
    let vantage = seeded(
        &[service("a", "s1"), service("b", "s2"), service("c", "s3")],
        &[],
        &[ns_dep("a", "b"), ns_dep("b", "c")],
        &[],
    );

    let query = GraphQuery {
        namespaces: Some("a".to_string()),
        include_dependents: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    // b is one hop away, c is two and stays out
    let mut service_ids: Vec<&str> = graph
        .nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Service)
        .map(|n| n.id.as_str())
        .collect();
    service_ids.sort_unstable();
    assert_eq!(service_ids, vec!["a::s1", "b::s2"]);

    assert_eq!(
        graph.expanded_namespaces.as_deref(),
        Some(["a".to_string(), "b".to_string()].as_slice())
    );
}

#[test]
fn expansion_includes_upstream_dependents() {
    let vantage = seeded(
        &[service("up", "caller"), service("a", "s1")],
        &[],
        &[ns_dep("up", "a")],
        &[],
    );

    let query = GraphQuery {
        namespaces: Some("a".to_string()),
        include_dependents: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    assert!(graph.nodes.iter().any(|n| n.id == "up::caller"));
}

#[test]
fn expansion_without_namespace_filter_is_a_noop() {
    let vantage = seeded(
        &[service("a", "s1"), service("b", "s2")],
        &[],
        &[ns_dep("a", "b")],
        &[],
    );

    let query = GraphQuery {
        include_dependents: true,
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    // No expansion ran, so the marker is absent and nothing was filtered
    assert!(graph.expanded_namespaces.is_none());
    let services = graph
        .nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Service)
        .count();
    assert_eq!(services, 2);
}

#[test]
fn list_filters_trim_and_deduplicate() {
    let vantage = seeded(&[service("net", "api")], &[], &[], &[]);

    let query = GraphQuery {
        tags: Some(" edge , edge ,, storage ".to_string()),
        ..GraphQuery::default()
    };
    let graph = vantage.build_graph(&query).unwrap();

    let tags: Vec<&str> = graph.filters.tags.iter().map(String::as_str).collect();
    assert_eq!(tags, vec!["edge", "storage"]);
}

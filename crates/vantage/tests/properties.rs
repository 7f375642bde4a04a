//! Property tests over the assembled graph's structural invariants.

mod common;

use proptest::prelude::*;
use vantage::{GraphQuery, NodeType};

use common::{dep, seeded, service};

/// Small topology: service keys plus dependency edges between them by index.
fn topology_strategy() -> impl Strategy<Value = (Vec<(String, String)>, Vec<(usize, usize)>)> {
    prop::collection::vec(("[a-c]", "[a-z]{1,6}"), 1..12).prop_flat_map(|keys| {
        let n = keys.len();
        let edges = prop::collection::vec((0..n, 0..n), 0..16);
        (Just(keys), edges)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_service_node_has_its_namespace_node((keys, edge_indices) in topology_strategy()) {
        let services: Vec<_> = keys.iter().map(|(ns, name)| service(ns, name)).collect();
        let deps: Vec<_> = edge_indices
            .iter()
            .map(|&(i, j)| {
                let (fns, fname) = &keys[i];
                let (tns, tname) = &keys[j];
                dep((fns, fname), (tns, tname))
            })
            .collect();

        let vantage = seeded(&services, &deps, &[], &[]);
        let graph = vantage.build_graph(&GraphQuery::default()).unwrap();

        for node in graph.nodes.iter().filter(|n| n.node_type == NodeType::Service) {
            let (namespace, _) = node.id.split_once("::").expect("service id is ns::name");
            prop_assert!(
                graph
                    .nodes
                    .iter()
                    .any(|n| n.node_type == NodeType::Namespace && n.id == namespace),
                "service node {} lacks namespace node {namespace}",
                node.id
            );
        }

        // Every edge endpoint resolves to an emitted node
        for edge in &graph.edges {
            prop_assert!(graph.nodes.iter().any(|n| n.id == edge.from));
            prop_assert!(graph.nodes.iter().any(|n| n.id == edge.to));
        }
    }

    #[test]
    fn builds_are_idempotent((keys, edge_indices) in topology_strategy()) {
        let services: Vec<_> = keys.iter().map(|(ns, name)| service(ns, name)).collect();
        let deps: Vec<_> = edge_indices
            .iter()
            .map(|&(i, j)| {
                let (fns, fname) = &keys[i];
                let (tns, tname) = &keys[j];
                dep((fns, fname), (tns, tname))
            })
            .collect();

        let vantage = seeded(&services, &deps, &[], &[]);
        let first = vantage.build_graph(&GraphQuery::default()).unwrap();
        let second = vantage.build_graph(&GraphQuery::default()).unwrap();
        prop_assert_eq!(first, second);
    }
}

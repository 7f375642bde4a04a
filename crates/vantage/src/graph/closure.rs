//! Full-chain closure over the service dependency graph.
//!
//! Builds an undirected view of every service-dependency edge and runs a
//! breadth-first traversal from all seed services simultaneously. The result
//! is the union of the connected components containing the seeds; the
//! namespace filter is then re-derived from the visited services and
//! replaces the prior filter for all downstream stages.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};

use crate::types::{ServiceDependency, ServiceKey};

/// Service count above which the response carries a non-fatal
/// large-result-set advisory. The graph is never truncated.
pub(crate) const LARGE_RESULT_THRESHOLD: usize = 100;

/// Outcome of the closure traversal.
pub(crate) struct FullChain {
    /// Every service reachable (undirected) from the seed set.
    pub services: HashSet<ServiceKey>,
    /// Distinct namespaces among the visited services; replaces the prior
    /// namespace filter downstream.
    pub namespaces: BTreeSet<String>,
    /// Advisory flag: the visited set exceeded [`LARGE_RESULT_THRESHOLD`].
    pub large_result: bool,
}

/// Compute the full transitively-connected service set.
///
/// Seeds are the services whose namespace is in `seed_namespaces`; with an
/// empty seed filter, every service appearing in any dependency edge seeds
/// the traversal (the whole graph is visited). Runs in O(V + E).
pub(crate) fn full_chain(
    edges: &[ServiceDependency],
    seed_namespaces: &BTreeSet<String>,
) -> FullChain {
    let mut graph: UnGraph<ServiceKey, ()> = UnGraph::default();
    let mut node_map: HashMap<ServiceKey, NodeIndex> = HashMap::new();

    let mut intern = |graph: &mut UnGraph<ServiceKey, ()>, key: ServiceKey| -> NodeIndex {
        *node_map
            .entry(key.clone())
            .or_insert_with(|| graph.add_node(key))
    };

    for edge in edges {
        let from = intern(&mut graph, edge.from_key());
        let to = intern(&mut graph, edge.to_key());
        graph.add_edge(from, to, ());
    }

    // BFS from all seeds simultaneously
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for node in graph.node_indices() {
        let in_seed =
            seed_namespaces.is_empty() || seed_namespaces.contains(&graph[node].namespace);
        if in_seed && visited.insert(node) {
            queue.push_back(node);
        }
    }

    while let Some(node) = queue.pop_front() {
        for neighbor in graph.neighbors(node) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    let services: HashSet<ServiceKey> = visited.iter().map(|&n| graph[n].clone()).collect();
    let namespaces: BTreeSet<String> = services.iter().map(|k| k.namespace.clone()).collect();
    let large_result = services.len() > LARGE_RESULT_THRESHOLD;

    if large_result {
        tracing::warn!(
            services = services.len(),
            threshold = LARGE_RESULT_THRESHOLD,
            "Full-chain closure exceeded the large-result threshold"
        );
    } else {
        tracing::debug!(
            services = services.len(),
            namespaces = namespaces.len(),
            "Full-chain closure complete"
        );
    }

    FullChain {
        services,
        namespaces,
        large_result,
    }
}

//! One-hop namespace expansion.
//!
//! When a namespace filter is present and the caller asked to include
//! dependents, the filter grows by exactly one hop along namespace
//! dependency edges, in both directions. The expansion is deliberately not
//! transitive: it surfaces the immediate blast radius without flooding the
//! view.

use std::collections::BTreeSet;

use crate::types::NamespaceDependency;

/// Expand a namespace filter by one dependency hop in both directions.
///
/// Returns `filter ∪ {x : (n → x) ∈ edges, n ∈ filter} ∪ {x : (x → n) ∈
/// edges, n ∈ filter}`. The result is always a superset of the input. An
/// empty filter returns empty: there is nothing to expand from.
pub(crate) fn one_hop(
    filter: &BTreeSet<String>,
    edges: &[NamespaceDependency],
) -> BTreeSet<String> {
    if filter.is_empty() {
        return BTreeSet::new();
    }

    let mut expanded = filter.clone();
    for edge in edges {
        if filter.contains(&edge.from_namespace) {
            expanded.insert(edge.to_namespace.clone());
        }
        if filter.contains(&edge.to_namespace) {
            expanded.insert(edge.from_namespace.clone());
        }
    }
    expanded
}

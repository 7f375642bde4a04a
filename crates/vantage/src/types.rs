//! Domain and wire types for topology graph assembly.
//!
//! Stored entities (`Service`, `ServiceDependency`, `NamespaceDependency`,
//! `AlertIncident`) mirror the relational schema and are written only by the
//! ingestion path. Derived types (`GraphNode`, `GraphEdge`, `GraphResponse`)
//! are built fresh per request and never persisted.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Natural key of a service: `(namespace, name)`.
///
/// Unique per service; the graph layer renders it as `namespace::name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceKey {
    /// Grouping the service belongs to (team or deployment boundary).
    pub namespace: String,
    /// Service name, unique within its namespace.
    pub name: String,
}

impl ServiceKey {
    /// Create a key from namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Graph node id for this service (`namespace::name`).
    #[must_use]
    pub fn node_id(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.name)
    }
}

/// A monitored service as reported by telemetry ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Natural key.
    #[serde(flatten)]
    pub key: ServiceKey,

    /// Deployment environment (e.g., "prod", "staging").
    pub environment: Option<String>,

    /// Owning team.
    pub team: Option<String>,

    /// Component classification (e.g., "api", "worker", "database").
    pub component_type: Option<String>,

    /// Tags attached to the service.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Provenance per tag: where each tag was discovered (e.g., "telemetry",
    /// "manual").
    #[serde(default)]
    pub tag_sources: BTreeMap<String, String>,

    /// Outbound external HTTP calls, keyed by peer.
    #[serde(default)]
    pub external_calls: BTreeMap<String, String>,

    /// Database calls, keyed by peer.
    #[serde(default)]
    pub database_calls: BTreeMap<String, String>,

    /// RPC calls, keyed by peer.
    #[serde(default)]
    pub rpc_calls: BTreeMap<String, String>,

    /// When telemetry last reported this service.
    pub last_seen: DateTime<Utc>,
}

/// Directed dependency edge between two services.
///
/// Both endpoints should reference an existing [`Service`]; that is enforced
/// at write time only, so readers must tolerate unknown endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceDependency {
    /// Namespace of the depending service.
    pub from_namespace: String,
    /// Name of the depending service.
    pub from_name: String,
    /// Namespace of the depended-upon service.
    pub to_namespace: String,
    /// Name of the depended-upon service.
    pub to_name: String,
    /// When telemetry last reported this edge.
    pub last_seen: DateTime<Utc>,
}

impl ServiceDependency {
    /// Key of the depending endpoint.
    #[must_use]
    pub fn from_key(&self) -> ServiceKey {
        ServiceKey::new(self.from_namespace.clone(), self.from_name.clone())
    }

    /// Key of the depended-upon endpoint.
    #[must_use]
    pub fn to_key(&self) -> ServiceKey {
        ServiceKey::new(self.to_namespace.clone(), self.to_name.clone())
    }
}

/// Directed dependency between two namespaces.
///
/// Static reference data, rarely mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDependency {
    /// Depending namespace.
    pub from_namespace: String,
    /// Depended-upon namespace.
    pub to_namespace: String,
    /// Kind of relationship (e.g., "network", "data").
    pub dependency_type: Option<String>,
    /// Human-readable description for display.
    pub description: Option<String>,
}

/// Alert severity, ordered from most to least severe.
///
/// The derived `Ord` gives the fixed total order
/// `Fatal < Critical < Warning < None`; the *highest* severity for a service
/// is therefore the minimum of its alerts' severities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Service-down class incident.
    Fatal,
    /// Requires immediate attention.
    Critical,
    /// Degraded but functioning.
    Warning,
    /// No active severity.
    None,
}

impl Severity {
    /// Numeric rank: `fatal(1) < critical(2) < warning(3) < none(4)`.
    ///
    /// Lower number means more severe.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Fatal => 1,
            Self::Critical => 2,
            Self::Warning => 3,
            Self::None => 4,
        }
    }

    /// Wire representation of the severity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::None => "none",
        }
    }

    /// Parse a wire severity value.
    ///
    /// Returns `Option` rather than an error so callers can attach their own
    /// context (filter validation vs. database corruption).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fatal" => Some(Self::Fatal),
            "critical" => Some(Self::Critical),
            "warning" => Some(Self::Warning),
            "none" => Some(Self::None),
            _ => Option::None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an alert incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// Currently active. Only firing incidents participate in graph builds.
    Firing,
    /// No longer active.
    Resolved,
}

impl AlertStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Firing => "firing",
            Self::Resolved => "resolved",
        }
    }
}

/// An alert incident attached to a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertIncident {
    /// Service the alert fired for.
    pub service: ServiceKey,
    /// Severity of the incident.
    pub severity: Severity,
    /// Firing or resolved.
    pub status: AlertStatus,
    /// Instance identifier (pod, host) the alert originated from.
    pub instance: Option<String>,
    /// Alert message for display.
    pub message: Option<String>,
    /// When the incident started firing.
    pub started_at: DateTime<Utc>,
    /// When the incident resolved, if it has.
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Raw graph request as received from the caller.
///
/// All fields are optional; list fields are comma-separated strings exactly
/// as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphQuery {
    /// Comma-separated namespace filter.
    pub namespaces: Option<String>,
    /// Comma-separated tag filter (ANY-overlap semantics).
    pub tags: Option<String>,
    /// Comma-separated severity filter.
    pub severities: Option<String>,
    /// Free-text search over namespace and name.
    pub search: Option<String>,
    /// Expand the namespace filter by one dependency hop in both directions.
    pub include_dependents: bool,
    /// Replace the namespace filter with the full transitively-connected
    /// service set.
    pub show_full_chain: bool,
}

/// Canonical filter set produced by the normalizer and echoed back in the
/// response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphFilters {
    /// Namespace filter (possibly expanded or re-derived downstream).
    pub namespaces: BTreeSet<String>,
    /// Tag filter.
    pub tags: BTreeSet<String>,
    /// Severity filter.
    pub severities: BTreeSet<Severity>,
    /// Trimmed search string; absent when empty or whitespace-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// One-hop expansion toggle.
    pub include_dependents: bool,
    /// Full-chain closure toggle.
    pub show_full_chain: bool,
}

/// Kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Grouping node, one per distinct namespace.
    Namespace,
    /// Service node carrying metadata and alert annotations.
    Service,
}

/// Kind of a graph edge. Containment edges carry no kind on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Namespace-level dependency edge.
    Namespace,
    /// Service-level dependency edge.
    Service,
}

/// A node in the derived graph. Built fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Node id: the namespace for namespace nodes, `namespace::name` for
    /// service nodes.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Node kind.
    pub node_type: NodeType,
    /// Owning team (service nodes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Deployment environment (service nodes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Component classification (service nodes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    /// Tags (service nodes only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Per-tag provenance (service nodes only).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tag_sources: BTreeMap<String, String>,
    /// External call enrichment (service nodes only).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub external_calls: BTreeMap<String, String>,
    /// Database call enrichment (service nodes only).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub database_calls: BTreeMap<String, String>,
    /// RPC call enrichment (service nodes only).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rpc_calls: BTreeMap<String, String>,
    /// Count of firing alerts matching the active filters (service nodes
    /// only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_count: Option<u32>,
    /// Worst severity among those alerts (service nodes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<Severity>,
}

impl GraphNode {
    /// Create a bare namespace node.
    #[must_use]
    pub fn namespace(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            node_type: NodeType::Namespace,
            team: None,
            environment: None,
            component_type: None,
            tags: Vec::new(),
            tag_sources: BTreeMap::new(),
            external_calls: BTreeMap::new(),
            database_calls: BTreeMap::new(),
            rpc_calls: BTreeMap::new(),
            alert_count: None,
            highest_severity: None,
        }
    }
}

/// An edge in the derived graph. Built fresh per request, never persisted.
///
/// Containment edges (namespace → service) carry neither id nor edge type;
/// dependency edges carry a composite id used for deduplication.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Composite dedup id (`from-->to` / `from==>to`); absent on containment
    /// edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Edge kind; absent on containment edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<EdgeType>,
    /// Display metadata (namespace edges only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<String>,
    /// Display metadata (namespace edges only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The assembled graph view returned to the caller.
///
/// Node and edge ordering is not guaranteed; consumers must treat both as
/// sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    /// Deduplicated namespace and service nodes.
    pub nodes: Vec<GraphNode>,
    /// Containment, service-dependency, and namespace-dependency edges.
    pub edges: Vec<GraphEdge>,
    /// Canonical filter set the graph was built with, after any expansion or
    /// closure re-derivation of the namespace filter.
    pub filters: GraphFilters,
    /// Result of one-hop expansion; present only when `include_dependents`
    /// was requested against a non-empty namespace filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_namespaces: Option<Vec<String>>,
    /// Whether full-chain closure was applied.
    pub show_full_chain: bool,
    /// Non-fatal advisory: the full-chain closure exceeded the size
    /// threshold. The graph is still complete; nothing was truncated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub large_result_warning: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_matches_rank() {
        assert!(Severity::Fatal < Severity::Critical);
        assert!(Severity::Critical < Severity::Warning);
        assert!(Severity::Warning < Severity::None);

        let mut severities = vec![Severity::None, Severity::Fatal, Severity::Warning];
        severities.sort_unstable();
        assert_eq!(severities[0], Severity::Fatal);
        assert_eq!(severities[0].rank(), 1);
    }

    #[test]
    fn severity_parse_round_trips() {
        for sev in [
            Severity::Fatal,
            Severity::Critical,
            Severity::Warning,
            Severity::None,
        ] {
            assert_eq!(Severity::parse(sev.as_str()), Some(sev));
        }
        assert_eq!(Severity::parse("catastrophic"), Option::None);
    }

    #[test]
    fn service_key_node_id_uses_double_colon() {
        let key = ServiceKey::new("net", "api");
        assert_eq!(key.node_id(), "net::api");
        assert_eq!(key.to_string(), "net::api");
    }

    #[test]
    fn namespace_node_omits_service_fields_on_the_wire() {
        let node = GraphNode::namespace("net");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], "net");
        assert_eq!(json["nodeType"], "namespace");
        assert!(json.get("alertCount").is_none());
        assert!(json.get("tags").is_none());
    }
}

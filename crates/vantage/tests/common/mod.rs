//! Shared fixtures for integration tests.

// Not every test binary uses every fixture
#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::Utc;
use vantage::{
    AlertIncident, AlertStatus, NamespaceDependency, Service, ServiceDependency, ServiceKey,
    Severity, Vantage,
};

/// A service with the given key and no metadata.
pub fn service(namespace: &str, name: &str) -> Service {
    Service {
        key: ServiceKey::new(namespace, name),
        environment: Some("prod".to_string()),
        team: None,
        component_type: None,
        tags: Vec::new(),
        tag_sources: BTreeMap::new(),
        external_calls: BTreeMap::new(),
        database_calls: BTreeMap::new(),
        rpc_calls: BTreeMap::new(),
        last_seen: Utc::now(),
    }
}

/// A service carrying tags.
pub fn tagged_service(namespace: &str, name: &str, tags: &[&str]) -> Service {
    Service {
        tags: tags.iter().map(ToString::to_string).collect(),
        ..service(namespace, name)
    }
}

/// A service-level dependency edge.
pub fn dep(from: (&str, &str), to: (&str, &str)) -> ServiceDependency {
    ServiceDependency {
        from_namespace: from.0.to_string(),
        from_name: from.1.to_string(),
        to_namespace: to.0.to_string(),
        to_name: to.1.to_string(),
        last_seen: Utc::now(),
    }
}

/// A namespace-level dependency edge.
pub fn ns_dep(from: &str, to: &str) -> NamespaceDependency {
    NamespaceDependency {
        from_namespace: from.to_string(),
        to_namespace: to.to_string(),
        dependency_type: Some("network".to_string()),
        description: None,
    }
}

/// A firing alert at the given severity.
pub fn firing_alert(namespace: &str, name: &str, severity: Severity) -> AlertIncident {
    AlertIncident {
        service: ServiceKey::new(namespace, name),
        severity,
        status: AlertStatus::Firing,
        instance: None,
        message: Some("synthetic probe failed".to_string()),
        started_at: Utc::now(),
        resolved_at: None,
    }
}

/// Fresh in-memory instance populated with the given topology.
pub fn seeded(
    services: &[Service],
    deps: &[ServiceDependency],
    ns_deps: &[NamespaceDependency],
    alerts: &[AlertIncident],
) -> Vantage {
    let vantage = Vantage::in_memory().expect("failed to create in-memory store");
    for svc in services {
        vantage.upsert_service(svc).expect("upsert_service failed");
    }
    for d in deps {
        vantage.record_dependency(d).expect("record_dependency failed");
    }
    for d in ns_deps {
        vantage
            .record_namespace_dependency(d)
            .expect("record_namespace_dependency failed");
    }
    for a in alerts {
        vantage.record_alert(a).expect("record_alert failed");
    }
    vantage
}

//! Alert correlation: per-service severity aggregation and the
//! severity-filter drop rule.

use std::collections::{BTreeSet, HashMap};

use crate::types::{AlertIncident, Service, ServiceKey, Severity};

/// Aggregated alert state for one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AlertSummary {
    /// Count of firing alerts matching the active filters.
    pub alert_count: u32,
    /// Worst severity among those alerts (minimum rank).
    pub highest_severity: Severity,
}

impl Default for AlertSummary {
    fn default() -> Self {
        Self {
            alert_count: 0,
            highest_severity: Severity::None,
        }
    }
}

/// Aggregate firing alerts per service and apply the severity-filter drop
/// rule.
///
/// Returns the surviving services (in their incoming order) and a summary
/// per surviving service. With an active severity filter, a service whose
/// matching alert count is zero is excluded entirely; it does not appear as
/// a node at all. Without a severity filter every service survives, with a
/// default summary of zero alerts at severity `none`.
pub(crate) fn correlate<'a>(
    services: &'a [Service],
    alerts: &[AlertIncident],
    severities: &BTreeSet<Severity>,
) -> (Vec<&'a Service>, HashMap<ServiceKey, AlertSummary>) {
    let mut summaries: HashMap<ServiceKey, AlertSummary> = HashMap::new();

    for alert in alerts {
        let summary = summaries.entry(alert.service.clone()).or_default();
        summary.alert_count += 1;
        // Ties resolve by rank; Severity's Ord is the rank order.
        summary.highest_severity = summary.highest_severity.min(alert.severity);
    }

    let severity_filter_active = !severities.is_empty();
    let surviving: Vec<&Service> = services
        .iter()
        .filter(|svc| !severity_filter_active || summaries.contains_key(&svc.key))
        .collect();

    if surviving.len() < services.len() {
        tracing::debug!(
            dropped = services.len() - surviving.len(),
            "Severity filter dropped services with no matching alerts"
        );
    }

    (surviving, summaries)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use crate::types::AlertStatus;

    fn service(namespace: &str, name: &str) -> Service {
        Service {
            key: ServiceKey::new(namespace, name),
            environment: None,
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

    fn alert(namespace: &str, name: &str, severity: Severity) -> AlertIncident {
        AlertIncident {
            service: ServiceKey::new(namespace, name),
            severity,
            status: AlertStatus::Firing,
            instance: None,
            message: None,
            started_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn aggregates_count_and_worst_severity() {
        let services = vec![service("net", "api")];
        let alerts = vec![
            alert("net", "api", Severity::Warning),
            alert("net", "api", Severity::Critical),
        ];

        let (surviving, summaries) = correlate(&services, &alerts, &BTreeSet::new());
        assert_eq!(surviving.len(), 1);

        let summary = summaries[&ServiceKey::new("net", "api")];
        assert_eq!(summary.alert_count, 2);
        assert_eq!(summary.highest_severity, Severity::Critical);
    }

    #[test]
    fn service_without_alerts_defaults_to_none() {
        let services = vec![service("net", "db")];
        let (surviving, summaries) = correlate(&services, &[], &BTreeSet::new());
        assert_eq!(surviving.len(), 1);
        assert!(summaries.get(&ServiceKey::new("net", "db")).is_none());
        assert_eq!(AlertSummary::default().highest_severity, Severity::None);
    }

    #[test]
    fn active_severity_filter_drops_services_with_no_matching_alerts() {
        let services = vec![service("net", "api"), service("net", "db")];
        // Alerts are already severity-scoped by the store query; db has none
        let alerts = vec![alert("net", "api", Severity::Critical)];
        let filter: BTreeSet<Severity> = [Severity::Critical].into_iter().collect();

        let (surviving, _) = correlate(&services, &alerts, &filter);
        let ids: Vec<String> = surviving.iter().map(|s| s.key.node_id()).collect();
        assert_eq!(ids, vec!["net::api"]);
    }

    #[test]
    fn inactive_filter_keeps_alert_free_services() {
        let services = vec![service("net", "api"), service("net", "db")];
        let alerts = vec![alert("net", "api", Severity::Warning)];

        let (surviving, _) = correlate(&services, &alerts, &BTreeSet::new());
        assert_eq!(surviving.len(), 2);
    }

    #[test]
    fn fatal_outranks_everything() {
        let services = vec![service("net", "api")];
        let alerts = vec![
            alert("net", "api", Severity::None),
            alert("net", "api", Severity::Fatal),
            alert("net", "api", Severity::Warning),
        ];
        let (_, summaries) = correlate(&services, &alerts, &BTreeSet::new());
        assert_eq!(
            summaries[&ServiceKey::new("net", "api")].highest_severity,
            Severity::Fatal
        );
    }
}

//! `vantage ingest` command implementation.

use std::path::Path;

use colored::Colorize;
use serde::Deserialize;
use vantage::{AlertIncident, NamespaceDependency, Service, ServiceDependency, Vantage};

use super::display::stat_line;

/// A topology snapshot produced by a discovery agent.
///
/// All sections are optional; an absent section ingests nothing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snapshot {
    services: Vec<Service>,
    service_dependencies: Vec<ServiceDependency>,
    namespace_dependencies: Vec<NamespaceDependency>,
    alerts: Vec<AlertIncident>,
}

/// Run the ingest command.
pub fn run(db: &Path, file: &Path) -> Result<(), vantage::Error> {
    let vantage = Vantage::open(db)?;

    let raw = std::fs::read_to_string(file)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;

    for service in &snapshot.services {
        vantage.upsert_service(service)?;
    }
    for dep in &snapshot.service_dependencies {
        vantage.record_dependency(dep)?;
    }
    for dep in &snapshot.namespace_dependencies {
        vantage.record_namespace_dependency(dep)?;
    }
    for alert in &snapshot.alerts {
        vantage.record_alert(alert)?;
    }

    tracing::info!(
        file = %file.display(),
        services = snapshot.services.len(),
        "Snapshot ingested"
    );

    println!("{}", "Snapshot ingested".cyan().bold());
    stat_line("Services", snapshot.services.len());
    stat_line("Service dependencies", snapshot.service_dependencies.len());
    stat_line("Namespace dependencies", snapshot.namespace_dependencies.len());
    stat_line("Alerts", snapshot.alerts.len());

    Ok(())
}

//! Helper functions for database row conversion and parsing.
//!
//! These utilities convert between database representations and domain types.
//! Enum and timestamp parsers treat unrecognized values as possible database
//! corruption rather than silently defaulting. Also provides SQL column list
//! constants to keep column ordering consistent across query modules.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::{
    AlertIncident, AlertStatus, NamespaceDependency, Service, ServiceDependency, ServiceKey,
    Severity,
};

/// SQL column list for the services table.
///
/// Use with [`row_to_service`] for consistent column ordering.
pub(crate) const SERVICES_COLUMNS: &str =
    "namespace, name, environment, team, component_type, tags, tag_sources, \
     external_calls, database_calls, rpc_calls, last_seen";

/// SQL column list for the `service_deps` table.
///
/// Use with [`row_to_service_dependency`] for consistent column ordering.
pub(crate) const SERVICE_DEPS_COLUMNS: &str =
    "from_namespace, from_name, to_namespace, to_name, last_seen";

/// SQL column list for the `namespace_deps` table.
///
/// Use with [`row_to_namespace_dependency`] for consistent column ordering.
pub(crate) const NAMESPACE_DEPS_COLUMNS: &str =
    "from_namespace, to_namespace, dependency_type, description";

/// SQL column list for the alerts table (domain fields only; the synthetic
/// row id is not part of the domain type).
///
/// Use with [`row_to_alert`] for consistent column ordering.
pub(crate) const ALERTS_COLUMNS: &str =
    "service_namespace, service_name, severity, status, instance, message, \
     started_at, resolved_at";

/// Map an unrecognized stored value to a conversion failure.
fn corrupt_value(kind: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        format!(
            "Unknown {kind} '{value}' in database. Database may be corrupted or from a newer version."
        )
        .into(),
    )
}

/// Parse a severity string from the database.
///
/// Returns an error for unrecognized values, indicating possible corruption.
pub(crate) fn parse_severity(s: &str) -> rusqlite::Result<Severity> {
    Severity::parse(s).ok_or_else(|| corrupt_value("severity", s))
}

/// Parse an alert status string from the database.
///
/// Returns an error for unrecognized values, indicating possible corruption.
pub(crate) fn parse_alert_status(s: &str) -> rusqlite::Result<AlertStatus> {
    match s {
        "firing" => Ok(AlertStatus::Firing),
        "resolved" => Ok(AlertStatus::Resolved),
        unknown => Err(corrupt_value("alert status", unknown)),
    }
}

/// Parse an RFC 3339 timestamp string from the database.
pub(crate) fn parse_timestamp(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupt_value("timestamp", s))
}

/// Serialize a timestamp for storage.
pub(crate) fn to_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse a JSON string-array column (the services `tags` column).
pub(crate) fn parse_json_array(s: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(s).map_err(|_| corrupt_value("JSON array", s))
}

/// Parse a JSON string-map column (tag sources and enrichment maps).
pub(crate) fn parse_json_map(s: &str) -> rusqlite::Result<BTreeMap<String, String>> {
    serde_json::from_str(s).map_err(|_| corrupt_value("JSON object", s))
}

/// Serialize a string list as a JSON column value.
///
/// Serializing plain strings cannot fail; the unwrap is unreachable.
pub(crate) fn to_json_array(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Serialize a string map as a JSON column value.
pub(crate) fn to_json_map(map: &BTreeMap<String, String>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
}

/// Convert a database row to a [`Service`].
///
/// Expected columns: [`SERVICES_COLUMNS`].
pub(crate) fn row_to_service(row: &rusqlite::Row) -> rusqlite::Result<Service> {
    Ok(Service {
        key: ServiceKey::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?),
        environment: row.get(2)?,
        team: row.get(3)?,
        component_type: row.get(4)?,
        tags: parse_json_array(&row.get::<_, String>(5)?)?,
        tag_sources: parse_json_map(&row.get::<_, String>(6)?)?,
        external_calls: parse_json_map(&row.get::<_, String>(7)?)?,
        database_calls: parse_json_map(&row.get::<_, String>(8)?)?,
        rpc_calls: parse_json_map(&row.get::<_, String>(9)?)?,
        last_seen: parse_timestamp(&row.get::<_, String>(10)?)?,
    })
}

/// Convert a database row to a [`ServiceDependency`].
///
/// Expected columns: [`SERVICE_DEPS_COLUMNS`].
pub(crate) fn row_to_service_dependency(row: &rusqlite::Row) -> rusqlite::Result<ServiceDependency> {
    Ok(ServiceDependency {
        from_namespace: row.get(0)?,
        from_name: row.get(1)?,
        to_namespace: row.get(2)?,
        to_name: row.get(3)?,
        last_seen: parse_timestamp(&row.get::<_, String>(4)?)?,
    })
}

/// Convert a database row to a [`NamespaceDependency`].
///
/// Expected columns: [`NAMESPACE_DEPS_COLUMNS`].
pub(crate) fn row_to_namespace_dependency(
    row: &rusqlite::Row,
) -> rusqlite::Result<NamespaceDependency> {
    Ok(NamespaceDependency {
        from_namespace: row.get(0)?,
        to_namespace: row.get(1)?,
        dependency_type: row.get(2)?,
        description: row.get(3)?,
    })
}

/// Convert a database row to an [`AlertIncident`].
///
/// Expected columns: [`ALERTS_COLUMNS`].
pub(crate) fn row_to_alert(row: &rusqlite::Row) -> rusqlite::Result<AlertIncident> {
    let resolved_at: Option<String> = row.get(7)?;
    Ok(AlertIncident {
        service: ServiceKey::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?),
        severity: parse_severity(&row.get::<_, String>(2)?)?,
        status: parse_alert_status(&row.get::<_, String>(3)?)?,
        instance: row.get(4)?,
        message: row.get(5)?,
        started_at: parse_timestamp(&row.get::<_, String>(6)?)?,
        resolved_at: resolved_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_severity_rejects_unknown_values() {
        assert!(parse_severity("fatal").is_ok());
        assert!(parse_severity("urgent").is_err());
    }

    #[test]
    fn parse_alert_status_rejects_unknown_values() {
        assert_eq!(parse_alert_status("firing").unwrap(), AlertStatus::Firing);
        assert!(parse_alert_status("pending").is_err());
    }

    #[test]
    fn timestamp_round_trips() {
        let now = Utc::now();
        let parsed = parse_timestamp(&to_timestamp(&now)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn json_codecs_round_trip() {
        let tags = vec!["edge".to_string(), "db".to_string()];
        assert_eq!(parse_json_array(&to_json_array(&tags)).unwrap(), tags);

        let mut map = BTreeMap::new();
        map.insert("redis".to_string(), "cache".to_string());
        assert_eq!(parse_json_map(&to_json_map(&map)).unwrap(), map);
    }

    #[test]
    fn json_codecs_reject_mismatched_shapes() {
        assert!(parse_json_array("{}").is_err());
        assert!(parse_json_map("[1, 2]").is_err());
    }
}

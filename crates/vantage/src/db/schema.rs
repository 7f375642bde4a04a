//! Database schema definition for the topology store.

/// Database schema definition.
pub(crate) const SCHEMA: &str = r"
-- Monitored services, keyed by their natural key
CREATE TABLE IF NOT EXISTS services (
    namespace TEXT NOT NULL,
    name TEXT NOT NULL,
    environment TEXT,
    team TEXT,
    component_type TEXT,
    tags TEXT NOT NULL DEFAULT '[]',            -- JSON array of tag strings
    tag_sources TEXT NOT NULL DEFAULT '{}',     -- JSON object: tag -> source
    external_calls TEXT NOT NULL DEFAULT '{}',  -- JSON object: peer -> detail
    database_calls TEXT NOT NULL DEFAULT '{}',  -- JSON object: peer -> detail
    rpc_calls TEXT NOT NULL DEFAULT '{}',       -- JSON object: peer -> detail
    last_seen TEXT NOT NULL,
    PRIMARY KEY (namespace, name)
);

CREATE INDEX IF NOT EXISTS idx_services_namespace ON services(namespace);

-- Directed service-to-service dependency edges.
-- Endpoints should reference services rows; enforced at write time only,
-- so reads must tolerate unknown endpoints.
CREATE TABLE IF NOT EXISTS service_deps (
    from_namespace TEXT NOT NULL,
    from_name TEXT NOT NULL,
    to_namespace TEXT NOT NULL,
    to_name TEXT NOT NULL,
    last_seen TEXT NOT NULL,
    PRIMARY KEY (from_namespace, from_name, to_namespace, to_name)
);

CREATE INDEX IF NOT EXISTS idx_service_deps_from ON service_deps(from_namespace, from_name);
CREATE INDEX IF NOT EXISTS idx_service_deps_to ON service_deps(to_namespace, to_name);

-- Directed namespace-to-namespace dependency edges (static reference data)
CREATE TABLE IF NOT EXISTS namespace_deps (
    from_namespace TEXT NOT NULL,
    to_namespace TEXT NOT NULL,
    dependency_type TEXT,
    description TEXT,
    PRIMARY KEY (from_namespace, to_namespace)
);

-- Alert incidents; only status = 'firing' rows participate in graph builds
CREATE TABLE IF NOT EXISTS alerts (
    id INTEGER PRIMARY KEY,
    service_namespace TEXT NOT NULL,
    service_name TEXT NOT NULL,
    severity TEXT NOT NULL,
    status TEXT NOT NULL,
    instance TEXT,
    message TEXT,
    started_at TEXT NOT NULL,
    resolved_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_alerts_service ON alerts(service_namespace, service_name);
CREATE INDEX IF NOT EXISTS idx_alerts_firing ON alerts(status) WHERE status = 'firing';
";

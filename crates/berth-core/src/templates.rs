//! Ready-made Compose services.

use crate::compose::{BuildContext, ComposeService, RestartPolicy};
use crate::rows::{KeyValue, PortMapping, VolumeMount};

/// A preset service. Adding one to a project names it `<name>-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTemplate {
    /// Lookup key, e.g. `web-app`
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Base service name
    pub name: &'static str,
    pub image: &'static str,
    /// `(context, dockerfile)`; `None` falls back to `.` / `Dockerfile`
    pub build: Option<(&'static str, &'static str)>,
    /// `(host, container)` pairs
    pub ports: &'static [(&'static str, &'static str)],
    pub environment: &'static [(&'static str, &'static str)],
    /// `(host, container)` pairs
    pub volumes: &'static [(&'static str, &'static str)],
    pub networks: &'static [&'static str],
    pub restart: Option<RestartPolicy>,
}

pub const WEB_APP: ServiceTemplate = ServiceTemplate {
    key: "web-app",
    label: "Web App",
    name: "web",
    image: "node:alpine",
    build: Some((".", "Dockerfile")),
    ports: &[("3000", "3000")],
    environment: &[("NODE_ENV", "production")],
    volumes: &[("./app", "/app")],
    networks: &["app-network"],
    restart: Some(RestartPolicy::UnlessStopped),
};

pub const DATABASE: ServiceTemplate = ServiceTemplate {
    key: "database",
    label: "Database",
    name: "db",
    image: "postgres:latest",
    build: None,
    ports: &[("5432", "5432")],
    environment: &[
        ("POSTGRES_DB", "mydb"),
        ("POSTGRES_USER", "user"),
        ("POSTGRES_PASSWORD", "password"),
    ],
    volumes: &[("db-data", "/var/lib/postgresql/data")],
    networks: &["app-network"],
    restart: Some(RestartPolicy::UnlessStopped),
};

pub const CACHE: ServiceTemplate = ServiceTemplate {
    key: "cache",
    label: "Cache",
    name: "redis",
    image: "redis:alpine",
    build: Some((".", "Dockerfile")),
    ports: &[("6379", "6379")],
    environment: &[],
    volumes: &[("redis-data", "/data")],
    networks: &["app-network"],
    restart: Some(RestartPolicy::UnlessStopped),
};

pub const ALL: [&ServiceTemplate; 3] = [&WEB_APP, &DATABASE, &CACHE];

/// Look a template up by key or label, ignoring ASCII case.
pub fn find(query: &str) -> Option<&'static ServiceTemplate> {
    ALL.into_iter()
        .find(|t| t.key.eq_ignore_ascii_case(query) || t.label.eq_ignore_ascii_case(query))
}

impl ServiceTemplate {
    /// Build the service for position `ordinal` (1-based) in a project.
    pub fn instantiate(&self, ordinal: usize) -> ComposeService {
        let build = match self.build {
            Some((context, dockerfile)) => BuildContext::new(context, dockerfile),
            None => BuildContext::project_root(),
        };
        ComposeService {
            name: format!("{}-{ordinal}", self.name),
            image: self.image.to_owned(),
            build,
            ports: self
                .ports
                .iter()
                .map(|(host, container)| PortMapping::new(*host, *container))
                .collect(),
            environment: self
                .environment
                .iter()
                .map(|(key, value)| KeyValue::new(*key, *value))
                .collect(),
            volumes: self
                .volumes
                .iter()
                .map(|(host, container)| VolumeMount::new(*host, *container))
                .collect(),
            depends_on: Vec::new(),
            networks: self.networks.iter().map(|n| (*n).to_owned()).collect(),
            restart: self.restart,
            privileged: false,
        }
    }
}

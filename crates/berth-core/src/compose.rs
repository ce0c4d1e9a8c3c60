use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rows::{self, KeyValue, PortMapping, Qualifies, Row, RowKind, VolumeMount};
use crate::templates::ServiceTemplate;

/// Input model for a `docker-compose.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComposeProject {
    /// Project name (informational; the artifact is always `docker-compose.yml`)
    pub project_name: String,
    pub version: ComposeVersion,
    pub services: Vec<ComposeService>,
    pub networks: Vec<Network>,
    pub volumes: Vec<NamedVolume>,
}

/// Compose file format versions offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ComposeVersion {
    #[default]
    #[serde(rename = "3.8")]
    V3_8,
    #[serde(rename = "3.7")]
    V3_7,
    #[serde(rename = "3.6")]
    V3_6,
    #[serde(rename = "3")]
    V3,
    #[serde(rename = "2.4")]
    V2_4,
}

impl ComposeVersion {
    pub const ALL: [ComposeVersion; 5] = [
        ComposeVersion::V3_8,
        ComposeVersion::V3_7,
        ComposeVersion::V3_6,
        ComposeVersion::V3,
        ComposeVersion::V2_4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComposeVersion::V3_8 => "3.8",
            ComposeVersion::V3_7 => "3.7",
            ComposeVersion::V3_6 => "3.6",
            ComposeVersion::V3 => "3",
            ComposeVersion::V2_4 => "2.4",
        }
    }
}

impl fmt::Display for ComposeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    No,
    Always,
    OnFailure,
    UnlessStopped,
}

impl RestartPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RestartPolicy::No => "no",
            RestartPolicy::Always => "always",
            RestartPolicy::OnFailure => "on-failure",
            RestartPolicy::UnlessStopped => "unless-stopped",
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One service entry.
///
/// `depends_on` and `networks` name other services and networks by string;
/// dangling names are legal and emitted as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComposeService {
    pub name: String,
    pub image: String,
    pub build: BuildContext,
    pub ports: Vec<PortMapping>,
    pub environment: Vec<KeyValue>,
    pub volumes: Vec<VolumeMount>,
    pub depends_on: Vec<String>,
    pub networks: Vec<String>,
    pub restart: Option<RestartPolicy>,
    pub privileged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BuildContext {
    pub context: String,
    pub dockerfile: String,
}

impl BuildContext {
    pub fn new(context: impl Into<String>, dockerfile: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            dockerfile: dockerfile.into(),
        }
    }

    /// `.` with the default `Dockerfile`.
    pub fn project_root() -> Self {
        Self::new(".", "Dockerfile")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Network {
    pub name: String,
    pub driver: String,
}

impl Network {
    pub fn new(name: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
        }
    }
}

impl Qualifies for Network {
    fn qualifies(&self) -> bool {
        !self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NamedVolume {
    pub name: String,
    pub driver: String,
}

impl NamedVolume {
    pub fn new(name: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
        }
    }
}

impl Qualifies for NamedVolume {
    fn qualifies(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Qualifies for ComposeService {
    fn qualifies(&self) -> bool {
        !self.name.is_empty()
    }
}

impl ComposeService {
    /// A service as added by the "add service" action: builds from `.`,
    /// one blank port/environment/volume row, `unless-stopped`.
    pub fn blank() -> Self {
        Self {
            build: BuildContext::project_root(),
            ports: vec![PortMapping::default()],
            environment: vec![KeyValue::default()],
            volumes: vec![VolumeMount::default()],
            restart: Some(RestartPolicy::UnlessStopped),
            ..Self::default()
        }
    }

    /// New snapshot with `row` appended.
    ///
    /// Services only hold ports, environment, and volumes; other rows return
    /// an unchanged copy.
    pub fn with_row(&self, row: Row) -> Self {
        let mut next = self.clone();
        match row {
            Row::Port(row) => next.ports = rows::add_row(&self.ports, row),
            Row::Environment(row) => next.environment = rows::add_row(&self.environment, row),
            Row::Volume(row) => next.volumes = rows::add_row(&self.volumes, row),
            other => {
                tracing::debug!(kind = %other.kind(), "compose services have no such collection");
            }
        }
        next
    }

    pub fn with_row_added(&self, kind: RowKind) -> Self {
        self.with_row(kind.empty_row())
    }

    pub fn with_row_removed(&self, kind: RowKind, index: usize) -> Self {
        let mut next = self.clone();
        match kind {
            RowKind::Ports => next.ports = rows::remove_row(&self.ports, index),
            RowKind::Environment => next.environment = rows::remove_row(&self.environment, index),
            RowKind::Volumes => next.volumes = rows::remove_row(&self.volumes, index),
            other => {
                tracing::debug!(kind = %other, "compose services have no such collection");
            }
        }
        next
    }
}

impl ComposeProject {
    /// Starting point of an editing session: version 3.8, no services, one
    /// blank `bridge` network and one blank `local` volume.
    pub fn skeleton() -> Self {
        Self {
            networks: vec![Network::new("", "bridge")],
            volumes: vec![NamedVolume::new("", "local")],
            ..Self::default()
        }
    }

    pub fn with_service_added(&self) -> Self {
        let mut next = self.clone();
        next.services = rows::add_row(&self.services, ComposeService::blank());
        next
    }

    /// Append a service built from `template`, named `<template>-<n>` where
    /// `n` is the new service count.
    pub fn with_service_from_template(&self, template: &ServiceTemplate) -> Self {
        let ordinal = self.services.len() + 1;
        let mut next = self.clone();
        next.services = rows::add_row(&self.services, template.instantiate(ordinal));
        next
    }

    pub fn with_service_removed(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.services = rows::remove_row(&self.services, index);
        next
    }

    /// Swap the service at `index` for `service`; out of range is a no-op.
    pub fn with_service_replaced(&self, index: usize, service: ComposeService) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.services.get_mut(index) {
            *slot = service;
        }
        next
    }

    pub fn with_network_added(&self) -> Self {
        let mut next = self.clone();
        next.networks = rows::add_row(&self.networks, Network::new("", "bridge"));
        next
    }

    pub fn with_volume_added(&self) -> Self {
        let mut next = self.clone();
        next.volumes = rows::add_row(&self.volumes, NamedVolume::new("", "local"));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    #[test]
    fn skeleton_has_blank_network_and_volume() {
        let project = ComposeProject::skeleton();
        assert_eq!(project.version, ComposeVersion::V3_8);
        assert!(project.services.is_empty());
        assert_eq!(project.networks, vec![Network::new("", "bridge")]);
        assert_eq!(project.volumes, vec![NamedVolume::new("", "local")]);
    }

    #[test]
    fn blank_service_defaults() {
        let service = ComposeService::blank();
        assert!(service.name.is_empty());
        assert_eq!(service.build, BuildContext::new(".", "Dockerfile"));
        assert_eq!(service.ports.len(), 1);
        assert_eq!(service.environment.len(), 1);
        assert_eq!(service.volumes.len(), 1);
        assert_eq!(service.restart, Some(RestartPolicy::UnlessStopped));
        assert!(!service.privileged);
    }

    #[test]
    fn service_ignores_build_only_rows() {
        let service = ComposeService::blank();
        let next = service.with_row_added(RowKind::Labels);
        assert_eq!(next, service);
    }

    #[test]
    fn service_row_edits_replace_collections() {
        let service = ComposeService::blank()
            .with_row(Row::Port(PortMapping::new("", "80")))
            .with_row_removed(RowKind::Ports, 0);
        assert_eq!(service.ports, vec![PortMapping::new("", "80")]);
    }

    #[test]
    fn template_services_are_numbered() {
        let project = ComposeProject::skeleton()
            .with_service_added()
            .with_service_from_template(&templates::DATABASE);
        assert_eq!(project.services.len(), 2);
        assert_eq!(project.services[1].name, "db-2");
    }

    #[test]
    fn replace_out_of_range_is_noop() {
        let project = ComposeProject::default();
        let next = project.with_service_replaced(3, ComposeService::blank());
        assert_eq!(next, project);
    }

    #[test]
    fn version_serializes_as_string() {
        let json = serde_json::to_string(&ComposeVersion::V2_4).unwrap();
        assert_eq!(json, "\"2.4\"");
        let parsed: ComposeVersion = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(parsed, ComposeVersion::V3);
    }

    #[test]
    fn version_display_matches_serialized_form() {
        for version in ComposeVersion::ALL {
            let json = serde_json::to_string(&version).unwrap();
            assert_eq!(json, format!("\"{version}\""));
        }
    }

    #[test]
    fn restart_policy_is_kebab_case() {
        let json = serde_json::to_string(&RestartPolicy::UnlessStopped).unwrap();
        assert_eq!(json, "\"unless-stopped\"");
    }
}

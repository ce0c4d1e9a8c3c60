use berth_core::rows::{any_qualifying, qualifying};
use berth_core::{ComposeProject, ComposeService, RestartPolicy};

/// Renders a [`ComposeProject`] into `docker-compose.yml` text.
///
/// Output is built line by line with two-space indentation rather than
/// through a YAML serializer so that key order and quoting stay fixed.
pub struct ComposeGenerator<'a> {
    project: &'a ComposeProject,
}

impl<'a> ComposeGenerator<'a> {
    pub fn new(project: &'a ComposeProject) -> Self {
        Self { project }
    }

    pub fn render(&self) -> String {
        let p = self.project;
        let mut out = format!("version: \"{}\"\n\n", p.version);

        out.push_str("services:\n");
        for service in qualifying(&p.services) {
            render_service(&mut out, service);
        }

        if any_qualifying(&p.networks) {
            out.push_str("networks:\n");
            for network in qualifying(&p.networks) {
                render_named(&mut out, &network.name, &network.driver);
            }
        }

        if any_qualifying(&p.volumes) {
            out.push_str("\nvolumes:\n");
            for volume in qualifying(&p.volumes) {
                render_named(&mut out, &volume.name, &volume.driver);
            }
        }

        tracing::debug!(
            services = p.services.len(),
            bytes = out.len(),
            "rendered compose file"
        );
        out
    }
}

fn render_service(out: &mut String, service: &ComposeService) {
    line(out, 1, &format!("{}:", service.name));

    if !service.image.is_empty() {
        line(out, 2, &format!("image: {}", service.image));
    }

    if !service.build.context.is_empty() {
        line(out, 2, "build:");
        line(out, 3, &format!("context: {}", service.build.context));
        line(out, 3, &format!("dockerfile: {}", service.build.dockerfile));
    }

    list(
        out,
        "ports",
        qualifying(&service.ports)
            .map(|port| format!("\"{}:{}\"", port.published_host(), port.container)),
    );
    list(
        out,
        "environment",
        qualifying(&service.environment).map(|env| format!("{}={}", env.key, env.value)),
    );
    list(
        out,
        "volumes",
        qualifying(&service.volumes).map(|vol| format!("{}:{}", vol.source(), vol.container)),
    );
    list(out, "depends_on", qualifying(&service.depends_on).cloned());
    list(out, "networks", qualifying(&service.networks).cloned());

    if service.privileged {
        line(out, 2, "privileged: true");
    }

    if let Some(policy) = service.restart {
        line(out, 2, &format!("restart: {}", restart_value(policy)));
    }

    out.push('\n');
}

/// Top-level network or volume entry.
fn render_named(out: &mut String, name: &str, driver: &str) {
    line(out, 1, &format!("{name}:"));
    if !driver.is_empty() {
        line(out, 2, &format!("driver: {driver}"));
    }
}

/// A service-level sequence; the key is omitted when there are no items.
fn list(out: &mut String, key: &str, items: impl Iterator<Item = String>) {
    let mut items = items.peekable();
    if items.peek().is_none() {
        return;
    }
    line(out, 2, &format!("{key}:"));
    for item in items {
        line(out, 3, &format!("- {item}"));
    }
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

// Bare `no` is a YAML 1.1 boolean.
fn restart_value(policy: RestartPolicy) -> String {
    match policy {
        RestartPolicy::No => "\"no\"".to_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::{KeyValue, PortMapping, VolumeMount};

    #[test]
    fn line_indents_two_spaces_per_level() {
        let mut out = String::new();
        line(&mut out, 3, "- a");
        assert_eq!(out, "      - a\n");
    }

    #[test]
    fn list_skips_key_without_items() {
        let mut out = String::new();
        list(&mut out, "ports", std::iter::empty());
        assert!(out.is_empty());
    }

    #[test]
    fn restart_no_is_quoted() {
        assert_eq!(restart_value(RestartPolicy::No), "\"no\"");
        assert_eq!(restart_value(RestartPolicy::Always), "always");
    }

    // ── Property-based tests ──

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn word() -> impl Strategy<Value = String> {
            "[a-z0-9]{0,6}"
        }

        fn service() -> impl Strategy<Value = ComposeService> {
            (
                word(),
                proptest::collection::vec((word(), word()), 0..4),
                proptest::collection::vec((word(), word()), 0..4),
                proptest::collection::vec((word(), word()), 0..4),
            )
                .prop_map(|(name, ports, env, volumes)| ComposeService {
                    name,
                    ports: ports.into_iter().map(|(h, c)| PortMapping::new(h, c)).collect(),
                    environment: env.into_iter().map(|(k, v)| KeyValue::new(k, v)).collect(),
                    volumes: volumes
                        .into_iter()
                        .map(|(h, c)| VolumeMount::new(h, c))
                        .collect(),
                    ..Default::default()
                })
        }

        proptest! {
            #[test]
            fn render_is_deterministic(services in proptest::collection::vec(service(), 0..4)) {
                let project = ComposeProject { services, ..Default::default() };
                let first = ComposeGenerator::new(&project).render();
                let second = ComposeGenerator::new(&project).render();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn always_starts_with_version_header(services in proptest::collection::vec(service(), 0..4)) {
                let project = ComposeProject { services, ..Default::default() };
                let output = ComposeGenerator::new(&project).render();
                prop_assert!(output.starts_with("version: \"3.8\"\n\nservices:\n"));
            }

            #[test]
            fn unnamed_services_contribute_nothing(service in service()) {
                let unnamed = ComposeService { name: String::new(), ..service };
                let project = ComposeProject { services: vec![unnamed], ..Default::default() };
                let output = ComposeGenerator::new(&project).render();
                prop_assert_eq!(output, "version: \"3.8\"\n\nservices:\n");
            }

            #[test]
            fn every_port_line_has_a_host(ports in proptest::collection::vec((word(), word()), 0..6)) {
                let service = ComposeService {
                    name: "svc".to_owned(),
                    ports: ports.into_iter().map(|(h, c)| PortMapping::new(h, c)).collect(),
                    ..Default::default()
                };
                let project = ComposeProject { services: vec![service], ..Default::default() };
                let output = ComposeGenerator::new(&project).render();
                for port_line in output.lines().filter(|l| l.starts_with("      - \"")) {
                    prop_assert!(!port_line.contains("\":"), "blank host in {}", port_line);
                    prop_assert!(!port_line.contains("\"\""));
                }
            }
        }
    }
}

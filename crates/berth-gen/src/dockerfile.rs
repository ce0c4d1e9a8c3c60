use berth_core::BuildConfig;
use berth_core::rows::qualifying;

/// Renders a [`BuildConfig`] into a single-stage Dockerfile.
///
/// Sections are emitted in a fixed order, each as a `#` comment header
/// followed by its instructions. Sections with nothing to emit are skipped
/// entirely, so an empty config renders to an empty string.
pub struct DockerfileGenerator<'a> {
    config: &'a BuildConfig,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    pub fn render(&self) -> String {
        let c = self.config;

        let sections = [
            Section::new(
                "Base image",
                c.complete_base_image().map(|image| format!("FROM {image}")),
            ),
            Section::new(
                "Build arguments",
                qualifying(&c.args).map(|arg| format!("ARG {}={}", arg.key, arg.value)),
            ),
            Section::new(
                "Labels",
                qualifying(&c.labels).map(|label| format!("LABEL {}=\"{}\"", label.key, label.value)),
            ),
            Section::new(
                "Environment variables",
                qualifying(&c.environment).map(|env| format!("ENV {}={}", env.key, env.value)),
            ),
            Section::new(
                "Set working directory",
                non_empty(&c.work_dir).map(|dir| format!("WORKDIR {dir}")),
            ),
            Section::new("Set user", non_empty(&c.user).map(|user| format!("USER {user}"))),
            Section::new(
                "Copy files",
                qualifying(&c.copy_files)
                    .map(|file| format!("COPY {} {}", file.source, file.destination)),
            ),
            Section::new(
                "Run commands",
                qualifying(&c.commands).map(|cmd| format!("{} {}", cmd.instruction, cmd.command)),
            ),
            Section::new(
                "Set volumes",
                qualifying(&c.volumes).map(|vol| format!("VOLUME {}", vol.container)),
            ),
            Section::new(
                "Expose ports",
                qualifying(&c.ports).map(|port| format!("EXPOSE {}", port.container)),
            ),
            Section::new(
                "Set entrypoint",
                non_empty(&c.entrypoint).map(|ep| format!("ENTRYPOINT {ep}")),
            ),
            // Always last, after ENTRYPOINT.
            Section::new(
                "Post-build commands",
                qualifying(&c.post_build_commands).map(|cmd| format!("RUN {}", cmd.command)),
            ),
        ];

        let rendered: Vec<String> = sections
            .iter()
            .filter(|section| !section.lines.is_empty())
            .map(Section::render)
            .collect();

        tracing::debug!(sections = rendered.len(), "rendered Dockerfile");
        rendered.join("\n")
    }
}

/// A commented block of instructions.
struct Section {
    header: &'static str,
    lines: Vec<String>,
}

impl Section {
    fn new(header: &'static str, lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            header,
            lines: lines.into_iter().collect(),
        }
    }

    /// Header, instructions, and the trailing newline of the last line.
    fn render(&self) -> String {
        let mut out = format!("# {}\n", self.header);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

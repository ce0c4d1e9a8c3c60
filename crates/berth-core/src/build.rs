use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rows::{self, KeyValue, PortMapping, Qualifies, Row, RowKind, VolumeMount};

/// Input model for a single-stage Dockerfile.
///
/// Empty strings mean "unset" and empty collections are legal: the generator
/// skips whatever is missing instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BuildConfig {
    /// Project name; only used to name the downloaded artifact
    pub project_name: String,
    /// Base image, picked from the catalog or entered by hand
    pub base_image: Option<BaseImage>,
    pub work_dir: String,
    pub user: String,
    /// Build arguments (`ARG`)
    pub args: Vec<KeyValue>,
    /// Image labels (`LABEL`)
    pub labels: Vec<KeyValue>,
    /// Environment variables (`ENV`)
    pub environment: Vec<KeyValue>,
    pub copy_files: Vec<CopyRule>,
    /// Primary instruction block, each row with its own keyword
    pub commands: Vec<BuildCommand>,
    /// `RUN` commands appended after everything else
    pub post_build_commands: Vec<PostBuildCommand>,
    /// Volumes; the host side is informational and never emitted
    pub volumes: Vec<VolumeMount>,
    /// Exposed ports; the host side is informational and never emitted
    pub ports: Vec<PortMapping>,
    pub entrypoint: String,
}

/// Where the base image selection came from. The two modes are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum BaseImage {
    /// Picked from [`crate::catalog`]
    Catalog(ImageRef),
    /// Typed in by the user
    Custom(ImageRef),
}

impl BaseImage {
    pub fn image(&self) -> &ImageRef {
        match self {
            BaseImage::Catalog(image) | BaseImage::Custom(image) => image,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Both name and tag are present.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.tag.is_empty()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

/// Instruction keywords allowed in the primary commands block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Instruction {
    #[default]
    #[serde(rename = "RUN")]
    Run,
    #[serde(rename = "CMD")]
    Cmd,
    #[serde(rename = "SHELL")]
    Shell,
    #[serde(rename = "HEALTHCHECK")]
    Healthcheck,
    #[serde(rename = "ONBUILD")]
    Onbuild,
    #[serde(rename = "STOPSIGNAL")]
    Stopsignal,
}

impl Instruction {
    pub fn as_str(self) -> &'static str {
        match self {
            Instruction::Run => "RUN",
            Instruction::Cmd => "CMD",
            Instruction::Shell => "SHELL",
            Instruction::Healthcheck => "HEALTHCHECK",
            Instruction::Onbuild => "ONBUILD",
            Instruction::Stopsignal => "STOPSIGNAL",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BuildCommand {
    #[serde(rename = "type")]
    pub instruction: Instruction,
    pub command: String,
}

impl BuildCommand {
    pub fn new(instruction: Instruction, command: impl Into<String>) -> Self {
        Self {
            instruction,
            command: command.into(),
        }
    }

    pub fn run(command: impl Into<String>) -> Self {
        Self::new(Instruction::Run, command)
    }
}

impl Qualifies for BuildCommand {
    fn qualifies(&self) -> bool {
        !self.command.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CopyRule {
    pub source: String,
    pub destination: String,
}

impl CopyRule {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl Qualifies for CopyRule {
    fn qualifies(&self) -> bool {
        !self.source.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PostBuildCommand {
    pub command: String,
}

impl PostBuildCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Qualifies for PostBuildCommand {
    fn qualifies(&self) -> bool {
        !self.command.is_empty()
    }
}

impl BuildConfig {
    /// The model a fresh editing session starts from: `/app` as working
    /// directory, port 3000, and one blank row in every other collection.
    pub fn skeleton() -> Self {
        Self {
            work_dir: "/app".to_owned(),
            ports: vec![PortMapping::new("3000", "3000")],
            environment: vec![KeyValue::default()],
            volumes: vec![VolumeMount::default()],
            commands: vec![BuildCommand::default()],
            labels: vec![KeyValue::default()],
            args: vec![KeyValue::default()],
            copy_files: vec![CopyRule::default()],
            post_build_commands: vec![PostBuildCommand::default()],
            ..Self::default()
        }
    }

    /// New snapshot with `row` appended to the collection it belongs to.
    pub fn with_row(&self, row: Row) -> Self {
        let mut next = self.clone();
        match row {
            Row::Port(row) => next.ports = rows::add_row(&self.ports, row),
            Row::Environment(row) => next.environment = rows::add_row(&self.environment, row),
            Row::Volume(row) => next.volumes = rows::add_row(&self.volumes, row),
            Row::Command(row) => next.commands = rows::add_row(&self.commands, row),
            Row::Label(row) => next.labels = rows::add_row(&self.labels, row),
            Row::Arg(row) => next.args = rows::add_row(&self.args, row),
            Row::CopyFile(row) => next.copy_files = rows::add_row(&self.copy_files, row),
            Row::PostBuildCommand(row) => {
                next.post_build_commands = rows::add_row(&self.post_build_commands, row)
            }
        }
        next
    }

    /// New snapshot with a blank row of `kind` appended.
    pub fn with_row_added(&self, kind: RowKind) -> Self {
        self.with_row(kind.empty_row())
    }

    /// New snapshot without row `index` of `kind`.
    pub fn with_row_removed(&self, kind: RowKind, index: usize) -> Self {
        let mut next = self.clone();
        match kind {
            RowKind::Ports => next.ports = rows::remove_row(&self.ports, index),
            RowKind::Environment => next.environment = rows::remove_row(&self.environment, index),
            RowKind::Volumes => next.volumes = rows::remove_row(&self.volumes, index),
            RowKind::Commands => next.commands = rows::remove_row(&self.commands, index),
            RowKind::Labels => next.labels = rows::remove_row(&self.labels, index),
            RowKind::Args => next.args = rows::remove_row(&self.args, index),
            RowKind::CopyFiles => next.copy_files = rows::remove_row(&self.copy_files, index),
            RowKind::PostBuildCommands => {
                next.post_build_commands = rows::remove_row(&self.post_build_commands, index)
            }
        }
        next
    }

    /// The base image, if one is selected and both name and tag are filled in.
    pub fn complete_base_image(&self) -> Option<&ImageRef> {
        self.base_image
            .as_ref()
            .map(BaseImage::image)
            .filter(|image| image.is_complete())
    }
}

//! Row types shared by the Dockerfile and Compose models, and the
//! whole-collection edit helpers used by form-style editors.
//!
//! Every collection in the model is edited by value: [`add_row`] and
//! [`remove_row`] return a new `Vec` and never touch the input slice.
//! A row only contributes to generated output when it [`Qualifies`].

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::build::{BuildCommand, CopyRule, PostBuildCommand};

/// Whether a row carries the field that makes it emittable.
///
/// Rows failing this check are dropped silently by the generators.
pub trait Qualifies {
    fn qualifies(&self) -> bool;
}

impl Qualifies for String {
    fn qualifies(&self) -> bool {
        !self.is_empty()
    }
}

/// Iterate the rows of `rows` that qualify, in input order.
pub fn qualifying<T: Qualifies>(rows: &[T]) -> impl Iterator<Item = &T> {
    rows.iter().filter(|row| row.qualifies())
}

/// `true` when at least one row qualifies.
pub fn any_qualifying<T: Qualifies>(rows: &[T]) -> bool {
    rows.iter().any(Qualifies::qualifies)
}

/// A `key=value` pair: build arguments, labels, environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Qualifies for KeyValue {
    fn qualifies(&self) -> bool {
        !self.key.is_empty()
    }
}

/// A host/container port pair.
///
/// The Dockerfile generator only ever reads `container`; the host side is
/// used by Compose, where a blank host falls back to the container port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PortMapping {
    pub host: String,
    pub container: String,
}

impl PortMapping {
    pub fn new(host: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
        }
    }

    /// Host port to publish on, defaulting to the container port.
    pub fn published_host(&self) -> &str {
        if self.host.is_empty() {
            &self.container
        } else {
            &self.host
        }
    }
}

impl Qualifies for PortMapping {
    fn qualifies(&self) -> bool {
        !self.container.is_empty()
    }
}

/// A host path (or named volume) mounted at a container path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VolumeMount {
    pub host: String,
    pub container: String,
}

impl VolumeMount {
    pub fn new(host: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
        }
    }

    /// Mount source, defaulting to the project directory (`.`).
    pub fn source(&self) -> &str {
        if self.host.is_empty() { "." } else { &self.host }
    }
}

impl Qualifies for VolumeMount {
    fn qualifies(&self) -> bool {
        !self.container.is_empty()
    }
}

/// The editable collections of the Dockerfile and Compose models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Ports,
    Environment,
    Volumes,
    Commands,
    Labels,
    Args,
    CopyFiles,
    PostBuildCommands,
}

impl RowKind {
    pub const ALL: [RowKind; 8] = [
        RowKind::Ports,
        RowKind::Environment,
        RowKind::Volumes,
        RowKind::Commands,
        RowKind::Labels,
        RowKind::Args,
        RowKind::CopyFiles,
        RowKind::PostBuildCommands,
    ];

    /// The blank row appended when a user adds an entry of this kind.
    pub fn empty_row(self) -> Row {
        match self {
            RowKind::Ports => Row::Port(PortMapping::default()),
            RowKind::Environment => Row::Environment(KeyValue::default()),
            RowKind::Volumes => Row::Volume(VolumeMount::default()),
            RowKind::Commands => Row::Command(BuildCommand::default()),
            RowKind::Labels => Row::Label(KeyValue::default()),
            RowKind::Args => Row::Arg(KeyValue::default()),
            RowKind::CopyFiles => Row::CopyFile(CopyRule::default()),
            RowKind::PostBuildCommands => Row::PostBuildCommand(PostBuildCommand::default()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Ports => "ports",
            RowKind::Environment => "environment",
            RowKind::Volumes => "volumes",
            RowKind::Commands => "commands",
            RowKind::Labels => "labels",
            RowKind::Args => "args",
            RowKind::CopyFiles => "copy_files",
            RowKind::PostBuildCommands => "post_build_commands",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single row, tagged with the collection it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Port(PortMapping),
    Environment(KeyValue),
    Volume(VolumeMount),
    Command(BuildCommand),
    Label(KeyValue),
    Arg(KeyValue),
    CopyFile(CopyRule),
    PostBuildCommand(PostBuildCommand),
}

impl Row {
    pub fn kind(&self) -> RowKind {
        match self {
            Row::Port(_) => RowKind::Ports,
            Row::Environment(_) => RowKind::Environment,
            Row::Volume(_) => RowKind::Volumes,
            Row::Command(_) => RowKind::Commands,
            Row::Label(_) => RowKind::Labels,
            Row::Arg(_) => RowKind::Args,
            Row::CopyFile(_) => RowKind::CopyFiles,
            Row::PostBuildCommand(_) => RowKind::PostBuildCommands,
        }
    }
}

/// Return a copy of `rows` with `row` appended.
pub fn add_row<T: Clone>(rows: &[T], row: T) -> Vec<T> {
    let mut next = Vec::with_capacity(rows.len() + 1);
    next.extend_from_slice(rows);
    next.push(row);
    next
}

/// Return a copy of `rows` without the entry at `index`.
///
/// An out-of-range index yields an unchanged copy.
pub fn remove_row<T: Clone>(rows: &[T], index: usize) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, row)| row.clone())
        .collect()
}

//! Configuration model for berth.
//!
//! This crate defines the two generator inputs, [`BuildConfig`] for a
//! Dockerfile and [`ComposeProject`] for a `docker-compose.yml`, the
//! whole-collection row helpers in [`rows`], the curated base image
//! [`catalog`], Compose service [`templates`], and the `berth.toml` schema
//! ([`BerthConfig`]).

pub mod build;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod rows;
pub mod templates;

pub use build::{
    BaseImage, BuildCommand, BuildConfig, CopyRule, ImageRef, Instruction, PostBuildCommand,
};
pub use compose::{
    BuildContext, ComposeProject, ComposeService, ComposeVersion, NamedVolume, Network,
    RestartPolicy,
};
pub use config::BerthConfig;
pub use error::{Error, Result};
pub use rows::{KeyValue, PortMapping, Qualifies, Row, RowKind, VolumeMount};

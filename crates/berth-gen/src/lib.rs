//! Dockerfile and docker-compose.yml generation for berth.
//!
//! # Pipeline
//!
//! ```text
//! berth.toml ──▶ BerthConfig
//!   [dockerfile] ── DockerfileGenerator::render() ──▶ Dockerfile[_<name>]
//!   [compose]    ── ComposeGenerator::render()    ──▶ docker-compose.yml
//!                   ReadmeGenerator::render()     ──▶ README.md (optional)
//! ```
//!
//! Generators are pure: the whole text is recomputed from the model on every
//! call, and incomplete rows are skipped rather than reported. Only
//! [`artifact::Artifact::write_to`] touches the filesystem.

pub mod artifact;
pub mod compose;
pub mod dockerfile;
pub mod readme;

pub use artifact::{Artifact, ArtifactError};
pub use compose::ComposeGenerator;
pub use dockerfile::DockerfileGenerator;
pub use readme::ReadmeGenerator;

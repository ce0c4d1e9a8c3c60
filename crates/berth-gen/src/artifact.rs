use std::path::{Path, PathBuf};

use berth_core::{BuildConfig, ComposeProject};

use crate::compose::ComposeGenerator;
use crate::dockerfile::DockerfileGenerator;
use crate::readme::ReadmeGenerator;

pub const DOCKERFILE_CONTENT_TYPE: &str = "application/x-docker";
pub const COMPOSE_CONTENT_TYPE: &str = "text/yaml";
pub const README_CONTENT_TYPE: &str = "text/markdown";

pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// A generated file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub contents: String,
}

impl Artifact {
    pub fn dockerfile(config: &BuildConfig) -> Self {
        Self {
            file_name: dockerfile_name(&config.project_name),
            content_type: DOCKERFILE_CONTENT_TYPE,
            contents: DockerfileGenerator::new(config).render(),
        }
    }

    pub fn compose(project: &ComposeProject) -> Self {
        Self {
            file_name: COMPOSE_FILE_NAME.to_owned(),
            content_type: COMPOSE_CONTENT_TYPE,
            contents: ComposeGenerator::new(project).render(),
        }
    }

    pub fn readme(config: &BuildConfig) -> Self {
        Self {
            file_name: "README.md".to_owned(),
            content_type: README_CONTENT_TYPE,
            contents: ReadmeGenerator::new(config).render(),
        }
    }

    /// Target path inside `dir`, or `AlreadyExists` when a file is already
    /// there and `overwrite` is not set. Touches nothing on disk.
    pub fn check_writable(&self, dir: &Path, overwrite: bool) -> Result<PathBuf, ArtifactError> {
        let path = dir.join(&self.file_name);
        if path.exists() && !overwrite {
            return Err(ArtifactError::AlreadyExists(path));
        }
        Ok(path)
    }

    /// Write the artifact into `dir` under its file name.
    ///
    /// Refuses to replace an existing file unless `overwrite` is set.
    pub fn write_to(&self, dir: &Path, overwrite: bool) -> Result<PathBuf, ArtifactError> {
        let path = self.check_writable(dir, overwrite)?;
        std::fs::create_dir_all(dir).map_err(|e| ArtifactError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

        std::fs::write(&path, &self.contents).map_err(|e| ArtifactError::Write {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), bytes = self.contents.len(), "wrote artifact");
        Ok(path)
    }
}

/// Write every artifact into `dir`, or none of them: all target paths are
/// checked before the first file is written.
pub fn write_all(
    artifacts: &[Artifact],
    dir: &Path,
    overwrite: bool,
) -> Result<Vec<PathBuf>, ArtifactError> {
    for artifact in artifacts {
        artifact.check_writable(dir, overwrite)?;
    }
    artifacts
        .iter()
        .map(|artifact| artifact.write_to(dir, overwrite))
        .collect()
}

/// `Dockerfile`, or `Dockerfile_<sanitized project name>` when a name is set.
pub fn dockerfile_name(project_name: &str) -> String {
    if project_name.is_empty() {
        "Dockerfile".to_owned()
    } else {
        format!("Dockerfile_{}", sanitize_project_name(project_name))
    }
}

/// Replace every character that is not an ASCII letter or digit with `_`.
pub fn sanitize_project_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} already exists; pass --force to overwrite")]
    AlreadyExists(PathBuf),
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Base image catalog ──
    #[error("'{name}' is not in the base image catalog")]
    UnknownCatalogImage { name: String },

    #[error(
        "tag '{tag}' is not offered for '{name}'; choose one of: {}",
        allowed.join(", ")
    )]
    UnsupportedTag {
        name: String,
        tag: String,
        allowed: Vec<String>,
    },
}

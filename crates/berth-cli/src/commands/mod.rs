mod catalog;
mod compose;
mod dockerfile;
mod init;
pub(crate) mod mcp;
mod templates;

use std::path::{Path, PathBuf};

use berth_core::{BaseImage, BerthConfig, BuildConfig};
use clap::Args;

pub use catalog::catalog;
pub use compose::compose;
pub use dockerfile::dockerfile;
pub use init::init_project;
pub use templates::templates;

/// Starter berth.toml written by `berth init`.
pub(crate) const BERTH_TOML_TEMPLATE: &str = r#"# Inputs for `berth dockerfile` and `berth compose`.
# Rows with an empty key, source, command, or container path are skipped.

[dockerfile]
# project_name = "my-app"   # output becomes Dockerfile_my_app
base_image = { source = "catalog", name = "node", tag = "18-alpine" }
work_dir = "/app"
# user = "node"
# entrypoint = '["node", "server.js"]'

[[dockerfile.environment]]
key = "NODE_ENV"
value = "production"

[[dockerfile.copy_files]]
source = "."
destination = "/app"

[[dockerfile.commands]]
type = "RUN"
command = "npm ci"

[[dockerfile.ports]]
container = "3000"

[compose]
version = "3.8"

[[compose.services]]
name = "web"
build = { context = ".", dockerfile = "Dockerfile" }
networks = ["app-network"]
restart = "unless-stopped"

[[compose.services.ports]]
host = "3000"
container = "3000"

[[compose.networks]]
name = "app-network"
driver = "bridge"
"#;

/// Flags shared by the generating subcommands.
#[derive(Args)]
pub struct OutputArgs {
    /// Config file (defaults to ./berth.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory to write the generated file into
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Print to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
    /// Overwrite an existing file
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<BerthConfig> {
    let config = match path {
        Some(path) => BerthConfig::from_file(path)?,
        None => BerthConfig::load(Path::new("."))?,
    };
    Ok(config)
}

/// Catalog selections are rendered as-is; a tag the catalog does not offer
/// only earns a warning.
pub(crate) fn warn_on_catalog_mismatch(build: &BuildConfig) {
    let Some(BaseImage::Catalog(image)) = &build.base_image else {
        return;
    };
    if !image.is_complete() {
        return;
    }
    // arch-lint: allow(no-error-swallowing) reason="a tag outside the catalog still renders; the mismatch is only reported"
    if let Err(e) = berth_core::catalog::validate(image) {
        tracing::warn!(image = %image, "{e}");
    }
}

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "berth",
    about = "Generate Dockerfiles and docker-compose.yml files from berth.toml"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter berth.toml in the current directory
    Init,
    /// Generate a Dockerfile from the [dockerfile] section
    Dockerfile {
        #[command(flatten)]
        output: commands::OutputArgs,
        /// Also write a README.md with build and run instructions
        #[arg(long, conflicts_with = "stdout")]
        readme: bool,
    },
    /// Generate docker-compose.yml from the [compose] section
    Compose {
        #[command(flatten)]
        output: commands::OutputArgs,
    },
    /// List curated base images, or the tags of one image
    Catalog {
        /// Image name (e.g. node)
        image: Option<String>,
    },
    /// List ready-made Compose service templates
    Templates,
    /// Run as an MCP server over stdio
    Mcp(commands::mcp::McpArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="unset or invalid RUST_LOG falls back to the info filter"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init_project().await?,
        Commands::Dockerfile { output, readme } => commands::dockerfile(&output, readme).await?,
        Commands::Compose { output } => commands::compose(&output).await?,
        Commands::Catalog { image } => commands::catalog(image.as_deref()).await?,
        Commands::Templates => commands::templates().await?,
        Commands::Mcp(args) => commands::mcp::execute(args).await?,
    }

    Ok(())
}

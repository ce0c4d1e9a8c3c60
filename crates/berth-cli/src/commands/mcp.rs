//! MCP Server for berth
//!
//! MCP Protocol (stdio) <-> berth-core / berth-gen
//!
//! Rendering tools take the model as JSON and return the generated text;
//! nothing is written unless `write_artifacts` is called.

use anyhow::Result;
use berth_core::{BerthConfig, BuildConfig, ComposeProject, catalog};
use berth_gen::{Artifact, ComposeGenerator, DockerfileGenerator, artifact};
use clap::Args;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// CLI entry point
// =============================================================================

/// MCP subcommand arguments
#[derive(Args)]
#[command(after_long_help = r#"SETUP (~/.claude.json or any MCP client config):
  {
    "mcpServers": {
      "berth": {
        "command": "berth",
        "args": ["mcp", "-p", "/path/to/project"]
      }
    }
  }

TOOLS PROVIDED:
  render_dockerfile, render_compose, catalog, config, write_artifacts

EXAMPLES:
  $ berth mcp -p ./my-project
"#)]
pub(crate) struct McpArgs {
    /// Project path containing berth.toml
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,
}

/// Execute the MCP server
pub(crate) async fn execute(args: McpArgs) -> Result<()> {
    run_mcp_server(args).await
}

async fn run_mcp_server(args: McpArgs) -> Result<()> {
    let project_path = args.path.canonicalize().map_err(|e| {
        anyhow::anyhow!("Project path '{}' not accessible: {e}", args.path.display())
    })?;

    tracing::info!(path = %project_path.display(), "starting MCP server");
    let server = BerthMcpServer::new(project_path);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct BerthMcpServer {
    project_path: PathBuf,
    tool_router: ToolRouter<Self>,
}

impl BerthMcpServer {
    fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            tool_router: Self::tool_router(),
        }
    }

    fn load_config(&self) -> Result<BerthConfig, McpError> {
        BerthConfig::load(&self.project_path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {e}"), None))
    }

    /// Dockerfile and docker-compose.yml, written together or not at all.
    fn write_project_artifacts(&self, force: bool) -> Result<Vec<PathBuf>, McpError> {
        let config = self.load_config()?;
        let artifacts = [
            Artifact::dockerfile(&config.dockerfile),
            Artifact::compose(&config.compose),
        ];
        artifact::write_all(&artifacts, &self.project_path, force)
            .map_err(|e| McpError::internal_error(format!("Write failed: {e}"), None))
    }

    /// Render an image's tags, or the whole catalog, as JSON.
    fn catalog_json(image: Option<&str>) -> Result<String, McpError> {
        let json = match image {
            Some(name) => {
                let entry = catalog::find(name).ok_or_else(|| {
                    McpError::invalid_params(
                        format!("'{name}' is not in the base image catalog"),
                        None,
                    )
                })?;
                serde_json::to_string_pretty(entry)
            }
            None => serde_json::to_string_pretty(catalog::BASE_IMAGES),
        };
        json.map_err(|e| McpError::internal_error(format!("Failed to serialize catalog: {e}"), None))
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for BerthMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "berth".to_string(),
                title: Some("berth: Dockerfile and Compose generator".to_string()),
                description: Some(
                    "Generate Dockerfiles and docker-compose.yml files from structured input."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "berth MCP server. Use `render_dockerfile` and `render_compose` to preview \
                 generated files from a JSON model, `catalog` to pick a base image, `config` to \
                 read berth.toml, and `write_artifacts` to write both files to the project."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpRenderDockerfileRequest {
    #[schemars(description = "Dockerfile model; omitted fields are empty")]
    #[serde(default)]
    pub config: BuildConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpRenderComposeRequest {
    #[schemars(description = "Compose project model; omitted fields are empty")]
    #[serde(default)]
    pub project: ComposeProject,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpCatalogRequest {
    #[schemars(description = "Image name to list tags for (default: all images)")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpConfigRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpWriteArtifactsRequest {
    #[schemars(description = "Overwrite existing files (default: false)")]
    #[serde(default)]
    pub force: bool,
}

// =============================================================================
// Tool implementations: thin wrappers only
// =============================================================================

#[tool_router]
impl BerthMcpServer {
    #[tool(
        name = "render_dockerfile",
        description = "Render a Dockerfile from a JSON build model (base_image, args, labels, environment, work_dir, user, copy_files, commands, volumes, ports, entrypoint, post_build_commands). Rows missing their key/source/command/container field are skipped.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn render_dockerfile(
        &self,
        Parameters(req): Parameters<McpRenderDockerfileRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = DockerfileGenerator::new(&req.config).render();
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "render_compose",
        description = "Render docker-compose.yml from a JSON project model (version, services, networks, volumes). Services without a name are skipped; blank host ports default to the container port and blank volume hosts to '.'.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn render_compose(
        &self,
        Parameters(req): Parameters<McpRenderComposeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = ComposeGenerator::new(&req.project).render();
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "catalog",
        description = "List curated base images and their tags as JSON, or the tags of a single image.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn catalog(
        &self,
        Parameters(req): Parameters<McpCatalogRequest>,
    ) -> Result<CallToolResult, McpError> {
        let json = Self::catalog_json(req.image.as_deref())?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        name = "config",
        description = "Show the project's berth.toml as JSON, with defaults applied when the file is missing.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn config(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpConfigRequest>,
    ) -> Result<CallToolResult, McpError> {
        let config = self.load_config()?;

        let json = serde_json::to_string_pretty(&config).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize config: {e}"), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        name = "write_artifacts",
        description = "Render berth.toml and write the Dockerfile and docker-compose.yml into the project directory. Fails on existing files unless force is set.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn write_artifacts(
        &self,
        Parameters(req): Parameters<McpWriteArtifactsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let written: Vec<String> = self
            .write_project_artifacts(req.force)?
            .iter()
            .map(|path| format!("Wrote {}", path.display()))
            .collect();

        Ok(CallToolResult::success(vec![Content::text(
            written.join("\n"),
        )]))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_dockerfile_request_defaults_to_empty_config() {
        let req: McpRenderDockerfileRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.config, BuildConfig::default());
    }

    #[test]
    fn render_dockerfile_request_accepts_partial_model() {
        let req: McpRenderDockerfileRequest = serde_json::from_str(
            r#"{"config": {"base_image": {"source": "catalog", "name": "node", "tag": "18-alpine"},
                "ports": [{"container": "3000"}]}}"#,
        )
        .unwrap();
        let text = DockerfileGenerator::new(&req.config).render();
        assert_eq!(
            text,
            "# Base image\nFROM node:18-alpine\n\n# Expose ports\nEXPOSE 3000\n"
        );
    }

    #[test]
    fn render_compose_request_parses_version() {
        let req: McpRenderComposeRequest = serde_json::from_str(
            r#"{"project": {"version": "3.7", "services": [{"name": "web", "image": "nginx:alpine"}]}}"#,
        )
        .unwrap();
        let text = ComposeGenerator::new(&req.project).render();
        assert!(text.starts_with("version: \"3.7\"\n"));
        assert!(text.contains("  web:\n    image: nginx:alpine\n"));
    }

    #[test]
    fn write_artifacts_request_default_force() {
        let req: McpWriteArtifactsRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.force);
    }

    #[test]
    fn catalog_json_lists_all_images() {
        let json = BerthMcpServer::catalog_json(None).unwrap();
        assert!(json.contains("\"alpine\""));
        assert!(json.contains("\"ubuntu\""));
    }

    #[test]
    fn catalog_json_unknown_image_is_error() {
        assert!(BerthMcpServer::catalog_json(Some("debian")).is_err());
    }

    #[test]
    fn write_artifacts_keeps_dockerfile_off_disk_when_compose_exists() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("docker-compose.yml"), "services: {}\n").unwrap();
        let server = BerthMcpServer::new(tmp.path().to_path_buf());

        assert!(server.write_project_artifacts(false).is_err());
        assert!(!tmp.path().join("Dockerfile").exists());

        let paths = server.write_project_artifacts(true).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(tmp.path().join("Dockerfile").exists());
    }

    #[test]
    fn server_info_version() {
        let server = BerthMcpServer::new(PathBuf::from("."));
        let info = server.get_info();
        assert_eq!(info.server_info.name, "berth");
        assert!(!info.server_info.version.is_empty());
    }
}

use berth_core::{
    BaseImage, BerthConfig, BuildCommand, ComposeVersion, Error, ImageRef, Instruction, KeyValue,
    PortMapping, RestartPolicy, VolumeMount,
};
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = BerthConfig::load(tmp.path()).unwrap();

    assert_eq!(config, BerthConfig::default());
    assert!(config.dockerfile.base_image.is_none());
    assert!(config.dockerfile.ports.is_empty());
    assert_eq!(config.compose.version, ComposeVersion::V3_8);
    assert!(config.compose.services.is_empty());
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[dockerfile]
project_name = "My App"
base_image = { source = "catalog", name = "node", tag = "18-alpine" }
work_dir = "/srv"
user = "node"
entrypoint = '["node", "server.js"]'

[[dockerfile.environment]]
key = "NODE_ENV"
value = "production"

[[dockerfile.commands]]
type = "RUN"
command = "npm ci"

[[dockerfile.commands]]
type = "CMD"
command = "npm start"

[[dockerfile.ports]]
container = "3000"

[[dockerfile.volumes]]
host = "./data"
container = "/data"

[compose]
version = "2.4"

[[compose.services]]
name = "web"
image = "nginx:alpine"
restart = "on-failure"
privileged = true
depends_on = ["db"]

[[compose.services.ports]]
host = "8080"
container = "80"

[[compose.networks]]
name = "front"
driver = "bridge"
"#;
    std::fs::write(tmp.path().join("berth.toml"), toml).unwrap();

    let config = BerthConfig::load(tmp.path()).unwrap();

    let build = &config.dockerfile;
    assert_eq!(build.project_name, "My App");
    assert_eq!(
        build.base_image,
        Some(BaseImage::Catalog(ImageRef::new("node", "18-alpine")))
    );
    assert_eq!(build.work_dir, "/srv");
    assert_eq!(build.user, "node");
    assert_eq!(build.entrypoint, r#"["node", "server.js"]"#);
    assert_eq!(build.environment, vec![KeyValue::new("NODE_ENV", "production")]);
    assert_eq!(
        build.commands,
        vec![
            BuildCommand::run("npm ci"),
            BuildCommand::new(Instruction::Cmd, "npm start"),
        ]
    );
    assert_eq!(build.ports, vec![PortMapping::new("", "3000")]);
    assert_eq!(build.volumes, vec![VolumeMount::new("./data", "/data")]);

    let compose = &config.compose;
    assert_eq!(compose.version, ComposeVersion::V2_4);
    assert_eq!(compose.services.len(), 1);
    let web = &compose.services[0];
    assert_eq!(web.name, "web");
    assert_eq!(web.restart, Some(RestartPolicy::OnFailure));
    assert!(web.privileged);
    assert_eq!(web.depends_on, vec!["db".to_owned()]);
    assert_eq!(web.ports, vec![PortMapping::new("8080", "80")]);
    assert!(web.environment.is_empty());
    assert_eq!(compose.networks.len(), 1);
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[dockerfile]
work_dir = "/app"
"#;
    std::fs::write(tmp.path().join("berth.toml"), toml).unwrap();

    let config = BerthConfig::load(tmp.path()).unwrap();

    assert_eq!(config.dockerfile.work_dir, "/app");
    assert!(config.dockerfile.user.is_empty());
    assert!(config.dockerfile.args.is_empty());
    assert_eq!(config.compose.version, ComposeVersion::V3_8);
}

#[test]
fn load_rejects_unknown_compose_version() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("berth.toml"),
        "[compose]\nversion = \"1.0\"\n",
    )
    .unwrap();

    let err = BerthConfig::load(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}

#[test]
fn load_rejects_unknown_instruction() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("berth.toml"),
        "[[dockerfile.commands]]\ntype = \"FROM\"\ncommand = \"scratch\"\n",
    )
    .unwrap();

    assert!(BerthConfig::load(tmp.path()).is_err());
}

#[test]
fn from_file_requires_existing_file() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("other.toml");

    let err = BerthConfig::from_file(&missing).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
    assert!(err.to_string().contains("other.toml"));
}

#[test]
fn from_file_reads_custom_name() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("api.toml");
    std::fs::write(
        &path,
        "[dockerfile]\nbase_image = { source = \"custom\", name = \"acme/base\", tag = \"2\" }\n",
    )
    .unwrap();

    let config = BerthConfig::from_file(&path).unwrap();
    assert_eq!(
        config.dockerfile.base_image,
        Some(BaseImage::Custom(ImageRef::new("acme/base", "2")))
    );
}

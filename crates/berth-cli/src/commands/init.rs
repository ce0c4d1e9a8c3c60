use std::path::Path;

use berth_core::config::CONFIG_FILE;

/// Write a starter berth.toml unless one already exists.
pub async fn init_project() -> anyhow::Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        eprintln!("{CONFIG_FILE} already exists, skipping");
        return Ok(());
    }

    std::fs::write(path, super::BERTH_TOML_TEMPLATE)?;
    println!("Created {CONFIG_FILE}");
    println!();
    println!("Next steps:");
    println!("  berth dockerfile      # writes ./Dockerfile");
    println!("  berth compose         # writes ./docker-compose.yml");
    println!("  berth catalog         # lists curated base images");

    Ok(())
}

use berth_gen::Artifact;

use super::OutputArgs;

/// Render the [compose] section into docker-compose.yml.
pub async fn compose(output: &OutputArgs) -> anyhow::Result<()> {
    let config = super::load_config(output.config.as_deref())?;
    let artifact = Artifact::compose(&config.compose);

    if output.stdout {
        print!("{}", artifact.contents);
        return Ok(());
    }

    let path = artifact.write_to(&output.out_dir, output.force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

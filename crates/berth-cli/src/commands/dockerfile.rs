use berth_gen::Artifact;
use berth_gen::artifact::write_all;

use super::OutputArgs;

/// Render the [dockerfile] section and write it (or print it).
pub async fn dockerfile(output: &OutputArgs, readme: bool) -> anyhow::Result<()> {
    let config = super::load_config(output.config.as_deref())?;
    let build = &config.dockerfile;
    super::warn_on_catalog_mismatch(build);

    let artifact = Artifact::dockerfile(build);
    if artifact.contents.is_empty() {
        tracing::warn!("[dockerfile] has nothing to emit; the generated Dockerfile is empty");
    }

    if output.stdout {
        print!("{}", artifact.contents);
        return Ok(());
    }

    let mut artifacts = vec![artifact];
    if readme {
        artifacts.push(Artifact::readme(build));
    }
    for path in write_all(&artifacts, &output.out_dir, output.force)? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

use berth_core::templates;

pub async fn templates() -> anyhow::Result<()> {
    for template in templates::ALL {
        println!(
            "{:<10} {:<10} {} ({})",
            template.key, template.label, template.name, template.image
        );
    }

    // Service-level networks are emitted as written, so an undeclared one
    // would dangle in docker-compose.yml.
    let mut networks: Vec<&str> = templates::ALL
        .iter()
        .flat_map(|t| t.networks.iter().copied())
        .collect();
    networks.sort_unstable();
    networks.dedup();
    if !networks.is_empty() {
        println!();
        println!(
            "Template services join {}; declare each under [[compose.networks]] in berth.toml.",
            networks.join(", ")
        );
    }
    Ok(())
}

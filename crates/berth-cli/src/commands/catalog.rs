use berth_core::catalog::{self, BASE_IMAGES};

pub async fn catalog(image: Option<&str>) -> anyhow::Result<()> {
    match image {
        Some(name) => {
            let entry = catalog::find(name).ok_or_else(|| {
                berth_core::Error::UnknownCatalogImage {
                    name: name.to_owned(),
                }
            })?;
            for tag in entry.tags {
                println!("{}:{tag}", entry.name);
            }
        }
        None => {
            for entry in BASE_IMAGES {
                println!("{:<10} {}", entry.name, entry.tags.join(", "));
            }
        }
    }
    Ok(())
}

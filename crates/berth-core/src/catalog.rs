//! Curated base images and the tags offered for each.
//!
//! The table is read-only and sorted by image name. Generators never consult
//! it; it only feeds pickers and the optional [`validate`] check.

use serde::Serialize;

use crate::build::ImageRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogImage {
    pub name: &'static str,
    pub tags: &'static [&'static str],
}

impl CatalogImage {
    pub fn allows(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

pub const BASE_IMAGES: &[CatalogImage] = &[
    CatalogImage {
        name: "alpine",
        tags: &["latest", "3.14", "3.15", "3.16"],
    },
    CatalogImage {
        name: "maven",
        tags: &["latest", "3.8-jdk-11", "3.8-jdk-8"],
    },
    CatalogImage {
        name: "mysql",
        tags: &["latest", "8.0", "5.7", "5.6"],
    },
    CatalogImage {
        name: "nginx",
        tags: &["latest", "1.21", "1.20", "alpine"],
    },
    CatalogImage {
        name: "node",
        tags: &["latest", "16-alpine", "14-alpine", "18-alpine", "16", "14", "18"],
    },
    CatalogImage {
        name: "php",
        tags: &["latest", "8.0", "7.4", "8.1", "apache"],
    },
    CatalogImage {
        name: "postgres",
        tags: &["latest", "14", "13", "12", "alpine"],
    },
    CatalogImage {
        name: "python",
        tags: &["latest", "3.9", "3.8", "3.10", "alpine"],
    },
    CatalogImage {
        name: "redis",
        tags: &["latest", "6", "7", "alpine"],
    },
    CatalogImage {
        name: "ubuntu",
        tags: &["latest", "20.04", "18.04", "22.04"],
    },
];

pub fn find(name: &str) -> Option<&'static CatalogImage> {
    BASE_IMAGES.iter().find(|image| image.name == name)
}

/// Check that `image` names a catalog entry and one of its tags.
pub fn validate(image: &ImageRef) -> crate::Result<()> {
    let entry = find(&image.name).ok_or_else(|| crate::Error::UnknownCatalogImage {
        name: image.name.clone(),
    })?;

    if entry.allows(&image.tag) {
        Ok(())
    } else {
        Err(crate::Error::UnsupportedTag {
            name: image.name.clone(),
            tag: image.tag.clone(),
            allowed: entry.tags.iter().map(|t| (*t).to_owned()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_by_name() {
        let names: Vec<_> = BASE_IMAGES.iter().map(|i| i.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn every_image_offers_latest() {
        assert!(BASE_IMAGES.iter().all(|i| i.allows("latest")));
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("node").unwrap().tags.len(), 7);
        assert!(find("debian").is_none());
    }

    #[test]
    fn validate_accepts_listed_tag() {
        assert!(validate(&ImageRef::new("node", "18-alpine")).is_ok());
    }

    #[test]
    fn validate_rejects_unlisted_tag() {
        let err = validate(&ImageRef::new("redis", "5")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("redis"));
        assert!(msg.contains("latest, 6, 7, alpine"));
    }

    #[test]
    fn validate_rejects_unknown_image() {
        let err = validate(&ImageRef::new("debian", "bookworm")).unwrap_err();
        assert!(matches!(err, crate::Error::UnknownCatalogImage { .. }));
    }
}

use berth_core::BuildConfig;
use berth_core::rows::qualifying;

use crate::dockerfile::DockerfileGenerator;

/// Renders a README.md describing how to build and run the generated image.
pub struct ReadmeGenerator<'a> {
    config: &'a BuildConfig,
}

impl<'a> ReadmeGenerator<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    pub fn render(&self) -> String {
        let c = self.config;
        let title = if c.project_name.is_empty() {
            "Container image"
        } else {
            c.project_name.as_str()
        };
        let image = image_name(&c.project_name);
        let ports: Vec<&str> = qualifying(&c.ports)
            .map(|port| port.container.as_str())
            .collect();

        let run = match ports.first() {
            Some(port) => format!("docker run -p {port}:{port} {image}"),
            None => format!("docker run {image}"),
        };

        let mut notes = Vec::new();
        if let Some(base) = c.complete_base_image() {
            notes.push(format!("- The image is based on `{base}`"));
        }
        if !ports.is_empty() {
            notes.push(format!("- Exposed ports: {}", ports.join(", ")));
        }
        if !c.work_dir.is_empty() {
            notes.push(format!("- Working directory: `{}`", c.work_dir));
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!("\n## Additional Information\n\n{}\n", notes.join("\n"))
        };

        let dockerfile = DockerfileGenerator::new(c).render();

        format!(
            r#"# {title}

## Docker Setup

This project includes a Dockerfile for containerization. Follow these steps to build and run the container:

1. Build the Docker image:
```bash
docker build -t {image} .
```

2. Run the container:
```bash
{run}
```

## Dockerfile Contents

```dockerfile
{dockerfile}```
{notes}"#
        )
    }
}

/// Lower-cased image name derived from the project name; `app` when blank.
///
/// Characters Docker rejects in a repository name become `-`, and the name
/// never starts or ends with a separator.
fn image_name(project_name: &str) -> String {
    let name: String = project_name
        .trim()
        .chars()
        .map(|c| match c.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9' | '.' | '_' | '-') => c,
            _ => '-',
        })
        .collect();
    let name = name.trim_matches(['.', '_', '-']);
    if name.is_empty() { "app".to_owned() } else { name.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_name_lowercases_and_replaces_spaces() {
        assert_eq!(image_name("My App"), "my-app");
        assert_eq!(image_name("api_v2.1"), "api_v2.1");
        assert_eq!(image_name("  "), "app");
    }

    #[test]
    fn image_name_has_no_leading_or_trailing_separator() {
        assert_eq!(image_name(".hidden"), "hidden");
        assert_eq!(image_name("-My Shop!"), "my-shop");
        assert_eq!(image_name("..."), "app");
    }
}

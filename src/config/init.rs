// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates gcf-deploy.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ProjectId;

use super::{CONFIG_FILENAME, DEFAULT_LOCATION};

pub fn init_config(
    dir: &Path,
    project: Option<&str>,
    bucket: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let project = match project {
        Some(p) => ProjectId::new(p)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?
            .to_string(),
        None => "my-project".to_string(),
    };
    let bucket = bucket
        .map(str::to_string)
        .unwrap_or_else(|| format!("{project}-functions"));

    std::fs::write(&config_path, generate_template_yaml(&project, &bucket))?;

    Ok(())
}

fn generate_template_yaml(project: &str, bucket: &str) -> String {
    format!(
        r#"project_id: {project}
credentials:
  type: file
  file_path: ./service-account.json
  # Or read the key material from environment variables:
  # type: env
  # env:
  #   client_email: GCP_CLIENT_EMAIL
  #   private_key: GCP_PRIVATE_KEY
location: {DEFAULT_LOCATION}
dist_directory: dist
globs:
  - "*.js"
  - "lib/**/*.js"
bucket: {bucket}
function:
  entry_point: handler
  runtime: nodejs20
  timeout: 60s
  available_memory_mb: 256
"#
    )
}

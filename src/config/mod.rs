// ABOUTME: Configuration types and parsing for gcf-deploy.yml.
// ABOUTME: Handles YAML parsing, defaults, file discovery, and path resolution.

mod function;
mod init;
mod poll;
mod prune;

pub use function::FunctionConfig;
pub use init::init_config;
pub use poll::PollConfig;
pub use prune::PruneConfig;

use crate::credentials::CredentialConfig;
use crate::error::{Error, Result};
use crate::types::{BucketName, ObjectName, ProjectId};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "gcf-deploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "gcf-deploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".gcf-deploy/config.yml";

/// Region used for buckets and functions when none is configured.
pub const DEFAULT_LOCATION: &str = "us-central1";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub project_id: ProjectId,

    pub credentials: CredentialConfig,

    #[serde(default = "default_location")]
    pub location: String,

    pub dist_directory: PathBuf,

    #[serde(default)]
    pub globs: Vec<String>,

    /// Project root. Relative paths resolve against the process working directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    pub bucket: BucketName,

    /// Object name override; defaults to `<name>/<name>-<version>.zip`.
    #[serde(default)]
    pub artifact: Option<ObjectName>,

    #[serde(default)]
    pub overwrite: bool,

    pub function: FunctionConfig,

    #[serde(default)]
    pub prune: PruneConfig,

    #[serde(default)]
    pub poll: PollConfig,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    fn validate(&self) -> Result<()> {
        if self.location.trim().is_empty() {
            return Err(Error::InvalidConfig("location cannot be empty".to_string()));
        }
        if self.dist_directory.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "dist_directory cannot be empty".to_string(),
            ));
        }
        if self.function.entry_point.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "function.entry_point cannot be empty".to_string(),
            ));
        }
        if self.prune.enabled && self.prune.command.is_empty() {
            return Err(Error::InvalidConfig(
                "prune.command cannot be empty when pruning is enabled".to_string(),
            ));
        }
        if self.poll.interval.is_zero() {
            return Err(Error::InvalidConfig(
                "poll.interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Project root, resolved against `process_cwd`.
    pub fn working_dir(&self, process_cwd: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) => process_cwd.join(cwd),
            None => process_cwd.to_path_buf(),
        }
    }

    /// Credentials with a relative key file resolved against the project root.
    pub fn resolved_credentials(&self, process_cwd: &Path) -> CredentialConfig {
        self.credentials
            .clone()
            .rebased(&self.working_dir(process_cwd))
    }
}

// ABOUTME: The deployable's package.json manifest.
// ABOUTME: Supplies the name and version used for object and function naming.

use serde::Deserialize;
use std::path::Path;

use super::PackageError;
use crate::types::{DeployableName, ObjectName};

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: DeployableName,
    pub version: String,
}

#[derive(Deserialize)]
struct RawManifest {
    name: String,
    version: String,
}

impl Manifest {
    pub async fn load(path: &Path) -> Result<Self, PackageError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content).map_err(|reason| PackageError::InvalidManifest {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let raw: RawManifest = serde_json::from_str(content).map_err(|e| e.to_string())?;
        let name = DeployableName::new(&raw.name).map_err(|e| e.to_string())?;
        if raw.version.trim().is_empty() {
            return Err("version cannot be empty".to_string());
        }
        Ok(Self {
            name,
            version: raw.version,
        })
    }

    /// `<name>/<name>-<version>.zip`
    pub fn object_name(&self) -> ObjectName {
        ObjectName::new(format!("{0}/{0}-{1}.zip", self.name, self.version))
    }
}

// ABOUTME: Credential configuration and key material resolution.
// ABOUTME: Reads a service-account key file or two named environment variables.

mod error;

pub use error::CredentialError;

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the service-account key material comes from.
///
/// Deserialized from a `type`-tagged map; unknown tags are rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CredentialConfig {
    /// A JSON service-account key file.
    File { file_path: PathBuf },
    /// Names of the environment variables holding the email and private key.
    Env { env: EnvCredentialNames },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvCredentialNames {
    pub client_email: String,
    pub private_key: String,
}

/// Service-account email and PEM private key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub client_email: String,
    pub private_key: String,
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Subset of a service-account key file.
#[derive(Deserialize)]
struct KeyFile {
    client_email: String,
    private_key: String,
}

impl CredentialConfig {
    /// Resolve the configured source into key material.
    pub fn resolve(&self) -> Result<KeyMaterial, CredentialError> {
        match self {
            CredentialConfig::File { file_path } => read_key_file(file_path),
            CredentialConfig::Env { env } => read_env(env),
        }
    }

    /// Resolves relative key file paths against `base`.
    pub fn rebased(self, base: &Path) -> Self {
        match self {
            CredentialConfig::File { file_path } if file_path.is_relative() => {
                CredentialConfig::File {
                    file_path: base.join(file_path),
                }
            }
            other => other,
        }
    }
}

fn read_key_file(path: &Path) -> Result<KeyMaterial, CredentialError> {
    let content = std::fs::read_to_string(path).map_err(|source| CredentialError::ReadKeyFile {
        path: path.to_path_buf(),
        source,
    })?;

    let key: KeyFile =
        serde_json::from_str(&content).map_err(|source| CredentialError::ParseKeyFile {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(KeyMaterial {
        client_email: key.client_email,
        private_key: key.private_key,
    })
}

fn read_env(names: &EnvCredentialNames) -> Result<KeyMaterial, CredentialError> {
    let var = |name: &str| {
        std::env::var(name).map_err(|_| CredentialError::MissingEnvVar(name.to_string()))
    };

    Ok(KeyMaterial {
        client_email: var(&names.client_email)?,
        // Keys pasted into env vars usually carry literal "\n" sequences.
        private_key: var(&names.private_key)?.replace("\\n", "\n"),
    })
}

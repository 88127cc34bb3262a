// ABOUTME: Name of the deployable unit, taken from the package manifest.
// ABOUTME: Must be usable both as an object path prefix and as a function id.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeployableNameError {
    #[error("deployable name cannot be empty")]
    Empty,

    #[error("deployable name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("deployable name must start with a letter")]
    InvalidStart,

    #[error("invalid character in deployable name: '{0}'")]
    InvalidChar(char),
}

/// A function id: letters, digits, hyphens and underscores, starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeployableName(String);

impl DeployableName {
    pub fn new(value: &str) -> Result<Self, DeployableNameError> {
        if value.is_empty() {
            return Err(DeployableNameError::Empty);
        }

        if value.len() > 63 {
            return Err(DeployableNameError::TooLong);
        }

        if !value.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(DeployableNameError::InvalidStart);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
                return Err(DeployableNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeployableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

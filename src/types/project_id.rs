// ABOUTME: Google Cloud project id validation.
// ABOUTME: 6-30 chars, lowercase letters, digits and hyphens, starting with a letter.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectIdError {
    #[error("project id must be between 6 and 30 characters")]
    InvalidLength,

    #[error("project id must start with a lowercase letter")]
    InvalidStart,

    #[error("project id cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("invalid character in project id: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(value: &str) -> Result<Self, ProjectIdError> {
        if !(6..=30).contains(&value.len()) {
            return Err(ProjectIdError::InvalidLength);
        }

        if !value.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(ProjectIdError::InvalidStart);
        }

        if value.ends_with('-') {
            return Err(ProjectIdError::EndsWithHyphen);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(ProjectIdError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ProjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ProjectId::new(&s).map_err(serde::de::Error::custom)
    }
}

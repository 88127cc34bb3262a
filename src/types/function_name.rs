// ABOUTME: Fully-qualified Cloud Functions resource name.
// ABOUTME: projects/<project>/locations/<location>/functions/<name>.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{DeployableName, ProjectId};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid function name '{0}': expected projects/<p>/locations/<l>/functions/<f>")]
pub struct ParseFunctionNameError(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName {
    project: String,
    location: String,
    function: String,
}

impl FunctionName {
    pub fn new(project: &ProjectId, location: &str, function: &DeployableName) -> Self {
        Self {
            project: project.to_string(),
            location: location.to_string(),
            function: function.to_string(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// The parent location resource: `projects/<p>/locations/<l>`.
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project, self.location)
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/functions/{}", self.parent(), self.function)
    }
}

impl FromStr for FunctionName {
    type Err = ParseFunctionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            ["projects", project, "locations", location, "functions", function]
                if !project.is_empty() && !location.is_empty() && !function.is_empty() =>
            {
                Ok(Self {
                    project: project.to_string(),
                    location: location.to_string(),
                    function: function.to_string(),
                })
            }
            _ => Err(ParseFunctionNameError(s.to_string())),
        }
    }
}

// ABOUTME: Dependency pruning settings for the staged directory.
// ABOUTME: Disabled pruning skips the step; the command runs in the staged directory.

use serde::Deserialize;

use crate::package::PruneCommand;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PruneConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_command(),
        }
    }
}

impl PruneConfig {
    /// The command to run, or `None` when pruning is disabled.
    pub fn command(&self) -> Option<PruneCommand> {
        if self.enabled {
            PruneCommand::from_argv(&self.command)
        } else {
            None
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_command() -> Vec<String> {
    ["npm", "prune", "--production"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// ABOUTME: Operation polling settings.
// ABOUTME: Fixed interval plus an optional overall deadline.

use serde::Deserialize;
use std::time::Duration;

/// `timeout: null` disables the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            timeout: default_timeout(),
        }
    }
}

fn default_interval() -> Duration {
    Duration::from_millis(2000)
}

fn default_timeout() -> Option<Duration> {
    Some(Duration::from_secs(600))
}

// ABOUTME: Function settings from the `function:` config section.
// ABOUTME: Trigger is kept as an opaque JSON value and forwarded as-is.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionConfig {
    pub entry_point: String,

    #[serde(default)]
    pub runtime: Option<String>,

    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    #[serde(default)]
    pub available_memory_mb: Option<u32>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub service_account_email: Option<String>,

    #[serde(default)]
    pub labels: HashMap<String, String>,

    #[serde(default = "default_trigger")]
    pub trigger: serde_json::Value,
}

fn default_trigger() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

// ABOUTME: Request descriptors and narrow response records for provider calls.
// ABOUTME: Responses keep only the fields deployments consume; unknown fields are ignored.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::types::{BucketName, FunctionName, ObjectName, OperationName, ProjectId};

/// Storage class used for buckets created by deployments.
pub const REGIONAL: &str = "REGIONAL";

/// A bucket to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    pub project: ProjectId,
    pub name: BucketName,
    pub location: String,
    pub storage_class: String,
}

impl BucketSpec {
    pub(crate) fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "location": self.location,
            "storageClass": self.storage_class,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub name: BucketName,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub storage_class: Option<String>,
}

/// Address of an object within a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObjectRef {
    pub bucket: BucketName,
    pub name: ObjectName,
}

impl StorageObjectRef {
    pub fn new(bucket: BucketName, name: ObjectName) -> Self {
        Self { bucket, name }
    }

    /// `gs://<bucket>/<object>` reference.
    pub fn archive_url(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObject {
    pub bucket: BucketName,
    pub name: ObjectName,
    #[serde(default)]
    pub generation: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl StorageObject {
    pub fn archive_url(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.name)
    }
}

/// Desired state of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    pub name: FunctionName,
    pub entry_point: String,
    pub runtime: Option<String>,
    pub timeout: Option<Duration>,
    pub available_memory_mb: Option<u32>,
    pub description: Option<String>,
    pub service_account_email: Option<String>,
    pub labels: HashMap<String, String>,
    pub source_archive_url: String,
    /// Passed through untouched as `httpsTrigger`.
    pub trigger: Value,
}

impl FunctionSpec {
    /// JSON body for create and update calls.
    pub fn request_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("name".into(), json!(self.name.to_string()));
        body.insert("entryPoint".into(), json!(self.entry_point));
        body.insert("sourceArchiveUrl".into(), json!(self.source_archive_url));
        body.insert("httpsTrigger".into(), self.trigger.clone());

        if let Some(runtime) = &self.runtime {
            body.insert("runtime".into(), json!(runtime));
        }
        if let Some(timeout) = self.timeout {
            body.insert("timeout".into(), json!(format!("{}s", timeout.as_secs())));
        }
        if let Some(memory) = self.available_memory_mb {
            body.insert("availableMemoryMb".into(), json!(memory));
        }
        if let Some(description) = &self.description {
            body.insert("description".into(), json!(description));
        }
        if let Some(email) = &self.service_account_email {
            body.insert("serviceAccountEmail".into(), json!(email));
        }
        if !self.labels.is_empty() {
            body.insert("labels".into(), json!(self.labels));
        }

        Value::Object(body)
    }

    /// Comma-separated `updateMask` naming every field `request_body` sends,
    /// apart from the resource name.
    pub fn update_mask(&self) -> String {
        match self.request_body() {
            Value::Object(body) => body
                .keys()
                .filter(|key| key.as_str() != "name")
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFunction {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
}

/// Long-running operation state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Operation {
    pub name: OperationName,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<OperationError>,
}

/// Error payload of a finished operation (`google.rpc.Status`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<Value>,
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation failed with code {}: {}", self.code, self.message)
    }
}

impl std::error::Error for OperationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeployableName;

    fn function_spec() -> FunctionSpec {
        FunctionSpec {
            name: FunctionName::new(
                &ProjectId::new("my-project").unwrap(),
                "us-central1",
                &DeployableName::new("hello").unwrap(),
            ),
            entry_point: "handler".to_string(),
            runtime: Some("nodejs20".to_string()),
            timeout: Some(Duration::from_secs(60)),
            available_memory_mb: Some(256),
            description: None,
            service_account_email: None,
            labels: HashMap::new(),
            source_archive_url: "gs://b/hello/hello-1.0.0.zip".to_string(),
            trigger: json!({}),
        }
    }

    #[test]
    fn function_body_uses_api_field_names() {
        let body = function_spec().request_body();
        assert_eq!(
            body["name"],
            "projects/my-project/locations/us-central1/functions/hello"
        );
        assert_eq!(body["entryPoint"], "handler");
        assert_eq!(body["timeout"], "60s");
        assert_eq!(body["availableMemoryMb"], 256);
        assert_eq!(body["sourceArchiveUrl"], "gs://b/hello/hello-1.0.0.zip");
        assert_eq!(body["httpsTrigger"], json!({}));
        assert!(body.get("labels").is_none());
        assert!(body.get("description").is_none());
    }

    #[test]
    fn trigger_is_passed_through_verbatim() {
        let mut spec = function_spec();
        spec.trigger = json!({"securityLevel": "SECURE_ALWAYS", "x": [1, 2]});
        assert_eq!(spec.request_body()["httpsTrigger"], spec.trigger);
    }

    fn mask_fields(spec: &FunctionSpec) -> Vec<String> {
        let mut fields: Vec<String> = spec.update_mask().split(',').map(str::to_string).collect();
        fields.sort();
        fields
    }

    #[test]
    fn update_mask_lists_only_sent_fields() {
        let mut spec = function_spec();
        spec.runtime = None;
        spec.timeout = None;
        spec.available_memory_mb = None;

        assert_eq!(
            mask_fields(&spec),
            vec!["entryPoint", "httpsTrigger", "sourceArchiveUrl"]
        );
    }

    #[test]
    fn update_mask_covers_every_optional_field() {
        let mut spec = function_spec();
        spec.description = Some("Public API".to_string());
        spec.service_account_email = Some("api@my-project.iam.gserviceaccount.com".to_string());
        spec.labels.insert("team".to_string(), "core".to_string());

        assert_eq!(
            mask_fields(&spec),
            vec![
                "availableMemoryMb",
                "description",
                "entryPoint",
                "httpsTrigger",
                "labels",
                "runtime",
                "serviceAccountEmail",
                "sourceArchiveUrl",
                "timeout",
            ]
        );
        assert!(!spec.update_mask().contains("name"));
    }

    #[test]
    fn operation_defaults_to_not_done() {
        let op: Operation = serde_json::from_str(r#"{"name": "operations/abc"}"#).unwrap();
        assert!(!op.done);
        assert!(op.error.is_none());
    }

    #[test]
    fn operation_decodes_error_payload_and_ignores_unknown_fields() {
        let op: Operation = serde_json::from_str(
            r#"{
                "name": "operations/abc",
                "done": true,
                "metadata": {"@type": "type.googleapis.com/x"},
                "error": {"code": 3, "message": "Build failed"}
            }"#,
        )
        .unwrap();
        let error = op.error.unwrap();
        assert_eq!(error.code, 3);
        assert_eq!(error.message, "Build failed");
    }

    #[test]
    fn operation_without_name_fails_to_decode() {
        let result: Result<Operation, _> = serde_json::from_str(r#"{"done": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn archive_url_uses_gs_scheme() {
        let object = StorageObjectRef::new(
            BucketName::new("artifacts"),
            ObjectName::new("hello/hello-1.0.0.zip"),
        );
        assert_eq!(object.archive_url(), "gs://artifacts/hello/hello-1.0.0.zip");
    }
}

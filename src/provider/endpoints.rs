// ABOUTME: Base URLs for the storage and function-hosting services.
// ABOUTME: Overridable for emulators and tests.

/// Service base URLs, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub storage: String,
    pub functions: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            storage: "https://storage.googleapis.com".to_string(),
            functions: "https://cloudfunctions.googleapis.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point both services at one base URL.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            storage: base.clone(),
            functions: base,
        }
    }

    pub(crate) fn bucket(&self, bucket: &str) -> String {
        format!("{}/storage/v1/b/{}", self.storage, bucket)
    }

    pub(crate) fn buckets(&self) -> String {
        format!("{}/storage/v1/b", self.storage)
    }

    pub(crate) fn object(&self, bucket: &str, escaped_object: &str) -> String {
        format!("{}/storage/v1/b/{}/o/{}", self.storage, bucket, escaped_object)
    }

    pub(crate) fn upload(&self, bucket: &str) -> String {
        format!("{}/upload/storage/v1/b/{}/o", self.storage, bucket)
    }

    /// Resource URL for a function or operation name.
    pub(crate) fn resource(&self, name: &str) -> String {
        format!("{}/v1/{}", self.functions, name)
    }

    pub(crate) fn functions_in(&self, parent: &str) -> String {
        format!("{}/v1/{}/functions", self.functions, parent)
    }
}

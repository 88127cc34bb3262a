// ABOUTME: Test support utilities.
// ABOUTME: Provides tracing setup plus scripted provider and packager doubles.

use async_trait::async_trait;
use gcf_deploy::config::FunctionConfig;
use gcf_deploy::deploy::{DeploySettings, PollPolicy};
use gcf_deploy::package::{PackageError, PackageRequest, PackagedArtifact, Packager};
use gcf_deploy::provider::{
    Bucket, BucketSpec, CloudFunction, FunctionOps, FunctionSpec, Operation, OperationError,
    OperationOps, ProviderError, StorageObject, StorageObjectRef, StorageOps,
};
use gcf_deploy::types::{BucketName, FunctionName, OperationName, ProjectId};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("gcf_deploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
pub fn settings() -> DeploySettings {
    DeploySettings {
        project: ProjectId::new("my-project").unwrap(),
        location: "us-central1".to_string(),
        bucket: BucketName::new("my-functions"),
        artifact: None,
        overwrite: false,
        function: FunctionConfig {
            entry_point: "handler".to_string(),
            runtime: Some("nodejs20".to_string()),
            timeout: Some(Duration::from_secs(60)),
            available_memory_mb: Some(256),
            description: None,
            service_account_email: None,
            labels: HashMap::new(),
            trigger: serde_json::json!({}),
        },
        poll: PollPolicy {
            interval: Duration::from_secs(2),
            timeout: Some(Duration::from_secs(600)),
        },
    }
}

#[allow(dead_code)]
pub fn running(name: &str) -> Operation {
    Operation {
        name: OperationName::new(name),
        done: false,
        error: None,
    }
}

#[allow(dead_code)]
pub fn finished(name: &str) -> Operation {
    Operation {
        done: true,
        ..running(name)
    }
}

#[allow(dead_code)]
pub fn failed(name: &str, code: i32, message: &str) -> Operation {
    Operation {
        done: true,
        error: Some(OperationError {
            code,
            message: message.to_string(),
            details: Vec::new(),
        }),
        ..running(name)
    }
}

/// Per-method call counters.
#[derive(Debug, Default)]
pub struct Calls {
    pub get_bucket: AtomicUsize,
    pub insert_bucket: AtomicUsize,
    pub get_storage_object: AtomicUsize,
    pub insert_storage_object: AtomicUsize,
    pub get_function: AtomicUsize,
    pub create_function: AtomicUsize,
    pub update_function: AtomicUsize,
    pub get_operation: AtomicUsize,
}

#[allow(dead_code)]
pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Provider double with scripted remote state.
///
/// `get_operation` pops scripted responses in order and reports a running
/// operation once the script is exhausted.
#[derive(Debug, Default)]
pub struct MockProvider {
    pub bucket_exists: bool,
    pub object_exists: bool,
    pub function_exists: bool,
    /// Bucket insert reports not-found instead of the created bucket.
    pub insert_unconfirmed: bool,
    pub calls: Calls,
    pub inserted_buckets: Mutex<Vec<BucketSpec>>,
    pub uploads: Mutex<Vec<(StorageObjectRef, PathBuf)>>,
    pub submitted: Mutex<Vec<FunctionSpec>>,
    pub operations: Mutex<VecDeque<Operation>>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self) -> Self {
        self.bucket_exists = true;
        self
    }

    pub fn with_object(mut self) -> Self {
        self.object_exists = true;
        self
    }

    pub fn with_function(mut self) -> Self {
        self.function_exists = true;
        self
    }

    pub fn with_unconfirmed_insert(mut self) -> Self {
        self.insert_unconfirmed = true;
        self
    }

    pub fn with_operations(self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.lock().unwrap().extend(operations);
        self
    }
}

#[async_trait]
impl StorageOps for MockProvider {
    async fn get_bucket(&self, name: &BucketName) -> Result<Option<Bucket>, ProviderError> {
        self.calls.get_bucket.fetch_add(1, Ordering::SeqCst);
        Ok(self.bucket_exists.then(|| Bucket {
            name: name.clone(),
            location: Some("US-CENTRAL1".to_string()),
            storage_class: Some("REGIONAL".to_string()),
        }))
    }

    async fn insert_bucket(&self, spec: &BucketSpec) -> Result<Option<Bucket>, ProviderError> {
        self.calls.insert_bucket.fetch_add(1, Ordering::SeqCst);
        self.inserted_buckets.lock().unwrap().push(spec.clone());
        if self.insert_unconfirmed {
            return Ok(None);
        }
        Ok(Some(Bucket {
            name: spec.name.clone(),
            location: Some(spec.location.clone()),
            storage_class: Some(spec.storage_class.clone()),
        }))
    }

    async fn get_storage_object(
        &self,
        object: &StorageObjectRef,
    ) -> Result<Option<StorageObject>, ProviderError> {
        self.calls.get_storage_object.fetch_add(1, Ordering::SeqCst);
        Ok(self.object_exists.then(|| stored(object)))
    }

    async fn insert_storage_object(
        &self,
        object: &StorageObjectRef,
        archive: &Path,
    ) -> Result<StorageObject, ProviderError> {
        self.calls
            .insert_storage_object
            .fetch_add(1, Ordering::SeqCst);
        self.uploads
            .lock()
            .unwrap()
            .push((object.clone(), archive.to_path_buf()));
        Ok(stored(object))
    }
}

fn stored(object: &StorageObjectRef) -> StorageObject {
    StorageObject {
        bucket: object.bucket.clone(),
        name: object.name.clone(),
        generation: Some("1".to_string()),
        size: Some("21".to_string()),
    }
}

#[async_trait]
impl FunctionOps for MockProvider {
    async fn get_function(
        &self,
        name: &FunctionName,
    ) -> Result<Option<CloudFunction>, ProviderError> {
        self.calls.get_function.fetch_add(1, Ordering::SeqCst);
        Ok(self.function_exists.then(|| CloudFunction {
            name: name.to_string(),
            status: Some("ACTIVE".to_string()),
            version_id: Some("3".to_string()),
        }))
    }

    async fn create_function(&self, spec: &FunctionSpec) -> Result<Operation, ProviderError> {
        self.calls.create_function.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(spec.clone());
        Ok(running("operations/create"))
    }

    async fn update_function(&self, spec: &FunctionSpec) -> Result<Operation, ProviderError> {
        self.calls.update_function.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(spec.clone());
        Ok(running("operations/update"))
    }
}

#[async_trait]
impl OperationOps for MockProvider {
    async fn get_operation(&self, name: &OperationName) -> Result<Operation, ProviderError> {
        self.calls.get_operation.fetch_add(1, Ordering::SeqCst);
        let next = self.operations.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| running(name.as_str())))
    }
}

/// Packager double that writes a manifest and a placeholder archive.
#[derive(Debug)]
pub struct MockPackager {
    pub name: String,
    pub version: String,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockPackager {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Packager for MockPackager {
    async fn package(&self, request: &PackageRequest) -> Result<PackagedArtifact, PackageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let staging_dir = request.staging_dir();
        tokio::fs::create_dir_all(&staging_dir).await?;
        let manifest = serde_json::json!({ "name": self.name, "version": self.version });
        tokio::fs::write(staging_dir.join("package.json"), manifest.to_string()).await?;

        let archive = request.source_root.join("package.zip");
        tokio::fs::write(&archive, b"not really a zip file").await?;

        Ok(PackagedArtifact {
            staging_dir,
            archive,
        })
    }
}

#[allow(dead_code)]
pub fn package_request(root: &Path) -> PackageRequest {
    PackageRequest {
        source_root: root.to_path_buf(),
        dist_directory: PathBuf::from("dist"),
        globs: vec!["*.js".to_string()],
    }
}

// ABOUTME: Composable capability traits for the remote provider.
// ABOUTME: StorageOps, FunctionOps, and OperationOps; absent results are Ok(None).

use async_trait::async_trait;
use std::path::Path;

use super::error::ProviderError;
use super::types::{
    Bucket, BucketSpec, CloudFunction, FunctionSpec, Operation, StorageObject, StorageObjectRef,
};
use crate::types::{BucketName, FunctionName, OperationName};

/// Bucket and object operations.
#[async_trait]
pub trait StorageOps: Send + Sync {
    /// Fetch a bucket, or `None` if it does not exist.
    async fn get_bucket(&self, name: &BucketName) -> Result<Option<Bucket>, ProviderError>;

    /// Create a bucket. A not-found response resolves to `None`.
    async fn insert_bucket(&self, spec: &BucketSpec) -> Result<Option<Bucket>, ProviderError>;

    /// Fetch object metadata, or `None` if it does not exist.
    async fn get_storage_object(
        &self,
        object: &StorageObjectRef,
    ) -> Result<Option<StorageObject>, ProviderError>;

    /// Upload the file at `archive` as the object's content.
    async fn insert_storage_object(
        &self,
        object: &StorageObjectRef,
        archive: &Path,
    ) -> Result<StorageObject, ProviderError>;
}

/// Function definition operations.
#[async_trait]
pub trait FunctionOps: Send + Sync {
    /// Fetch a function, or `None` if it does not exist.
    async fn get_function(
        &self,
        name: &FunctionName,
    ) -> Result<Option<CloudFunction>, ProviderError>;

    async fn create_function(&self, spec: &FunctionSpec) -> Result<Operation, ProviderError>;

    async fn update_function(&self, spec: &FunctionSpec) -> Result<Operation, ProviderError>;
}

/// Long-running operation status.
#[async_trait]
pub trait OperationOps: Send + Sync {
    async fn get_operation(&self, name: &OperationName) -> Result<Operation, ProviderError>;
}

/// Everything a deployment needs from the remote side.
pub trait RemoteProvider: StorageOps + FunctionOps + OperationOps {}

impl<T: StorageOps + FunctionOps + OperationOps> RemoteProvider for T {}

// ABOUTME: Remote provider for Cloud Storage and Cloud Functions.
// ABOUTME: Capability traits plus the authenticated REST implementation.

mod endpoints;
mod error;
mod google;
mod traits;
mod types;

pub use endpoints::Endpoints;
pub use error::{NotFoundExt, ProviderError, decode_response};
pub use google::GoogleProvider;
pub use traits::{FunctionOps, OperationOps, RemoteProvider, StorageOps};
pub use types::{
    Bucket, BucketSpec, CloudFunction, FunctionSpec, Operation, OperationError, REGIONAL,
    StorageObject, StorageObjectRef,
};

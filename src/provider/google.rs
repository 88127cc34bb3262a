// ABOUTME: REST implementation of the provider traits for Google Cloud.
// ABOUTME: Attaches the memoized identity's bearer token to every call.

use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::io::ReaderStream;

use super::endpoints::Endpoints;
use super::error::{NotFoundExt, ProviderError, decode_response};
use super::traits::{FunctionOps, OperationOps, StorageOps};
use super::types::{
    Bucket, BucketSpec, CloudFunction, FunctionSpec, Operation, StorageObject, StorageObjectRef,
};
use crate::auth::{Authorizer, IdentityCell, JwtAuthorizer};
use crate::credentials::CredentialConfig;
use crate::types::{BucketName, FunctionName, OperationName};

const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Timeout for a single HTTP request. Uploads share it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

struct GoogleProviderInner {
    http: Client,
    endpoints: Endpoints,
    identity: IdentityCell,
}

/// Authenticated client for Cloud Storage and Cloud Functions.
///
/// Clones share the HTTP client and the identity cache, so the identity is
/// resolved once no matter how many clones issue calls.
#[derive(Clone)]
pub struct GoogleProvider {
    inner: Arc<GoogleProviderInner>,
}

impl std::fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleProvider")
            .field("endpoints", &self.inner.endpoints)
            .field("identity", &self.inner.identity)
            .finish_non_exhaustive()
    }
}

impl GoogleProvider {
    /// Create a provider talking to the public Google endpoints.
    pub fn new(credentials: CredentialConfig) -> Result<Self, ProviderError> {
        let http = Self::http_client()?;
        let authorizer = Arc::new(JwtAuthorizer::new(http.clone()));
        Ok(Self::with_parts(
            http,
            Endpoints::default(),
            credentials,
            authorizer,
        ))
    }

    /// Create a provider from explicit collaborators.
    pub fn with_parts(
        http: Client,
        endpoints: Endpoints,
        credentials: CredentialConfig,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            inner: Arc::new(GoogleProviderInner {
                http,
                endpoints,
                identity: IdentityCell::new(credentials, authorizer),
            }),
        }
    }

    pub fn http_client() -> Result<Client, ProviderError> {
        Ok(Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("gcf-deploy/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }

    /// Whether the identity has been resolved by an earlier call.
    pub fn is_authorized(&self) -> bool {
        self.inner.identity.is_resolved()
    }

    /// Attach the bearer token and send, returning status and body.
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ProviderError> {
        let identity = self.inner.identity.get().await?;
        let response = request.bearer_auth(identity.token.as_str()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<T, ProviderError> {
        let (status, body) = self.send(request).await?;
        decode_response(status, &body, context)
    }
}

#[async_trait]
impl StorageOps for GoogleProvider {
    async fn get_bucket(&self, name: &BucketName) -> Result<Option<Bucket>, ProviderError> {
        tracing::debug!(bucket = %name, "Fetching bucket");
        let request = self.inner.http.get(self.inner.endpoints.bucket(&name.escaped()));
        self.call::<Bucket>(request, "bucket")
            .await
            .absent_if_not_found()
    }

    async fn insert_bucket(&self, spec: &BucketSpec) -> Result<Option<Bucket>, ProviderError> {
        tracing::debug!(
            bucket = %spec.name,
            project = %spec.project,
            location = %spec.location,
            "Creating bucket"
        );
        let request = self
            .inner
            .http
            .post(self.inner.endpoints.buckets())
            .query(&[("project", spec.project.as_str())])
            .json(&spec.request_body());
        self.call::<Bucket>(request, "bucket")
            .await
            .absent_if_not_found()
    }

    async fn get_storage_object(
        &self,
        object: &StorageObjectRef,
    ) -> Result<Option<StorageObject>, ProviderError> {
        tracing::debug!(bucket = %object.bucket, object = %object.name, "Fetching object");
        let url = self
            .inner
            .endpoints
            .object(&object.bucket.escaped(), &object.name.escaped());
        let (status, body) = self.send(self.inner.http.get(url)).await?;

        // Transport-level signal; the error body's code is checked below.
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        decode_response::<StorageObject>(status, &body, "object").absent_if_not_found()
    }

    async fn insert_storage_object(
        &self,
        object: &StorageObjectRef,
        archive: &Path,
    ) -> Result<StorageObject, ProviderError> {
        let io_error = |source| ProviderError::Io {
            path: archive.to_path_buf(),
            source,
        };
        let file = tokio::fs::File::open(archive).await.map_err(io_error)?;
        let length = file.metadata().await.map_err(io_error)?.len();

        tracing::debug!(
            bucket = %object.bucket,
            object = %object.name,
            bytes = length,
            "Uploading object"
        );

        let request = self
            .inner
            .http
            .post(self.inner.endpoints.upload(&object.bucket.escaped()))
            .query(&[("uploadType", "media"), ("name", object.name.as_str())])
            .header(CONTENT_TYPE, ZIP_CONTENT_TYPE)
            .header(CONTENT_LENGTH, length)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)));
        self.call(request, "object").await
    }
}

#[async_trait]
impl FunctionOps for GoogleProvider {
    async fn get_function(
        &self,
        name: &FunctionName,
    ) -> Result<Option<CloudFunction>, ProviderError> {
        tracing::debug!(function = %name, "Fetching function");
        let request = self
            .inner
            .http
            .get(self.inner.endpoints.resource(&name.to_string()));
        self.call::<CloudFunction>(request, "function")
            .await
            .absent_if_not_found()
    }

    async fn create_function(&self, spec: &FunctionSpec) -> Result<Operation, ProviderError> {
        tracing::debug!(function = %spec.name, "Creating function");
        let request = self
            .inner
            .http
            .post(self.inner.endpoints.functions_in(&spec.name.parent()))
            .json(&spec.request_body());
        self.call(request, "operation").await
    }

    async fn update_function(&self, spec: &FunctionSpec) -> Result<Operation, ProviderError> {
        tracing::debug!(function = %spec.name, "Updating function");
        let request = self
            .inner
            .http
            .patch(self.inner.endpoints.resource(&spec.name.to_string()))
            .query(&[("updateMask", spec.update_mask())])
            .json(&spec.request_body());
        self.call(request, "operation").await
    }
}

#[async_trait]
impl OperationOps for GoogleProvider {
    async fn get_operation(&self, name: &OperationName) -> Result<Operation, ProviderError> {
        tracing::debug!(operation = %name, "Fetching operation");
        let request = self
            .inner
            .http
            .get(self.inner.endpoints.resource(name.as_str()));
        self.call(request, "operation").await
    }
}

// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use tokio_util::sync::CancellationToken;

use crate::diagnostics::Warning;
use crate::package::{Manifest, PackageRequest, Packager};
use crate::provider::{
    BucketSpec, FunctionOps, FunctionSpec, OperationOps, REGIONAL, StorageObjectRef, StorageOps,
};
use crate::types::FunctionName;

use super::Deployment;
use super::error::DeployError;
use super::poll::wait_for_operation;
use super::state::{
    BucketEnsured, Completed, FunctionAction, FunctionChecked, Initialized, ObjectChecked,
    OperationSubmitted, Packaged, Staged, Uploaded,
};

/// What a successful deployment produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub function: FunctionName,
    pub action: FunctionAction,
    pub source_archive_url: String,
    pub operation: String,
}

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> Deployment<S> {
    /// Move to the next state, handing the current state's data to `next`.
    fn advance<T>(self, next: impl FnOnce(S) -> T) -> Deployment<T> {
        Deployment {
            settings: self.settings,
            diagnostics: self.diagnostics,
            state: next(self.state),
        }
    }
}

// =============================================================================
// Initialized -> Packaged
// =============================================================================

impl Deployment<Initialized> {
    /// Build the archive and read the staged manifest.
    ///
    /// The object name is the configured override, or
    /// `<name>/<name>-<version>.zip` from the manifest.
    #[must_use = "deployment state must be used"]
    pub async fn package<P: Packager + ?Sized>(
        self,
        packager: &P,
        request: &PackageRequest,
    ) -> Result<Deployment<Packaged>, DeployError> {
        let artifact = packager.package(request).await?;
        let manifest = Manifest::load(&artifact.manifest_path()).await?;

        let object_name = match &self.settings.artifact {
            Some(name) => name.clone(),
            None => manifest.object_name(),
        };
        let object = StorageObjectRef::new(self.settings.bucket.clone(), object_name);

        tracing::info!(
            name = %manifest.name,
            version = %manifest.version,
            archive = %artifact.archive.display(),
            object = %object.name,
            "Packaged deployable"
        );

        Ok(self.advance(|Initialized| {
            Packaged(Staged {
                artifact,
                manifest,
                object,
            })
        }))
    }
}

// =============================================================================
// Packaged -> BucketEnsured
// =============================================================================

impl Deployment<Packaged> {
    /// Make sure the target bucket exists, creating it if missing.
    #[must_use = "deployment state must be used"]
    pub async fn ensure_bucket<R: StorageOps + ?Sized>(
        mut self,
        provider: &R,
    ) -> Result<Deployment<BucketEnsured>, DeployError> {
        let bucket = &self.settings.bucket;

        if provider.get_bucket(bucket).await?.is_some() {
            tracing::info!(bucket = %bucket, "Bucket exists");
        } else {
            let spec = BucketSpec {
                project: self.settings.project.clone(),
                name: bucket.clone(),
                location: self.settings.location.clone(),
                storage_class: REGIONAL.to_string(),
            };
            if provider.insert_bucket(&spec).await?.is_some() {
                tracing::info!(bucket = %spec.name, location = %spec.location, "Created bucket");
            } else {
                self.diagnostics.warn(Warning::bucket_unconfirmed(format!(
                    "bucket {bucket} insert returned not found; continuing"
                )));
            }
        }

        Ok(self.advance(|Packaged(staged)| BucketEnsured(staged)))
    }
}

// =============================================================================
// BucketEnsured -> ObjectChecked
// =============================================================================

impl Deployment<BucketEnsured> {
    /// Refuse to continue if this version is already uploaded, unless
    /// overwrite was requested.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::VersionExists` before any upload or function call.
    #[must_use = "deployment state must be used"]
    pub async fn check_object<R: StorageOps + ?Sized>(
        mut self,
        provider: &R,
    ) -> Result<Deployment<ObjectChecked>, DeployError> {
        let object = &self.state.0.object;
        let exists = provider.get_storage_object(object).await?.is_some();

        if exists {
            if !self.settings.overwrite {
                return Err(DeployError::VersionExists {
                    object: object.archive_url(),
                });
            }
            self.diagnostics.warn(Warning::version_overwritten(format!(
                "overwriting existing archive {}",
                object.archive_url()
            )));
        }

        Ok(self.advance(|BucketEnsured(staged)| ObjectChecked {
            staged,
            replaces_existing: exists,
        }))
    }
}

// =============================================================================
// ObjectChecked -> Uploaded
// =============================================================================

impl Deployment<ObjectChecked> {
    #[must_use = "deployment state must be used"]
    pub async fn upload<R: StorageOps + ?Sized>(
        self,
        provider: &R,
    ) -> Result<Deployment<Uploaded>, DeployError> {
        let staged = &self.state.staged;
        let object = provider
            .insert_storage_object(&staged.object, &staged.artifact.archive)
            .await?;

        tracing::info!(object = %object.archive_url(), "Uploaded archive");

        Ok(self.advance(|checked| Uploaded {
            staged: checked.staged,
            object,
        }))
    }
}

// =============================================================================
// Uploaded -> FunctionChecked
// =============================================================================

impl Deployment<Uploaded> {
    /// Look up the function named after the deployable.
    #[must_use = "deployment state must be used"]
    pub async fn check_function<R: FunctionOps + ?Sized>(
        self,
        provider: &R,
    ) -> Result<Deployment<FunctionChecked>, DeployError> {
        let function = FunctionName::new(
            &self.settings.project,
            &self.settings.location,
            &self.state.staged.manifest.name,
        );
        let existing = provider.get_function(&function).await?;

        tracing::info!(function = %function, exists = existing.is_some(), "Checked function");

        Ok(self.advance(|Uploaded { staged, object }| FunctionChecked {
            staged,
            object,
            function,
            existing,
        }))
    }
}

// =============================================================================
// FunctionChecked -> OperationSubmitted
// =============================================================================

impl Deployment<FunctionChecked> {
    /// Descriptor sent on create or update.
    pub fn function_spec(&self) -> FunctionSpec {
        let function = &self.settings.function;
        FunctionSpec {
            name: self.state.function.clone(),
            entry_point: function.entry_point.clone(),
            runtime: function.runtime.clone(),
            timeout: function.timeout,
            available_memory_mb: function.available_memory_mb,
            description: function.description.clone(),
            service_account_email: function.service_account_email.clone(),
            labels: function.labels.clone(),
            source_archive_url: self.state.object.archive_url(),
            trigger: function.trigger.clone(),
        }
    }

    /// Update the function if it exists, otherwise create it.
    #[must_use = "deployment state must be used"]
    pub async fn submit<R: FunctionOps + ?Sized>(
        self,
        provider: &R,
    ) -> Result<Deployment<OperationSubmitted>, DeployError> {
        let spec = self.function_spec();
        let (action, operation) = if self.state.existing.is_some() {
            (FunctionAction::Update, provider.update_function(&spec).await?)
        } else {
            (FunctionAction::Create, provider.create_function(&spec).await?)
        };

        tracing::info!(
            function = %spec.name,
            operation = %operation.name,
            action = %action,
            "Submitted function"
        );

        Ok(self.advance(|checked| OperationSubmitted {
            object: checked.object,
            function: checked.function,
            action,
            operation,
        }))
    }
}

// =============================================================================
// OperationSubmitted -> Completed
// =============================================================================

impl Deployment<OperationSubmitted> {
    /// Poll the operation under the configured policy.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::OperationFailed` with the remote payload,
    /// `DeployError::OperationTimeout`, or `DeployError::Cancelled`.
    #[must_use = "deployment state must be used"]
    pub async fn wait<R: OperationOps + ?Sized>(
        self,
        provider: &R,
        cancel: &CancellationToken,
    ) -> Result<Deployment<Completed>, DeployError> {
        let operation = wait_for_operation(
            provider,
            &self.state.operation.name,
            self.settings.poll,
            cancel,
        )
        .await?;

        tracing::info!(operation = %operation.name, "Operation completed");

        Ok(self.advance(|submitted| Completed {
            object: submitted.object,
            function: submitted.function,
            action: submitted.action,
            operation,
        }))
    }
}

// =============================================================================
// Completed
// =============================================================================

impl Deployment<Completed> {
    pub fn finish(self) -> DeployOutcome {
        DeployOutcome {
            function: self.state.function,
            action: self.state.action,
            source_archive_url: self.state.object.archive_url(),
            operation: self.state.operation.name.into_inner(),
        }
    }
}

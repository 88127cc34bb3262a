// ABOUTME: Generic deployment struct parameterized by state.
// ABOUTME: Holds the settings resolved once from config plus collected warnings.

use crate::config::{Config, FunctionConfig};
use crate::diagnostics::Diagnostics;
use crate::types::{BucketName, ObjectName, OperationName, ProjectId};

use super::poll::PollPolicy;
use super::state::{
    BucketEnsured, Completed, FunctionChecked, Initialized, ObjectChecked, OperationSubmitted,
    Packaged, Staged, Uploaded,
};

/// Inputs to a single deployment run, fixed at construction.
#[derive(Debug, Clone)]
pub struct DeploySettings {
    pub project: ProjectId,
    pub location: String,
    pub bucket: BucketName,
    /// Overrides the `<name>/<name>-<version>.zip` object name.
    pub artifact: Option<ObjectName>,
    pub overwrite: bool,
    pub function: FunctionConfig,
    pub poll: PollPolicy,
}

impl DeploySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            project: config.project_id.clone(),
            location: config.location.clone(),
            bucket: config.bucket.clone(),
            artifact: config.artifact.clone(),
            overwrite: config.overwrite,
            function: config.function.clone(),
            poll: config.poll.into(),
        }
    }
}

/// A deployment in progress, parameterized by its current state.
///
/// The state type `S` carries what earlier steps produced, so the object
/// reference cannot be used before packaging and the operation handle
/// cannot be polled before submission.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) settings: DeploySettings,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    pub fn new(settings: DeploySettings) -> Self {
        Deployment {
            settings,
            diagnostics: Diagnostics::default(),
            state: Initialized,
        }
    }
}

impl<S> Deployment<S> {
    pub fn settings(&self) -> &DeploySettings {
        &self.settings
    }

    /// Warnings collected so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

// State-specific accessors for the staged archive
impl Deployment<Packaged> {
    /// Archive, manifest, and target object for this run.
    pub fn staged(&self) -> &Staged {
        &self.state.0
    }
}

impl Deployment<BucketEnsured> {
    pub fn staged(&self) -> &Staged {
        &self.state.0
    }
}

impl Deployment<ObjectChecked> {
    pub fn staged(&self) -> &Staged {
        &self.state.staged
    }
}

impl Deployment<Uploaded> {
    pub fn staged(&self) -> &Staged {
        &self.state.staged
    }
}

impl Deployment<FunctionChecked> {
    pub fn staged(&self) -> &Staged {
        &self.state.staged
    }
}

impl Deployment<ObjectChecked> {
    /// Whether the upload will replace an object already in the bucket.
    pub fn replaces_existing(&self) -> bool {
        self.state.replaces_existing
    }
}

impl Deployment<FunctionChecked> {
    /// Whether a function record already exists, meaning `submit` updates it.
    pub fn function_exists(&self) -> bool {
        self.state.existing.is_some()
    }
}

impl Deployment<OperationSubmitted> {
    pub fn operation_name(&self) -> &OperationName {
        &self.state.operation.name
    }
}

impl Deployment<Completed> {
    pub fn operation_name(&self) -> &OperationName {
        &self.state.operation.name
    }
}

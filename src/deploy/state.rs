// ABOUTME: Deployment state types for the type state pattern.
// ABOUTME: Each state carries the data produced by the step that reached it.

use crate::package::{Manifest, PackagedArtifact};
use crate::provider::{CloudFunction, Operation, StorageObject, StorageObjectRef};
use crate::types::FunctionName;

/// The packaged archive and where it will live in the bucket.
#[derive(Debug, Clone)]
pub struct Staged {
    pub artifact: PackagedArtifact,
    pub manifest: Manifest,
    pub object: StorageObjectRef,
}

/// Initial state: nothing done yet.
/// Available actions: `package()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Archive built and manifest read.
/// Available actions: `ensure_bucket()`
#[derive(Debug, Clone)]
pub struct Packaged(pub(crate) Staged);

/// Target bucket exists.
/// Available actions: `check_object()`
#[derive(Debug, Clone)]
pub struct BucketEnsured(pub(crate) Staged);

/// Object slot is free, or overwrite was requested.
/// Available actions: `upload()`
#[derive(Debug, Clone)]
pub struct ObjectChecked {
    pub(crate) staged: Staged,
    pub(crate) replaces_existing: bool,
}

/// Archive uploaded.
/// Available actions: `check_function()`
#[derive(Debug, Clone)]
pub struct Uploaded {
    pub(crate) staged: Staged,
    pub(crate) object: StorageObject,
}

/// Existing function record looked up.
/// Available actions: `submit()`
#[derive(Debug, Clone)]
pub struct FunctionChecked {
    pub(crate) staged: Staged,
    pub(crate) object: StorageObject,
    pub(crate) function: FunctionName,
    pub(crate) existing: Option<CloudFunction>,
}

/// Create or update submitted; operation pending.
/// Available actions: `wait()`
#[derive(Debug, Clone)]
pub struct OperationSubmitted {
    pub(crate) object: StorageObject,
    pub(crate) function: FunctionName,
    pub(crate) action: FunctionAction,
    pub(crate) operation: Operation,
}

/// Operation finished without error.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Completed {
    pub(crate) object: StorageObject,
    pub(crate) function: FunctionName,
    pub(crate) action: FunctionAction,
    pub(crate) operation: Operation,
}

/// Whether the function was created or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionAction {
    Create,
    Update,
}

impl std::fmt::Display for FunctionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionAction::Create => f.write_str("created"),
            FunctionAction::Update => f.write_str("updated"),
        }
    }
}

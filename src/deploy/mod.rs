// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports state types, the Deployment struct, polling, and the run driver.

mod deployment;
mod error;
mod poll;
mod state;
mod transitions;

pub use deployment::{DeploySettings, Deployment};
pub use error::{DeployError, DeployErrorKind};
pub use poll::{PollPolicy, wait_for_operation};
pub use state::{
    BucketEnsured, Completed, FunctionAction, FunctionChecked, Initialized, ObjectChecked,
    OperationSubmitted, Packaged, Staged, Uploaded,
};
pub use transitions::DeployOutcome;

use tokio_util::sync::CancellationToken;

use crate::diagnostics::Diagnostics;
use crate::output::Output;
use crate::package::{PackageRequest, Packager};
use crate::provider::RemoteProvider;

/// A finished run: the outcome plus any warnings collected on the way.
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub outcome: DeployOutcome,
    pub diagnostics: Diagnostics,
}

/// Run the whole workflow once, from packaging to the finished operation.
///
/// No step is retried. The first failure ends the run; remote side effects
/// from earlier steps are left in place.
pub async fn run<P, R>(
    settings: DeploySettings,
    packager: &P,
    request: &PackageRequest,
    provider: &R,
    output: &Output,
    cancel: &CancellationToken,
) -> Result<DeployReport, DeployError>
where
    P: Packager + ?Sized,
    R: RemoteProvider + ?Sized,
{
    output.progress("  → Packaging...");
    let deployment = Deployment::new(settings).package(packager, request).await?;

    output.progress(&format!(
        "  → Ensuring bucket {}...",
        deployment.settings().bucket
    ));
    let deployment = deployment.ensure_bucket(provider).await?;

    output.progress(&format!(
        "  → Checking {}...",
        deployment.staged().object.archive_url()
    ));
    let deployment = deployment.check_object(provider).await?;

    output.progress("  → Uploading archive...");
    let deployment = deployment.upload(provider).await?;

    let deployment = deployment.check_function(provider).await?;
    if deployment.function_exists() {
        output.progress("  → Updating function...");
    } else {
        output.progress("  → Creating function...");
    }
    let deployment = deployment.submit(provider).await?;

    output.progress(&format!(
        "  → Waiting for operation {}...",
        deployment.operation_name()
    ));
    let deployment = deployment.wait(provider, cancel).await?;

    let diagnostics = deployment.diagnostics().clone();
    Ok(DeployReport {
        outcome: deployment.finish(),
        diagnostics,
    })
}

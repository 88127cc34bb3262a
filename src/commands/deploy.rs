// ABOUTME: Deploy command implementation.
// ABOUTME: Wires the packager, Google provider, and Ctrl-C cancellation into a run.

use gcf_deploy::config::Config;
use gcf_deploy::deploy::{self, DeploySettings};
use gcf_deploy::error::Result;
use gcf_deploy::output::Output;
use gcf_deploy::package::LocalPackager;
use gcf_deploy::provider::GoogleProvider;
use serde_json::json;
use std::path::Path;
use tokio_util::sync::CancellationToken;

use super::package_request;

pub async fn deploy(config: Config, cwd: &Path, output: &Output) -> Result<()> {
    let request = package_request(&config, cwd);
    let packager = LocalPackager::new(config.prune.command());
    let provider = GoogleProvider::new(config.resolved_credentials(cwd))?;
    let settings = DeploySettings::from_config(&config);

    output.progress(&format!(
        "Deploying to {} in {} ({})",
        config.project_id, settings.location, config.bucket
    ));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted; stopping");
            on_interrupt.cancel();
        }
    });

    let report = deploy::run(settings, &packager, &request, &provider, output, &cancel).await;
    cancel.cancel();
    let report = report?;

    for warning in report.diagnostics.warnings() {
        output.warning(&warning.message);
    }

    let outcome = report.outcome;
    output.success_with(
        &format!("Function {} {}", outcome.function, outcome.action),
        Some(json!({
            "function": outcome.function.to_string(),
            "action": outcome.action.to_string(),
            "source_archive_url": outcome.source_archive_url,
            "operation": outcome.operation,
        })),
    );
    Ok(())
}

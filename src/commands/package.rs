// ABOUTME: Package command implementation.
// ABOUTME: Builds the archive and reports the object name a deploy would use.

use gcf_deploy::config::Config;
use gcf_deploy::error::Result;
use gcf_deploy::output::Output;
use gcf_deploy::package::{LocalPackager, Manifest, Packager};
use serde_json::json;
use std::path::Path;

use super::package_request;

pub async fn package(config: Config, cwd: &Path, output: &Output) -> Result<()> {
    let request = package_request(&config, cwd);
    let packager = LocalPackager::new(config.prune.command());

    output.progress(&format!(
        "Packaging {} into {}",
        request.source_root.display(),
        request.staging_dir().display()
    ));

    let artifact = packager.package(&request).await?;
    let manifest = Manifest::load(&artifact.manifest_path()).await?;
    let object = config
        .artifact
        .clone()
        .unwrap_or_else(|| manifest.object_name());

    output.success_with(
        &format!("{} -> gs://{}/{}", artifact.archive.display(), config.bucket, object),
        Some(json!({
            "archive": artifact.archive.display().to_string(),
            "object": object.as_str(),
            "name": manifest.name.as_str(),
            "version": manifest.version,
        })),
    );
    Ok(())
}

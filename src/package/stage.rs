// ABOUTME: Empties the staging directory and copies matched files into it.
// ABOUTME: Files already present at the destination are left untouched.

use std::path::{Path, PathBuf};

use super::PackageError;

/// Remove everything under `staging_dir`, leaving it as an empty directory.
pub async fn clear_staging_dir(staging_dir: &Path) -> Result<(), PackageError> {
    if tokio::fs::try_exists(staging_dir).await? {
        tokio::fs::remove_dir_all(staging_dir).await?;
    }
    tokio::fs::create_dir_all(staging_dir).await?;
    Ok(())
}

/// Copy each relative path from `source_root` into `staging_dir`.
pub async fn stage_files(
    source_root: &Path,
    staging_dir: &Path,
    files: &[PathBuf],
) -> Result<(), PackageError> {
    for file in files {
        let source = source_root.join(file);
        let destination = staging_dir.join(file);

        if tokio::fs::try_exists(&destination).await? {
            tracing::debug!(path = %file.display(), "Already staged, skipping");
            continue;
        }

        let copy_error = |source| PackageError::Copy {
            path: file.clone(),
            source,
        };
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(copy_error)?;
        }
        tokio::fs::copy(&source, &destination)
            .await
            .map_err(copy_error)?;
    }

    Ok(())
}

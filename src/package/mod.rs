// ABOUTME: Packaging adapter: stage, prune, and zip a project for upload.
// ABOUTME: Packager trait plus the filesystem-backed LocalPackager.

mod archive;
mod error;
mod globs;
mod manifest;
mod prune;
mod stage;

pub use archive::{ARCHIVE_FILENAME, create_archive};
pub use error::PackageError;
pub use globs::resolve_globs;
pub use manifest::{MANIFEST_FILE, Manifest};
pub use prune::PruneCommand;
pub use stage::{clear_staging_dir, stage_files};

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// What to package and where to stage it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Project root; globs are evaluated relative to it.
    pub source_root: PathBuf,
    /// Staging directory, relative to `source_root` unless absolute.
    pub dist_directory: PathBuf,
    /// Glob patterns; a leading `!` marks an exclusion.
    pub globs: Vec<String>,
}

impl PackageRequest {
    pub fn staging_dir(&self) -> PathBuf {
        self.source_root.join(&self.dist_directory)
    }

    /// Caller globs plus the manifest file, without duplicates.
    pub fn effective_globs(&self) -> Vec<String> {
        let mut globs = self.globs.clone();
        if !globs.iter().any(|g| g == MANIFEST_FILE) {
            globs.push(MANIFEST_FILE.to_string());
        }
        globs
    }
}

/// Result of packaging: the staged tree and the archive built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    pub staging_dir: PathBuf,
    pub archive: PathBuf,
}

impl PackagedArtifact {
    pub fn manifest_path(&self) -> PathBuf {
        self.staging_dir.join(MANIFEST_FILE)
    }
}

/// Produces a deployable archive from a project directory.
#[async_trait]
pub trait Packager: Send + Sync {
    async fn package(&self, request: &PackageRequest) -> Result<PackagedArtifact, PackageError>;
}

/// Stages matched files into the dist directory, prunes dev dependencies,
/// and zips the result next to the dist directory.
#[derive(Debug, Clone, Default)]
pub struct LocalPackager {
    prune: Option<PruneCommand>,
}

impl LocalPackager {
    pub fn new(prune: Option<PruneCommand>) -> Self {
        Self { prune }
    }

    fn archive_path(staging_dir: &Path) -> PathBuf {
        match staging_dir.parent() {
            Some(parent) => parent.join(ARCHIVE_FILENAME),
            None => PathBuf::from(ARCHIVE_FILENAME),
        }
    }
}

/// Drop matches that are packaging output: anything under the staging
/// directory and the archive itself.
fn without_outputs(
    files: Vec<PathBuf>,
    source_root: &Path,
    staging_dir: &Path,
    archive: &Path,
) -> Vec<PathBuf> {
    let staging = staging_dir.strip_prefix(source_root).ok();
    let archive = archive.strip_prefix(source_root).ok();
    files
        .into_iter()
        .filter(|file| {
            !staging.is_some_and(|staging| file.starts_with(staging))
                && archive != Some(file.as_path())
        })
        .collect()
}

#[async_trait]
impl Packager for LocalPackager {
    async fn package(&self, request: &PackageRequest) -> Result<PackagedArtifact, PackageError> {
        let staging_dir = request.staging_dir();
        let archive = Self::archive_path(&staging_dir);
        let globs = request.effective_globs();

        clear_staging_dir(&staging_dir).await?;

        let files = resolve_globs(&request.source_root, &globs)?;
        let files = without_outputs(files, &request.source_root, &staging_dir, &archive);
        tracing::debug!(files = files.len(), staging = %staging_dir.display(), "Staging files");
        stage_files(&request.source_root, &staging_dir, &files).await?;

        if let Some(prune) = &self.prune {
            prune.run(&staging_dir).await?;
        }

        create_archive(&staging_dir, &archive).await?;
        tracing::info!(archive = %archive.display(), "Created archive");

        Ok(PackagedArtifact {
            staging_dir,
            archive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(globs: &[&str]) -> PackageRequest {
        PackageRequest {
            source_root: PathBuf::from("/project"),
            dist_directory: PathBuf::from("dist"),
            globs: globs.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn effective_globs_always_include_manifest() {
        assert_eq!(request(&[]).effective_globs(), vec!["package.json"]);
        assert_eq!(
            request(&["*.js"]).effective_globs(),
            vec!["*.js", "package.json"]
        );
    }

    #[test]
    fn effective_globs_do_not_duplicate_manifest() {
        assert_eq!(
            request(&["package.json", "*.js"]).effective_globs(),
            vec!["package.json", "*.js"]
        );
    }

    #[test]
    fn archive_sits_next_to_staging_dir() {
        assert_eq!(
            LocalPackager::archive_path(Path::new("/project/dist")),
            PathBuf::from("/project/package.zip")
        );
    }

    #[test]
    fn packaging_outputs_are_not_restaged() {
        let files = vec![
            PathBuf::from("index.js"),
            PathBuf::from("dist/index.js"),
            PathBuf::from("dist/lib/util.js"),
            PathBuf::from("distribution/keep.js"),
            PathBuf::from("package.zip"),
            PathBuf::from("lib/package.zip"),
        ];

        let kept = without_outputs(
            files,
            Path::new("/project"),
            Path::new("/project/dist"),
            Path::new("/project/package.zip"),
        );

        assert_eq!(
            kept,
            vec![
                PathBuf::from("index.js"),
                PathBuf::from("distribution/keep.js"),
                PathBuf::from("lib/package.zip"),
            ]
        );
    }

    #[test]
    fn outputs_outside_the_root_filter_nothing() {
        let files = vec![PathBuf::from("index.js"), PathBuf::from("dist/index.js")];

        let kept = without_outputs(
            files.clone(),
            Path::new("/project"),
            Path::new("/elsewhere/dist"),
            Path::new("/elsewhere/package.zip"),
        );

        assert_eq!(kept, files);
    }
}

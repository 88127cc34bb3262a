// ABOUTME: Integration tests for the local packager.
// ABOUTME: Stages globbed files, optionally prunes, and zips next to the dist directory.

use gcf_deploy::package::{
    LocalPackager, Manifest, PackageError, PackageRequest, Packager, PruneCommand,
};
use std::fs;
use std::path::{Path, PathBuf};

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(
        root.join("package.json"),
        r#"{"name": "hello", "version": "1.4.0", "devDependencies": {}}"#,
    )
    .unwrap();
    fs::write(root.join("index.js"), "exports.handler = () => {};").unwrap();
    fs::write(root.join("skip.js"), "// local only").unwrap();
    fs::write(root.join("lib/util.js"), "module.exports = {};").unwrap();
    fs::write(root.join("lib/util.test.js"), "test();").unwrap();
    fs::write(root.join("README.md"), "# hello").unwrap();
    dir
}

fn request(root: &Path, globs: &[&str]) -> PackageRequest {
    PackageRequest {
        source_root: root.to_path_buf(),
        dist_directory: PathBuf::from("dist"),
        globs: globs.iter().map(|g| g.to_string()).collect(),
    }
}

fn entries(archive: &Path) -> Vec<String> {
    let file = fs::File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    zip.file_names().map(str::to_string).collect()
}

#[tokio::test]
async fn packages_selected_files_and_manifest() {
    let dir = project();
    let request = request(
        dir.path(),
        &["*.js", "lib/**/*.js", "!lib/**/*.test.js", "!skip.js"],
    );

    let artifact = LocalPackager::new(None).package(&request).await.unwrap();

    assert_eq!(artifact.staging_dir, dir.path().join("dist"));
    assert_eq!(artifact.archive, dir.path().join("package.zip"));

    let mut names = entries(&artifact.archive);
    names.sort();
    assert_eq!(names, vec!["index.js", "lib/util.js", "package.json"]);

    assert!(!artifact.staging_dir.join("skip.js").exists());
    assert!(!artifact.staging_dir.join("README.md").exists());

    let manifest = Manifest::load(&artifact.manifest_path()).await.unwrap();
    assert_eq!(manifest.object_name().as_str(), "hello/hello-1.4.0.zip");
}

#[tokio::test]
async fn repackaging_clears_stale_staged_files() {
    let dir = project();
    let packager = LocalPackager::new(None);

    packager
        .package(&request(dir.path(), &["*.js"]))
        .await
        .unwrap();
    assert!(dir.path().join("dist/skip.js").exists());

    packager
        .package(&request(dir.path(), &["index.js"]))
        .await
        .unwrap();
    assert!(!dir.path().join("dist/skip.js").exists());
    assert!(dir.path().join("dist/index.js").exists());
}

#[tokio::test]
async fn repackaging_with_recursive_glob_ignores_previous_output() {
    let dir = project();
    let packager = LocalPackager::new(None);
    let request = request(dir.path(), &["**/*.js", "!**/*.test.js"]);

    packager.package(&request).await.unwrap();
    let artifact = packager.package(&request).await.unwrap();

    assert!(!dir.path().join("dist/dist").exists());
    let mut names = entries(&artifact.archive);
    names.sort();
    assert_eq!(
        names,
        vec!["index.js", "lib/util.js", "package.json", "skip.js"]
    );
}

#[tokio::test]
async fn missing_manifest_in_staged_tree_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.js"), "").unwrap();

    let artifact = LocalPackager::new(None)
        .package(&request(dir.path(), &["*.js"]))
        .await
        .unwrap();

    assert!(Manifest::load(&artifact.manifest_path()).await.is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn prune_runs_in_staging_directory() {
    let dir = project();
    let prune = PruneCommand::from_argv(&[
        "sh".to_string(),
        "-c".to_string(),
        "touch pruned".to_string(),
    ]);

    let artifact = LocalPackager::new(prune)
        .package(&request(dir.path(), &["index.js"]))
        .await
        .unwrap();

    assert!(artifact.staging_dir.join("pruned").exists());
    assert!(entries(&artifact.archive).contains(&"pruned".to_string()));
}

#[cfg(unix)]
#[tokio::test]
async fn failing_prune_fails_packaging() {
    let dir = project();
    let prune = PruneCommand::from_argv(&[
        "sh".to_string(),
        "-c".to_string(),
        "echo boom >&2; exit 3".to_string(),
    ]);

    let err = LocalPackager::new(prune)
        .package(&request(dir.path(), &["index.js"]))
        .await
        .unwrap_err();

    match err {
        PackageError::PruneFailed { stderr, .. } => assert_eq!(stderr, "boom"),
        other => panic!("expected prune failure, got {other:?}"),
    }
    assert!(!dir.path().join("package.zip").exists());
}

#[tokio::test]
async fn invalid_glob_is_reported() {
    let dir = project();
    let err = LocalPackager::new(None)
        .package(&request(dir.path(), &["lib/[.js"]))
        .await
        .unwrap_err();

    assert!(matches!(err, PackageError::InvalidGlob { .. }));
}

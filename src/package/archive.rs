// ABOUTME: Deterministic zip archive of a staged directory.
// ABOUTME: Sorted entries, fixed timestamps, maximum deflate compression.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::PackageError;

pub const ARCHIVE_FILENAME: &str = "package.zip";

/// Zip the contents of `src` (at the archive root) into `dest`.
pub async fn create_archive(src: &Path, dest: &Path) -> Result<(), PackageError> {
    let src = src.to_owned();
    let dest = dest.to_owned();
    spawn_blocking(move || create_archive_sync(&src, &dest)).await?
}

fn create_archive_sync(src: &Path, dest: &Path) -> Result<(), PackageError> {
    let mut files = Vec::new();
    collect_files(src, &mut files)?;
    files.sort();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut writer = ZipWriter::new(BufWriter::new(File::create(dest)?));
    for path in files {
        let Ok(relative) = path.strip_prefix(src) else {
            continue;
        };
        writer.start_file(entry_name(relative), options)?;
        io::copy(&mut File::open(&path)?, &mut writer)?;
    }
    writer.finish()?.flush()?;

    Ok(())
}

/// Archive entry names always use forward slashes.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), files)?;
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }
    Ok(())
}

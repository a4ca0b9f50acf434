// Packing the publish directory into a gzipped tarball for upload.

use anyhow::{bail, Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

use crate::config::PROJECT_CONFIG_FILE;

/// Hidden entries (`.git`, `.DS_Store`, ...) and a top-level `rise.json`
/// never get published.
fn is_excluded(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.depth() == 1 && name == PROJECT_CONFIG_FILE)
}

/// Write a gzipped tar of `src` to `out`. Paths in the archive are relative
/// to `src`. Returns the number of files packed.
pub fn pack<W: Write>(src: &Path, out: W) -> Result<usize> {
    if !src.is_dir() {
        bail!("{} is not a directory", src.display());
    }

    let mut builder = tar::Builder::new(GzEncoder::new(out, Compression::default()));
    let mut files = 0;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e));
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to read {}", src.display()))?;
        let rel = entry.path().strip_prefix(src)?;
        if entry.file_type().is_dir() {
            builder.append_dir(rel, entry.path())?;
        } else if entry.file_type().is_file() {
            builder
                .append_path_with_name(entry.path(), rel)
                .with_context(|| format!("Failed to add {}", entry.path().display()))?;
            files += 1;
        }
    }

    builder.into_inner()?.finish()?;
    Ok(files)
}

/// Pack `src` into a temporary `.tar.gz` that is removed when dropped.
pub fn pack_to_tempfile(src: &Path) -> Result<(NamedTempFile, usize)> {
    let mut file = tempfile::Builder::new()
        .prefix("rise-")
        .suffix(".tar.gz")
        .tempfile()
        .context("Failed to create temporary file")?;
    let files = pack(src, file.as_file_mut())?;
    file.as_file_mut().flush()?;
    Ok((file, files))
}

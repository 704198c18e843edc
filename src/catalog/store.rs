//! Catalog file I/O
//!
//! Rewrites go through a temporary file in the catalog's own directory that
//! is renamed over the original, so a failed run never leaves a half-written
//! catalog behind.

use crate::core::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn read_catalog_text(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Replace the file at `path` with `contents` atomically
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;

    // Keep the original file's permissions
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(path)?;
    tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

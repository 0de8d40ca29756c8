//! Filesystem helpers.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::CodecResult;

/// Writes `bytes` to `path` through a temporary file in the same directory,
/// then renames it into place.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> CodecResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

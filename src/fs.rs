//! Destination file handling
//!
//! The generated file is written to a temporary file next to the
//! destination and renamed over it, so readers only ever see the previous
//! complete file or the new complete file.

use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{StackError, StackResult};

/// Write `content` to `path`, replacing any existing file atomically.
pub fn write_atomic(path: &Path, content: &[u8]) -> StackResult<()> {
    let write_err = |source| StackError::DestinationWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(content).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote destination");
    Ok(())
}

/// Compute SHA-256 hash of content, as `sha256:<hex>`
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{:x}", hasher.finalize())
}

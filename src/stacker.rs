//! Content stacking
//!
//! Reads every resolved path into memory. Directories are expanded into
//! their children, so a directory can be passed where a file is expected.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path};

use crate::error::{StackError, StackResult};

/// Relative key to raw content. Iteration order is unspecified; the emitter
/// sorts before writing.
pub type ContentTable = HashMap<String, Vec<u8>>;

/// Read every path of `files` into a table keyed relative to `base_dir`.
///
/// Any failure aborts the whole stack; no partial table is returned. Paths
/// that only lead to empty directories yield `NoFilesFound`.
pub fn stack(files: &[impl AsRef<Path>], base_dir: &Path) -> StackResult<ContentTable> {
    let mut table = ContentTable::new();
    for path in files {
        stack_entry(path.as_ref(), base_dir, &mut table)?;
    }
    if table.is_empty() {
        return Err(StackError::NoFilesFound {
            dir: base_dir.to_path_buf(),
        });
    }
    tracing::info!(entries = table.len(), "stacked file contents");
    Ok(table)
}

fn stack_entry(path: &Path, base_dir: &Path, table: &mut ContentTable) -> StackResult<()> {
    let meta = fs::metadata(path).map_err(|source| StackError::PathStat {
        path: path.to_path_buf(),
        source,
    })?;

    if meta.is_dir() {
        for child in list_children(path)? {
            stack_entry(&child, base_dir, table)?;
        }
        return Ok(());
    }

    let content = read_file(path)?;
    let key = relative_key(path, base_dir);
    tracing::debug!(key = %key, bytes = content.len(), "stacked");
    table.insert(key, content);
    Ok(())
}

fn list_children(dir: &Path) -> StackResult<Vec<std::path::PathBuf>> {
    let stat_err = |source| StackError::PathStat {
        path: dir.to_path_buf(),
        source,
    };
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(stat_err)? {
        children.push(entry.map_err(stat_err)?.path());
    }
    children.sort();
    Ok(children)
}

/// The handle is closed when this returns, before the next path is opened.
fn read_file(path: &Path) -> StackResult<Vec<u8>> {
    let read_err = |source| StackError::IoRead {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(read_err)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content).map_err(read_err)?;
    Ok(content)
}

/// Key for `path`: the base directory prefix removed, `/` as separator.
pub fn relative_key(path: &Path, base_dir: &Path) -> String {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect();
    let joined = parts.join("/");
    if relative.has_root() {
        format!("/{}", joined)
    } else {
        joined
    }
}

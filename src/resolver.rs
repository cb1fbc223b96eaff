//! File resolution
//!
//! Decides which paths get embedded. Exactly one strategy applies, checked in
//! this order:
//!
//! 1. explicit file names, joined onto the base directory in input order
//! 2. a glob pattern evaluated inside the base directory
//! 3. every immediate entry of the base directory whose extension is not
//!    the excluded one (`rs` by default, so generated output and sources
//!    are never re-embedded)

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StackError, StackResult};

/// Extension skipped by the directory scan
pub const DEFAULT_EXCLUDE_EXTENSION: &str = "rs";

/// Ordered paths to embed. Duplicates are kept as given.
pub type FileSet = Vec<PathBuf>;

/// Inputs for [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub explicit_files: Vec<String>,
    pub pattern: Option<String>,
    pub base_dir: PathBuf,
    pub exclude_extension: String,
}

impl ResolutionRequest {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            explicit_files: Vec::new(),
            pattern: None,
            base_dir: base_dir.into(),
            exclude_extension: DEFAULT_EXCLUDE_EXTENSION.to_string(),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_exclude_extension(mut self, ext: impl Into<String>) -> Self {
        self.exclude_extension = ext.into().trim_start_matches('.').to_string();
        self
    }
}

/// Which strategy produced a [`FileSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Explicit,
    Pattern,
    DirectoryScan,
}

/// Resolve the request into absolute paths.
///
/// Fails with `NoFilesFound` instead of returning an empty set.
pub fn resolve(request: &ResolutionRequest) -> StackResult<FileSet> {
    let (strategy, files) = resolve_with_strategy(request)?;
    if files.is_empty() {
        return Err(StackError::NoFilesFound {
            dir: request.base_dir.clone(),
        });
    }
    tracing::info!(
        strategy = ?strategy,
        count = files.len(),
        dir = %request.base_dir.display(),
        "resolved files"
    );
    Ok(files)
}

/// Like [`resolve`] but also reports the strategy and allows an empty set.
pub fn resolve_with_strategy(request: &ResolutionRequest) -> StackResult<(Strategy, FileSet)> {
    if !request.explicit_files.is_empty() {
        let files = request
            .explicit_files
            .iter()
            .map(|name| request.base_dir.join(name))
            .collect();
        return Ok((Strategy::Explicit, files));
    }

    if let Some(pattern) = &request.pattern {
        return Ok((Strategy::Pattern, expand_pattern(&request.base_dir, pattern)?));
    }

    Ok((
        Strategy::DirectoryScan,
        scan_directory(&request.base_dir, &request.exclude_extension)?,
    ))
}

/// Expand a glob inside `base_dir`. `*` never crosses a path separator and
/// `**` means the same as `*`.
fn expand_pattern(base_dir: &Path, pattern: &str) -> StackResult<FileSet> {
    let mut single_level = pattern.to_string();
    while single_level.contains("**") {
        single_level = single_level.replace("**", "*");
    }

    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&base_dir.to_string_lossy()),
        single_level
    );
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let matches = glob::glob_with(&full, options).map_err(|e| StackError::Pattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in matches {
        let path = entry.map_err(|e| StackError::PathStat {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        files.push(path);
    }

    tracing::debug!(pattern, matches = files.len(), "expanded pattern");
    Ok(files)
}

/// List the immediate entries of `dir`, skipping `exclude_extension`.
/// Sorted by name so scans are reproducible.
fn scan_directory(dir: &Path, exclude_extension: &str) -> StackResult<FileSet> {
    let stat_err = |source| StackError::PathStat {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(stat_err)? {
        let path = entry.map_err(stat_err)?.path();
        if path.extension() == Some(OsStr::new(exclude_extension)) {
            tracing::trace!(path = %path.display(), "skipping source file");
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

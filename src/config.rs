//! Configuration for tplstack
//!
//! Defaults come from `[package.metadata.tplstack]` in the host crate's
//! manifest, then `TPLSTACK_*` environment variables, then CLI flags:
//!
//! ```toml
//! [package.metadata.tplstack]
//! var = "Assets"
//! out = "src/assets.rs"
//! exclude-extension = "rs"
//! canonicalizer = "rustfmt"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::canonical::CanonicalizerKind;
use crate::error::{StackError, StackResult};

/// Values read from the manifest metadata table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Embedded variable name
    pub var: Option<String>,
    /// Destination, relative to the manifest directory
    pub out: Option<PathBuf>,
    /// Extension skipped by the directory scan
    pub exclude_extension: Option<String>,
    pub canonicalizer: Option<CanonicalizerKind>,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub suggestion: Option<String>,
}

impl Config {
    /// Parse the metadata table and collect unknown keys as warnings.
    pub fn from_metadata(
        metadata: Option<&toml::Value>,
        manifest_path: &Path,
    ) -> StackResult<(Config, Vec<ConfigWarning>)> {
        let Some(value) = metadata else {
            return Ok((Config::default(), Vec::new()));
        };

        let mut unknown_paths: Vec<String> = Vec::new();
        let config: Config = serde_ignored::deserialize(value.clone(), |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| StackError::Manifest {
            path: manifest_path.to_path_buf(),
            message: format!("[package.metadata.tplstack]: {}", e),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ConfigWarning {
                suggestion: suggest_key(&key),
                key,
                file: manifest_path.to_path_buf(),
            })
            .collect();

        Ok((config, warnings))
    }

    /// Apply `TPLSTACK_*` overrides from the process environment
    pub fn with_env_overrides(self) -> StackResult<Config> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source
    pub fn with_env_from<F>(mut self, get: F) -> StackResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(var) = get("TPLSTACK_VAR").filter(|v| !v.is_empty()) {
            self.var = Some(var);
        }

        if let Some(out) = get("TPLSTACK_OUT").filter(|v| !v.is_empty()) {
            self.out = Some(PathBuf::from(out));
        }

        if let Some(kind) = get("TPLSTACK_CANONICALIZER").filter(|v| !v.is_empty()) {
            let parsed =
                CanonicalizerKind::parse(&kind).ok_or_else(|| StackError::Argument {
                    message: format!(
                        "TPLSTACK_CANONICALIZER must be 'syn' or 'rustfmt', got '{}'",
                        kind
                    ),
                })?;
            self.canonicalizer = Some(parsed);
        }

        Ok(self)
    }
}

/// Closest known key within two edits, if any
fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &["var", "out", "exclude-extension", "canonicalizer"];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, strsim::levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

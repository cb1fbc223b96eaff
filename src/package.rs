//! Package introspection
//!
//! The generator only needs two facts about the host crate: its name and
//! where its manifest lives. [`PackageProvider`] is the seam; [`CargoManifest`]
//! answers from the nearest `Cargo.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{StackError, StackResult};

/// Name and location of the package a generated file belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    /// Crate name as used in Rust paths (`-` replaced by `_`)
    pub name: String,
    /// Directory holding the manifest
    pub dir: PathBuf,
    /// Path of the manifest itself
    pub manifest_path: PathBuf,
    /// `[package.metadata.tplstack]`, if present
    pub metadata: Option<toml::Value>,
}

/// Look up the package that owns a directory
pub trait PackageProvider {
    fn lookup(&self, dir: &Path) -> StackResult<PackageInfo>;
}

/// Finds the closest `Cargo.toml` with a `[package]` table, walking up from
/// the directory. Virtual workspace manifests are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoManifest;

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    name: String,
    #[serde(default)]
    metadata: Option<ManifestMetadata>,
}

#[derive(Debug, Deserialize)]
struct ManifestMetadata {
    tplstack: Option<toml::Value>,
}

impl PackageProvider for CargoManifest {
    fn lookup(&self, dir: &Path) -> StackResult<PackageInfo> {
        for ancestor in dir.ancestors() {
            let manifest_path = ancestor.join("Cargo.toml");
            if !manifest_path.is_file() {
                continue;
            }
            if let Some(info) = read_manifest(&manifest_path)? {
                tracing::debug!(
                    package = %info.name,
                    manifest = %manifest_path.display(),
                    "found package manifest"
                );
                return Ok(info);
            }
        }
        Err(StackError::PackageNotFound {
            dir: dir.to_path_buf(),
        })
    }
}

fn read_manifest(path: &Path) -> StackResult<Option<PackageInfo>> {
    let content = fs::read_to_string(path).map_err(|source| StackError::IoRead {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Manifest = toml::from_str(&content).map_err(|e| StackError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let Some(package) = manifest.package else {
        return Ok(None);
    };

    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(Some(PackageInfo {
        name: package.name.replace('-', "_"),
        dir,
        manifest_path: path.to_path_buf(),
        metadata: package.metadata.and_then(|m| m.tplstack),
    }))
}

/// Fixed answer, for callers that already know their package.
#[derive(Debug, Clone)]
pub struct StaticPackage(pub PackageInfo);

impl PackageProvider for StaticPackage {
    fn lookup(&self, _dir: &Path) -> StackResult<PackageInfo> {
        Ok(self.0.clone())
    }
}

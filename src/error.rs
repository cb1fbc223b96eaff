//! Error types for tplstack
//!
//! Library code returns `StackResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tplstack operations
pub type StackResult<T> = Result<T, StackError>;

/// Main error type for tplstack operations
#[derive(Error, Debug)]
pub enum StackError {
    /// Malformed flag usage or an invalid configuration value
    #[error("invalid arguments: {message}")]
    Argument { message: String },

    /// None of the resolution strategies produced a path
    #[error("no files found in directory `{}`", dir.display())]
    NoFilesFound { dir: PathBuf },

    /// Stat or directory listing failed during resolution
    #[error("cannot access {}: {source}", path.display())]
    PathStat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The discovery pattern is not a valid glob
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Reading a resolved file failed while stacking
    #[error("failed to read {}: {source}", path.display())]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No Cargo.toml with a `[package]` table above the directory
    #[error("no package manifest found for directory `{}`", dir.display())]
    PackageNotFound { dir: PathBuf },

    /// Cargo.toml exists but cannot be understood
    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// The embedded variable name cannot become a Rust identifier
    #[error("'{name}' cannot be used as a variable name")]
    InvalidVariableName { name: String },

    /// The canonicalizer rejected the emitted text
    #[error("generated source does not parse: {message}\n--- generated source ---\n{source_text}")]
    EmissionSyntax {
        message: String,
        source_text: String,
    },

    /// The external formatter could not be run
    #[error("canonicalizer failed: {message}")]
    Canonicalizer { message: String },

    /// Creating or replacing the destination file failed
    #[error("failed to write {}: {source}", path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text is not a table written by tplstack
    #[error("cannot decode generated table: {message}")]
    Decode { message: String },

    /// A written table does not decode back to the stacked content
    #[error("verification of {} failed: {message}", path.display())]
    Verify { path: PathBuf, message: String },
}

impl StackError {
    /// Short machine-readable code used by JSON output
    pub fn code(&self) -> &'static str {
        match self {
            StackError::Argument { .. } => "argument",
            StackError::NoFilesFound { .. } => "no_files_found",
            StackError::PathStat { .. } => "path_stat",
            StackError::Pattern { .. } => "pattern",
            StackError::IoRead { .. } => "io_read",
            StackError::PackageNotFound { .. } => "package_not_found",
            StackError::Manifest { .. } => "manifest",
            StackError::InvalidVariableName { .. } => "invalid_variable_name",
            StackError::EmissionSyntax { .. } => "emission_syntax",
            StackError::Canonicalizer { .. } => "canonicalizer",
            StackError::DestinationWrite { .. } => "destination_write",
            StackError::Decode { .. } => "decode",
            StackError::Verify { .. } => "verify",
        }
    }
}

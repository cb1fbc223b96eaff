//! tplstack - embed files into a generated Rust source table
//!
//! tplstack reads a set of files (named explicitly, matched by a glob, or
//! found by scanning a directory) and writes a Rust module holding a
//! `pub static` table from relative path to file content, so a crate can
//! ship those files without reading them at runtime.

pub mod canonical;
pub mod cli;
pub mod config;
pub mod emitter;
pub mod encoder;
pub mod error;
pub mod fs;
pub mod generator;
pub mod package;
pub mod resolver;
pub mod stacker;

// Re-exports for convenience
pub use canonical::{Canonicalize, CanonicalizerKind, Rustfmt, SynCheck};
pub use cli::Cli;
pub use config::{Config, ConfigWarning};
pub use emitter::{decode, emit, EmitOptions, DEFAULT_VAR_NAME};
pub use error::{StackError, StackResult};
pub use generator::{prepare, GenerationOutput, Generator, Settings};
pub use package::{CargoManifest, PackageInfo, PackageProvider, StaticPackage};
pub use resolver::{resolve, FileSet, ResolutionRequest, Strategy};
pub use stacker::{stack, ContentTable};

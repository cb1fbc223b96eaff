//! Command-line argument model
//!
//! Positional tokens are file names relative to the base directory. Every
//! value-taking flag requires its value; a trailing flag without one is an
//! argument error.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::resolver::ResolutionRequest;

/// tplstack - embed files into a generated Rust source table
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "tplstack")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Files or directories to embed, relative to the base directory
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Glob pattern used when no files are named (`*` stays within one directory)
    #[arg(short = 'e', long = "regex", value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Name of the embedded variable [default: Tpl]
    #[arg(short = 'V', long = "var", value_name = "NAME")]
    pub var: Option<String>,

    /// Subdirectory of the working directory to embed from
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Destination file [default: <dir>/<crate>_templated.rs]
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Format the output with rustfmt instead of only validating it
    #[arg(long)]
    pub rustfmt: bool,

    /// Print the generated source instead of writing it
    #[arg(long, conflicts_with_all = ["out", "verify"])]
    pub stdout: bool,

    /// Read the written file back and check it decodes to the input files
    #[arg(long)]
    pub verify: bool,

    /// Output format for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// Directory the files are resolved against
    pub fn base_dir(&self, cwd: &Path) -> PathBuf {
        match &self.path {
            Some(path) => cwd.join(path),
            None => cwd.to_path_buf(),
        }
    }

    /// Build the resolution request for this invocation
    pub fn to_request(&self, cwd: &Path) -> ResolutionRequest {
        let mut request = ResolutionRequest::new(self.base_dir(cwd)).with_files(self.files.clone());
        if let Some(pattern) = &self.pattern {
            request = request.with_pattern(pattern.clone());
        }
        request
    }
}

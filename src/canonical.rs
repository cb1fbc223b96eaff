//! Canonicalization of emitted source
//!
//! The emitter hands its complete text to a [`Canonicalize`] implementation
//! before anything touches the disk. A syntax error reported here almost
//! always means a literal was not escaped properly.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::Deserialize;

use crate::error::{StackError, StackResult};

/// Reformat or validate generated Rust source
pub trait Canonicalize {
    /// Return the canonical form of `source`, or an `EmissionSyntax` error
    fn canonicalize(&self, source: &str) -> StackResult<String>;
}

/// Which canonicalizer a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalizerKind {
    /// Parse with `syn` and keep the emitter's layout
    #[default]
    Syn,
    /// Pipe through `rustfmt`
    Rustfmt,
}

impl CanonicalizerKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "syn" => Some(CanonicalizerKind::Syn),
            "rustfmt" => Some(CanonicalizerKind::Rustfmt),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn Canonicalize> {
        match self {
            CanonicalizerKind::Syn => Box::new(SynCheck),
            CanonicalizerKind::Rustfmt => Box::new(Rustfmt::default()),
        }
    }
}

/// Validates the text with `syn` and returns it unchanged.
///
/// Inner attributes and inner doc comments are rejected: the generated file
/// must stay usable through `include!`, where only items are allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynCheck;

impl Canonicalize for SynCheck {
    fn canonicalize(&self, source: &str) -> StackResult<String> {
        let syntax_err = |message: String| StackError::EmissionSyntax {
            message,
            source_text: source.to_string(),
        };

        let file = syn::parse_file(source).map_err(|e| syntax_err(e.to_string()))?;
        if !file.attrs.is_empty() {
            return Err(syntax_err(
                "inner attributes cannot be expanded by `include!`".to_string(),
            ));
        }
        Ok(source.to_string())
    }
}

/// Formats the text with an external `rustfmt` binary.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    pub program: String,
    pub edition: String,
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self {
            program: "rustfmt".to_string(),
            edition: "2021".to_string(),
        }
    }
}

impl Canonicalize for Rustfmt {
    fn canonicalize(&self, source: &str) -> StackResult<String> {
        // rustfmt's diagnostics are harder to read than syn's
        SynCheck.canonicalize(source)?;

        let mut child = Command::new(&self.program)
            .args(["--edition", &self.edition])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StackError::Canonicalizer {
                message: format!("cannot run {}: {}", self.program, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| StackError::Canonicalizer {
                    message: format!("cannot write to {}: {}", self.program, e),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| StackError::Canonicalizer {
                message: format!("{} did not finish: {}", self.program, e),
            })?;

        if !output.status.success() {
            return Err(StackError::EmissionSyntax {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                source_text: source.to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| StackError::Canonicalizer {
            message: format!("{} produced invalid UTF-8: {}", self.program, e),
        })
    }
}

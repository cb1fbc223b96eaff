//! Test environment builder for isolated tplstack runs.
//!
//! Provides `TestEnv` - a throwaway crate (Cargo.toml plus files) in a temp
//! directory, and helpers to run the tplstack binary inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running a tplstack CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated crate with a temp directory as its root.
pub struct TestEnv {
    /// Temporary directory for the crate
    pub project_root: TempDir,
    /// Path to the tplstack binary
    bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run tplstack from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run tplstack from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    /// Run tplstack from the project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run tplstack from a specific directory with extra env vars.
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("TPLSTACK_VAR")
            .env_remove("TPLSTACK_OUT")
            .env_remove("TPLSTACK_CANONICALIZER");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute tplstack");

        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Read a project file as text
    pub fn read_file(&self, relative_path: &str) -> String {
        let full_path = self.project_path(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    /// Write a file to the project directory
    pub fn write_file(&self, relative_path: &str, content: &[u8]) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Decode a generated file back into its table
    pub fn decode(&self, relative_path: &str) -> std::collections::BTreeMap<String, Vec<u8>> {
        tplstack::decode(&self.read_file(relative_path))
            .unwrap_or_else(|e| panic!("{} is not a generated table: {}", relative_path, e))
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    package_name: String,
    metadata: Option<String>,
    files: Vec<(String, Vec<u8>)>,
    write_manifest: bool,
}

impl TestEnvBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            package_name: "demo".to_string(),
            metadata: None,
            files: Vec::new(),
            write_manifest: true,
        }
    }

    /// Set the `[package] name` of the manifest
    pub fn with_package_name(mut self, name: &str) -> Self {
        self.package_name = name.to_string();
        self
    }

    /// Set the body of `[package.metadata.tplstack]`
    pub fn with_metadata(mut self, toml: &str) -> Self {
        self.metadata = Some(toml.to_string());
        self
    }

    /// Add a file to the project
    pub fn with_file(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.files
            .push((name.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Do not write a Cargo.toml
    pub fn without_manifest(mut self) -> Self {
        self.write_manifest = false;
        self
    }

    /// Build the TestEnv
    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project temp dir");

        let env = TestEnv {
            project_root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_tplstack")),
        };

        if self.write_manifest {
            let mut manifest = format!(
                "[package]\nname = \"{}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
                self.package_name
            );
            if let Some(metadata) = &self.metadata {
                manifest.push_str("\n[package.metadata.tplstack]\n");
                manifest.push_str(metadata);
            }
            env.write_file("Cargo.toml", manifest.as_bytes());
        }

        for (name, content) in &self.files {
            env.write_file(name, content);
        }

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

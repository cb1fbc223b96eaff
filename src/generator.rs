//! Run orchestration
//!
//! Resolution, stacking and emission all finish before the destination is
//! touched. A failure in any of them leaves an existing generated file as it
//! was.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::canonical::{Canonicalize, CanonicalizerKind, SynCheck};
use crate::cli::Cli;
use crate::config::{Config, ConfigWarning};
use crate::emitter::{self, EmitOptions, DEFAULT_VAR_NAME};
use crate::error::{StackError, StackResult};
use crate::package::{PackageInfo, PackageProvider};
use crate::resolver::{self, ResolutionRequest};
use crate::stacker::{self, ContentTable};

/// Everything produced by one generation, before it is written
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub package_name: String,
    pub variable_name: String,
    pub destination_path: PathBuf,
    pub emitted_text: String,
    pub table: ContentTable,
}

/// One configured generation
pub struct Generator {
    pub request: ResolutionRequest,
    pub package: PackageInfo,
    pub variable_name: String,
    pub output: Option<PathBuf>,
    canonicalizer: Box<dyn Canonicalize>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("request", &self.request)
            .field("package", &self.package.name)
            .field("variable_name", &self.variable_name)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl Generator {
    pub fn new(request: ResolutionRequest, package: PackageInfo) -> Self {
        Self {
            request,
            package,
            variable_name: DEFAULT_VAR_NAME.to_string(),
            output: None,
            canonicalizer: Box::new(SynCheck),
        }
    }

    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = name.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_canonicalizer(mut self, canonicalizer: Box<dyn Canonicalize>) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    /// Explicit output, else `<base_dir>/<crate>_templated.rs`
    pub fn destination(&self) -> PathBuf {
        match &self.output {
            Some(out) => out.clone(),
            None => self
                .request
                .base_dir
                .join(format!("{}_templated.rs", self.package.name)),
        }
    }

    /// Resolve, stack and emit without touching the destination
    pub fn generate(&self) -> StackResult<GenerationOutput> {
        let files = resolver::resolve(&self.request)?;
        let table = stacker::stack(&files, &self.request.base_dir)?;

        let options = EmitOptions::new(self.package.name.clone())
            .with_variable_name(self.variable_name.clone());
        let emitted_text = emitter::emit(&options, &table, self.canonicalizer.as_ref())?;

        Ok(GenerationOutput {
            package_name: self.package.name.clone(),
            variable_name: self.variable_name.clone(),
            destination_path: self.destination(),
            emitted_text,
            table,
        })
    }

    /// Generate and replace the destination file
    pub fn run(&self) -> StackResult<GenerationOutput> {
        let output = self.generate()?;
        write(&output)?;
        Ok(output)
    }
}

/// Replace the destination with the emitted text
pub fn write(output: &GenerationOutput) -> StackResult<()> {
    crate::fs::write_atomic(&output.destination_path, output.emitted_text.as_bytes())?;
    tracing::info!(
        path = %output.destination_path.display(),
        entries = output.table.len(),
        "wrote generated table"
    );
    Ok(())
}

/// Decode the written destination and compare it with the stacked table
pub fn verify(output: &GenerationOutput) -> StackResult<()> {
    let path = &output.destination_path;
    let verify_err = |message: String| StackError::Verify {
        path: path.clone(),
        message,
    };

    let written = fs::read_to_string(path).map_err(|e| verify_err(e.to_string()))?;
    let decoded = emitter::decode(&written).map_err(|e| verify_err(e.to_string()))?;
    let expected: BTreeMap<&str, &[u8]> = output
        .table
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_slice()))
        .collect();

    for (key, content) in &expected {
        match decoded.get(*key) {
            None => return Err(verify_err(format!("entry `{}` is missing", key))),
            Some(found) if found.as_slice() != *content => {
                return Err(verify_err(format!("entry `{}` differs", key)))
            }
            Some(_) => {}
        }
    }
    if let Some(extra) = decoded.keys().find(|k| !expected.contains_key(k.as_str())) {
        return Err(verify_err(format!("unexpected entry `{}`", extra)));
    }

    tracing::info!(path = %path.display(), "verified generated table");
    Ok(())
}

/// Effective settings for a CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub variable_name: String,
    pub output: Option<PathBuf>,
    pub exclude_extension: Option<String>,
    pub canonicalizer: CanonicalizerKind,
}

impl Settings {
    /// CLI flags win over configuration, configuration over defaults.
    ///
    /// `--out` is relative to the working directory, a configured `out` to
    /// the manifest directory.
    pub fn merge(cli: &Cli, cwd: &Path, package: &PackageInfo, config: &Config) -> Self {
        let variable_name = cli
            .var
            .clone()
            .or_else(|| config.var.clone())
            .unwrap_or_else(|| DEFAULT_VAR_NAME.to_string());

        let output = match (&cli.out, &config.out) {
            (Some(out), _) => Some(cwd.join(out)),
            (None, Some(out)) => Some(package.dir.join(out)),
            (None, None) => None,
        };

        let canonicalizer = if cli.rustfmt {
            CanonicalizerKind::Rustfmt
        } else {
            config.canonicalizer.unwrap_or_default()
        };

        Self {
            variable_name,
            output,
            exclude_extension: config.exclude_extension.clone(),
            canonicalizer,
        }
    }
}

/// Build the generator for a parsed command line.
///
/// Returns configuration warnings alongside so the caller can report them.
pub fn prepare(
    cli: &Cli,
    cwd: &Path,
    provider: &dyn PackageProvider,
) -> StackResult<(Generator, Vec<ConfigWarning>)> {
    let mut request = cli.to_request(cwd);
    let package = provider.lookup(&request.base_dir)?;

    let (config, warnings) =
        Config::from_metadata(package.metadata.as_ref(), &package.manifest_path)?;
    let config = config.with_env_overrides()?;
    let settings = Settings::merge(cli, cwd, &package, &config);

    if let Some(ext) = &settings.exclude_extension {
        request = request.with_exclude_extension(ext.clone());
    }

    let mut generator = Generator::new(request, package)
        .with_variable_name(settings.variable_name)
        .with_canonicalizer(settings.canonicalizer.build());
    if let Some(out) = settings.output {
        generator = generator.with_output(out);
    }

    Ok((generator, warnings))
}

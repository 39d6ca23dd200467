//! Generation configuration.
//!
//! A [`GenerateConfig`] starts from project-relative defaults, is layered
//! with an optional `xschema.toml` and explicit overrides, and is finally
//! checked by [`GenerateConfig::validate`] before anything touches disk.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::discovery::{CompiledPatterns, PatternSet};
use crate::error::{Error, Result};

/// Default config file name looked up in the project directory
pub const CONFIG_FILE: &str = "xschema.toml";

/// Schema source directory, relative to the project directory
pub const DEFAULT_SOURCE_DIR: &str = "src/main/xschema";

/// Production output directory, relative to the build directory
pub const DEFAULT_OUTPUT_DIR: &str = "generated-sources/xschema";

/// Test output directory, relative to the build directory
pub const DEFAULT_TEST_OUTPUT_DIR: &str = "generated-test-sources/xschema";

/// What to do with files left in the output roots by earlier passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Leave existing files alone; outputs accrete across passes
    #[default]
    Accrete,
    /// Empty both output roots before the compiler runs
    Clean,
}

impl std::fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StalePolicy::Accrete => write!(f, "accrete"),
            StalePolicy::Clean => write!(f, "clean"),
        }
    }
}

/// Everything a generation pass needs to know, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub test_output_directory: PathBuf,
    pub patterns: PatternSet,
    /// Whether the built-in VCS/editor excludes apply
    pub default_excludes: bool,
    /// Namespaces to generate; empty means all
    pub namespaces: Vec<String>,
    pub stale_outputs: StalePolicy,
}

impl GenerateConfig {
    /// Defaults for a project rooted at `project_dir` building into `build_dir`.
    pub fn for_project(project_dir: impl AsRef<Path>, build_dir: impl AsRef<Path>) -> Self {
        let project_dir = project_dir.as_ref();
        let build_dir = build_dir.as_ref();
        Self {
            source_directory: project_dir.join(DEFAULT_SOURCE_DIR),
            output_directory: build_dir.join(DEFAULT_OUTPUT_DIR),
            test_output_directory: build_dir.join(DEFAULT_TEST_OUTPUT_DIR),
            patterns: PatternSet::default(),
            default_excludes: true,
            namespaces: Vec::new(),
            stale_outputs: StalePolicy::default(),
        }
    }

    /// Defaults for a Cargo build script: schemas under the package's
    /// `CARGO_MANIFEST_DIR`, outputs under `OUT_DIR`.
    pub fn for_build_script() -> Result<Self> {
        let manifest_dir = env_path("CARGO_MANIFEST_DIR")?;
        let out_dir = env_path("OUT_DIR")?;
        Ok(Self::for_project(manifest_dir, out_dir))
    }

    pub fn with_source_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_directory = path.into();
        self
    }

    pub fn with_output_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_directory = path.into();
        self
    }

    pub fn with_test_output_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.test_output_directory = path.into();
        self
    }

    pub fn with_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_excludes(mut self, enabled: bool) -> Self {
        self.default_excludes = enabled;
        self
    }

    pub fn with_stale_outputs(mut self, policy: StalePolicy) -> Self {
        self.stale_outputs = policy;
        self
    }

    /// Layer `overrides` on top of this config. Relative paths in the
    /// overrides are resolved against `base`.
    pub fn apply(mut self, overrides: ConfigOverrides, base: &Path) -> Self {
        if let Some(path) = overrides.source_directory {
            self.source_directory = base.join(path);
        }
        if let Some(path) = overrides.output_directory {
            self.output_directory = base.join(path);
        }
        if let Some(path) = overrides.test_output_directory {
            self.test_output_directory = base.join(path);
        }
        if let Some(includes) = overrides.includes {
            self.patterns.includes = includes;
        }
        if let Some(excludes) = overrides.excludes {
            self.patterns.excludes = excludes;
        }
        if let Some(namespaces) = overrides.namespaces {
            self.namespaces = namespaces;
        }
        if let Some(enabled) = overrides.default_excludes {
            self.default_excludes = enabled;
        }
        if let Some(policy) = overrides.stale_outputs {
            self.stale_outputs = policy;
        }
        self
    }

    /// Check the configuration and resolve every path to an absolute one.
    ///
    /// Nothing is created or written here; a failure means no traversal,
    /// generation or registration happens.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let source_root = SourceRoot::new(&self.source_directory)?;
        let output_root = absolutize(&self.output_directory)?;
        let test_output_root = absolutize(&self.test_output_directory)?;

        if output_root == test_output_root {
            return Err(Box::new(Error::OutputRootsCoincide { path: output_root }));
        }
        for output in [&output_root, &test_output_root] {
            if source_root.path().starts_with(output) {
                return Err(Box::new(Error::OutputContainsSource {
                    output: output.clone(),
                    source_dir: source_root.path().to_path_buf(),
                }));
            }
        }

        let patterns = self.patterns.compile(self.default_excludes)?;

        Ok(ValidatedConfig {
            source_root,
            output_root,
            test_output_root,
            patterns,
            namespaces: self.namespaces.clone(),
            stale_outputs: self.stale_outputs,
        })
    }
}

/// Optional settings from `xschema.toml` or the command line.
///
/// Unset fields leave the underlying [`GenerateConfig`] unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub source_directory: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub test_output_directory: Option<PathBuf>,
    pub includes: Option<Vec<String>>,
    pub excludes: Option<Vec<String>>,
    pub namespaces: Option<Vec<String>>,
    pub default_excludes: Option<bool>,
    pub stale_outputs: Option<StalePolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    generate: ConfigOverrides,
}

impl ConfigOverrides {
    /// Read the `[generate]` table of a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse the `[generate]` table from config file contents.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| Error::config_parse(e, content, filename))?;
        Ok(file.generate)
    }
}

/// A source directory that was verified to exist and be a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot(PathBuf);

impl SourceRoot {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = absolutize(path.as_ref())?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => Ok(Self(path)),
            Ok(_) => Err(Box::new(Error::SourceNotDirectory { path })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Box::new(Error::SourceMissing { path }))
            }
            Err(source) => Err(Box::new(Error::Io { path, source })),
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for SourceRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// A checked configuration with absolute roots and compiled patterns.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub source_root: SourceRoot,
    pub output_root: PathBuf,
    pub test_output_root: PathBuf,
    pub patterns: CompiledPatterns,
    pub namespaces: Vec<String>,
    pub stale_outputs: StalePolicy,
}

/// Make `path` absolute against the working directory and fold away `.`
/// and `..` segments without touching the filesystem.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source,
        })
    })?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

fn env_path(name: &'static str) -> Result<PathBuf> {
    std::env::var_os(name)
        .map(PathBuf::from)
        .ok_or_else(|| Box::new(Error::MissingEnv { name }))
}

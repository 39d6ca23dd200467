use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;
use xschema_build::{CONFIG_FILE, ConfigOverrides, GenerateConfig};

/// Options shared by every command that runs (part of) a pass.
#[derive(Args)]
pub struct ConfigArgs {
    /// Path to the config file (defaults to <project-dir>/xschema.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project directory the default source directory is resolved against
    #[arg(short = 'p', long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Build directory the default output directories live under, relative to the project
    #[arg(short = 'b', long, default_value = "target")]
    pub build_dir: PathBuf,

    /// Directory containing schema files
    #[arg(long)]
    pub source_directory: Option<PathBuf>,

    /// Root for generated production sources
    #[arg(long)]
    pub output_directory: Option<PathBuf>,

    /// Root for generated test sources
    #[arg(long)]
    pub test_output_directory: Option<PathBuf>,

    /// Include pattern, relative to the source directory (repeatable)
    #[arg(short, long = "include", value_name = "PATTERN")]
    pub includes: Vec<String>,

    /// Exclude pattern, relative to the source directory (repeatable)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Only generate this namespace (repeatable)
    #[arg(short, long = "namespace", value_name = "NAMESPACE")]
    pub namespaces: Vec<String>,

    /// Do not skip VCS metadata and editor backup files
    #[arg(long)]
    pub no_default_excludes: bool,
}

impl ConfigArgs {
    /// Build the pass configuration: project defaults, then the config
    /// file, then command-line flags.
    pub fn resolve(&self) -> xschema_build::Result<GenerateConfig> {
        let config =
            GenerateConfig::for_project(&self.project_dir, self.project_dir.join(&self.build_dir));

        let config = match self.config_file() {
            Some(path) => {
                let base = path.parent().unwrap_or(Path::new("."));
                let overrides = ConfigOverrides::from_file(&path)?;
                debug!(path = %path.display(), "loaded config file");
                config.apply(overrides, base)
            }
            None => config,
        };

        let config = config.apply(self.overrides(), Path::new("."));
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    fn config_file(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let default = self.project_dir.join(CONFIG_FILE);
                default.is_file().then_some(default)
            }
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_directory: self.source_directory.clone(),
            output_directory: self.output_directory.clone(),
            test_output_directory: self.test_output_directory.clone(),
            includes: non_empty(&self.includes),
            excludes: non_empty(&self.excludes),
            namespaces: non_empty(&self.namespaces),
            default_excludes: self.no_default_excludes.then_some(false),
            stale_outputs: None,
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

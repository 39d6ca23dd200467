use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for generation passes (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Which stage of a generation pass failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid configuration, reported before any traversal
    Configuration,
    /// Filesystem failure while walking the source root
    Discovery,
    /// The schema compiler, or output preparation, failed
    Generation,
    /// The host build rejected a source root
    Registration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration error"),
            ErrorKind::Discovery => write!(f, "discovery error"),
            ErrorKind::Generation => write!(f, "generation error"),
            ErrorKind::Registration => write!(f, "registration error"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("source directory '{path}' does not exist")]
    #[diagnostic(
        code(xschema::config::source_directory),
        help("point `source-directory` at the folder containing your schema files")
    )]
    SourceMissing { path: PathBuf },

    #[error("source directory '{path}' is not a directory")]
    #[diagnostic(
        code(xschema::config::source_directory),
        help("point `source-directory` at the folder containing your schema files")
    )]
    SourceNotDirectory { path: PathBuf },

    #[error("output directory and test output directory are both '{path}'")]
    #[diagnostic(
        code(xschema::config::output_roots),
        help("production and test sources need separate output directories")
    )]
    OutputRootsCoincide { path: PathBuf },

    #[error("output directory '{output}' contains the source directory '{source_dir}'")]
    #[diagnostic(
        code(xschema::config::output_roots),
        help("generated sources must not be written over the schema files")
    )]
    OutputContainsSource {
        output: PathBuf,
        source_dir: PathBuf,
    },

    #[error("invalid {kind} pattern '{pattern}'")]
    #[diagnostic(
        code(xschema::config::pattern),
        help("`**` must be a whole path segment, e.g. `**/*.json`")
    )]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("environment variable {name} is not set")]
    #[diagnostic(
        code(xschema::config::env),
        help("this helper is meant to be called from a Cargo build script")
    )]
    MissingEnv { name: &'static str },

    #[error("failed to access '{path}'")]
    #[diagnostic(code(xschema::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file")]
    #[diagnostic(code(xschema::config::parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to traverse '{path}'")]
    #[diagnostic(code(xschema::discovery))]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{compiler} failed: {message}")]
    #[diagnostic(
        code(xschema::generation),
        help("run `xschema check` for detailed schema diagnostics")
    )]
    Generation { compiler: String, message: String },

    #[error("failed to clean output directory '{path}'")]
    #[diagnostic(code(xschema::clean))]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to register source root '{path}': {message}")]
    #[diagnostic(code(xschema::registration))]
    Registration { path: PathBuf, message: String },
}

impl Error {
    /// Classify this error by the pass stage that produced it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceMissing { .. }
            | Error::SourceNotDirectory { .. }
            | Error::OutputRootsCoincide { .. }
            | Error::OutputContainsSource { .. }
            | Error::InvalidPattern { .. }
            | Error::MissingEnv { .. }
            | Error::Io { .. }
            | Error::ConfigParse { .. } => ErrorKind::Configuration,
            Error::Discovery { .. } => ErrorKind::Discovery,
            Error::Generation { .. } | Error::Clean { .. } => ErrorKind::Generation,
            Error::Registration { .. } => ErrorKind::Registration,
        }
    }

    /// Create a config parse error from a toml error with source context
    pub fn config_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Fold an eyre report into a single-line message, outermost cause first
    pub(crate) fn chain_message(report: &eyre::Report) -> String {
        report
            .chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }
}

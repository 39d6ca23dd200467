//! Schema file discovery.
//!
//! Patterns follow Ant conventions: paths are matched relative to the source
//! root with `/` separators, `*` stays within one segment and `**` spans any
//! number of segments.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::SourceRoot;
use crate::error::{Error, Result};

/// Include pattern used when none is configured
pub const DEFAULT_INCLUDE: &str = "**/*.json";

/// Editor backups and version control metadata, excluded unless disabled
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/CVS/**",
    "**/.cvsignore",
    "**/.svn/**",
    "**/.git/**",
    "**/.gitignore",
    "**/.gitattributes",
    "**/.hg/**",
    "**/.DS_Store",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Include and exclude patterns as written by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            includes: vec![DEFAULT_INCLUDE.to_string()],
            excludes: Vec::new(),
        }
    }
}

impl PatternSet {
    pub fn new<I, E, S>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    /// Compile every pattern, appending [`DEFAULT_EXCLUDES`] when enabled.
    pub fn compile(&self, default_excludes: bool) -> Result<CompiledPatterns> {
        let includes = self
            .includes
            .iter()
            .map(|p| compile_pattern("include", p))
            .collect::<Result<Vec<_>>>()?;

        let mut excludes = self
            .excludes
            .iter()
            .map(|p| compile_pattern("exclude", p))
            .collect::<Result<Vec<_>>>()?;
        if default_excludes {
            for pattern in DEFAULT_EXCLUDES {
                excludes.push(compile_pattern("exclude", pattern)?);
            }
        }

        Ok(CompiledPatterns { includes, excludes })
    }
}

/// Patterns ready for matching against root-relative paths.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl CompiledPatterns {
    /// A path is selected when any include matches and no exclude does.
    pub fn is_selected(&self, relative: &str) -> bool {
        let matches = |p: &Pattern| p.matches_with(relative, MATCH_OPTIONS);
        self.includes.iter().any(matches) && !self.excludes.iter().any(matches)
    }
}

fn compile_pattern(kind: &'static str, pattern: &str) -> Result<Pattern> {
    Pattern::new(&normalize_pattern(pattern)).map_err(|source| {
        Box::new(Error::InvalidPattern {
            kind,
            pattern: pattern.to_string(),
            source,
        })
    })
}

/// Apply Ant shorthands: `\` is a separator, a trailing `/` means
/// everything below, and patterns are always root-relative.
fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = pattern.trim().replace('\\', "/");
    if normalized.ends_with('/') {
        normalized.push_str("**");
    }
    normalized.trim_start_matches('/').to_string()
}

/// Find every regular file under `root` selected by `patterns`.
///
/// Symbolic links are neither followed nor returned. Results are absolute
/// and ordered by a depth-first walk with siblings sorted by name, so the
/// same tree always yields the same list.
pub fn discover(root: &SourceRoot, patterns: &CompiledPatterns) -> Result<Vec<PathBuf>> {
    let root_path = root.path();
    let mut files = Vec::new();

    let walker = WalkDir::new(root_path)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| {
            let path = source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root_path.to_path_buf());
            Box::new(Error::Discovery { path, source })
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_path(root_path, entry.path());
        if patterns.is_selected(&relative) {
            debug!(file = %relative, "selected schema file");
            files.push(entry.into_path());
        }
    }

    info!(
        count = files.len(),
        root = %root_path.display(),
        "discovered schema files"
    );
    Ok(files)
}

/// `path` relative to `root`, joined with `/` whatever the platform.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

//! Registration of output roots with the host build.
//!
//! The host build is abstracted as a [`BuildGraph`]. Two implementations
//! ship here: [`ProjectModel`], an in-memory record, and
//! [`CargoDirectives`], which speaks the Cargo build-script protocol.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

/// Environment variable carrying the production source root
pub const GENERATED_SOURCES_ENV: &str = "XSCHEMA_GENERATED_SOURCES";

/// Environment variable carrying the test source root
pub const GENERATED_TEST_SOURCES_ENV: &str = "XSCHEMA_GENERATED_TEST_SOURCES";

/// A build whose source roots can be extended.
pub trait BuildGraph {
    /// Add a root compiled into production artifacts.
    fn add_compile_source_root(&mut self, root: &Path) -> eyre::Result<()>;

    /// Add a root compiled only for tests.
    fn add_test_compile_source_root(&mut self, root: &Path) -> eyre::Result<()>;
}

/// Roots handed to the build graph by a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoots {
    pub compile: PathBuf,
    pub test_compile: PathBuf,
}

/// Register `output_root` for compilation and `test_output_root` for tests.
///
/// Production is registered first; a failure there stops the test root
/// from being registered.
pub fn register_roots(
    graph: &mut dyn BuildGraph,
    output_root: &Path,
    test_output_root: &Path,
) -> Result<RegisteredRoots> {
    graph
        .add_compile_source_root(output_root)
        .map_err(|report| registration_error(output_root, &report))?;
    info!(root = %output_root.display(), "registered compile source root");

    graph
        .add_test_compile_source_root(test_output_root)
        .map_err(|report| registration_error(test_output_root, &report))?;
    info!(root = %test_output_root.display(), "registered test compile source root");

    Ok(RegisteredRoots {
        compile: output_root.to_path_buf(),
        test_compile: test_output_root.to_path_buf(),
    })
}

fn registration_error(path: &Path, report: &eyre::Report) -> Box<Error> {
    Box::new(Error::Registration {
        path: path.to_path_buf(),
        message: Error::chain_message(report),
    })
}

/// In-memory source roots of a project.
///
/// Registration is additive and idempotent: roots keep insertion order and a
/// root registered twice appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectModel {
    compile_source_roots: Vec<PathBuf>,
    test_compile_source_roots: Vec<PathBuf>,
}

impl ProjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compile_source_roots(&self) -> &[PathBuf] {
        &self.compile_source_roots
    }

    pub fn test_compile_source_roots(&self) -> &[PathBuf] {
        &self.test_compile_source_roots
    }
}

impl BuildGraph for ProjectModel {
    fn add_compile_source_root(&mut self, root: &Path) -> eyre::Result<()> {
        push_unique(&mut self.compile_source_roots, root);
        Ok(())
    }

    fn add_test_compile_source_root(&mut self, root: &Path) -> eyre::Result<()> {
        push_unique(&mut self.test_compile_source_roots, root);
        Ok(())
    }
}

fn push_unique(roots: &mut Vec<PathBuf>, root: &Path) {
    if !roots.iter().any(|r| r == root) {
        roots.push(root.to_path_buf());
    }
}

/// Cargo build-script directives written to `W` (stdout in a real build).
///
/// Roots are exported as `rustc-env` variables so the consuming crate can
/// `include!` generated modules from `env!("XSCHEMA_GENERATED_SOURCES")`.
#[derive(Debug)]
pub struct CargoDirectives<W> {
    out: W,
}

impl CargoDirectives<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CargoDirectives<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Ask Cargo to rerun the build script when `path` changes.
    pub fn rerun_if_changed(&mut self, path: &Path) -> eyre::Result<()> {
        writeln!(self.out, "cargo:rerun-if-changed={}", path.display())?;
        Ok(())
    }

    fn rustc_env(&mut self, name: &str, root: &Path) -> eyre::Result<()> {
        writeln!(self.out, "cargo:rustc-env={}={}", name, root.display())?;
        Ok(())
    }
}

impl<W: Write> BuildGraph for CargoDirectives<W> {
    fn add_compile_source_root(&mut self, root: &Path) -> eyre::Result<()> {
        self.rustc_env(GENERATED_SOURCES_ENV, root)
    }

    fn add_test_compile_source_root(&mut self, root: &Path) -> eyre::Result<()> {
        self.rustc_env(GENERATED_TEST_SOURCES_ENV, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct Rejecting {
        accept_compile: bool,
        compile_calls: usize,
        test_calls: usize,
    }

    impl BuildGraph for Rejecting {
        fn add_compile_source_root(&mut self, _: &Path) -> eyre::Result<()> {
            self.compile_calls += 1;
            if self.accept_compile {
                Ok(())
            } else {
                Err(eyre::eyre!("read-only project"))
            }
        }

        fn add_test_compile_source_root(&mut self, _: &Path) -> eyre::Result<()> {
            self.test_calls += 1;
            Err(eyre::eyre!("no test sources allowed"))
        }
    }

    #[test]
    fn test_project_model_is_idempotent() {
        let mut model = ProjectModel::new();
        model.add_compile_source_root(Path::new("/src/main")).unwrap();
        model.add_compile_source_root(Path::new("/gen/main")).unwrap();
        model.add_compile_source_root(Path::new("/gen/main")).unwrap();

        assert_eq!(
            model.compile_source_roots(),
            &[PathBuf::from("/src/main"), PathBuf::from("/gen/main")]
        );
        assert!(model.test_compile_source_roots().is_empty());
    }

    #[test]
    fn test_register_roots() {
        let mut model = ProjectModel::new();
        let roots = register_roots(&mut model, Path::new("/gen/main"), Path::new("/gen/test"))
            .unwrap();

        assert_eq!(roots.compile, PathBuf::from("/gen/main"));
        assert_eq!(model.compile_source_roots(), &[PathBuf::from("/gen/main")]);
        assert_eq!(
            model.test_compile_source_roots(),
            &[PathBuf::from("/gen/test")]
        );
    }

    #[test]
    fn test_production_failure_skips_test_root() {
        let mut graph = Rejecting {
            accept_compile: false,
            compile_calls: 0,
            test_calls: 0,
        };

        let err = register_roots(&mut graph, Path::new("/m"), Path::new("/t")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Registration);
        assert_eq!(
            err.to_string(),
            "failed to register source root '/m': read-only project"
        );
        assert_eq!(graph.compile_calls, 1);
        assert_eq!(graph.test_calls, 0);
    }

    #[test]
    fn test_test_root_failure_names_test_root() {
        let mut graph = Rejecting {
            accept_compile: true,
            compile_calls: 0,
            test_calls: 0,
        };

        let err = register_roots(&mut graph, Path::new("/m"), Path::new("/t")).unwrap_err();
        match *err {
            Error::Registration { ref path, .. } => assert_eq!(path, Path::new("/t")),
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cargo_directives() {
        let mut directives = CargoDirectives::new(Vec::new());
        directives
            .rerun_if_changed(Path::new("/p/src/main/xschema"))
            .unwrap();
        register_roots(&mut directives, Path::new("/o/main"), Path::new("/o/test")).unwrap();

        let output = String::from_utf8(directives.into_inner()).unwrap();
        assert_eq!(
            output,
            "cargo:rerun-if-changed=/p/src/main/xschema\n\
             cargo:rustc-env=XSCHEMA_GENERATED_SOURCES=/o/main\n\
             cargo:rustc-env=XSCHEMA_GENERATED_TEST_SOURCES=/o/test\n"
        );
    }
}

//! The single call into the schema compiler.

use std::path::{Path, PathBuf};

use tracing::info;
use xschema_core::{CompileReport, SchemaCompiler};

use crate::config::absolutize;
use crate::error::{Error, Result};

/// Run `compiler` over `files`, writing production sources under
/// `output_root` and test sources under `test_output_root`.
///
/// An empty namespace list means every namespace. Compiler failures come
/// back as a generation error carrying the whole cause chain.
pub fn generate(
    compiler: &dyn SchemaCompiler,
    files: &[PathBuf],
    output_root: &Path,
    test_output_root: &Path,
    namespaces: &[String],
) -> Result<CompileReport> {
    if absolutize(output_root)? == absolutize(test_output_root)? {
        return Err(Box::new(Error::OutputRootsCoincide {
            path: output_root.to_path_buf(),
        }));
    }

    info!(
        compiler = compiler.name(),
        "Generating code from {:?}",
        files
    );

    compiler
        .generate_from_files(files, output_root, test_output_root, namespaces)
        .map_err(|report| {
            Box::new(Error::Generation {
                compiler: compiler.name().to_string(),
                message: Error::chain_message(&report),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::cell::RefCell;
    use xschema_core::PreviewFile;

    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(Vec<PathBuf>, PathBuf, PathBuf, Vec<String>)>>,
        fail: bool,
    }

    impl SchemaCompiler for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn generate_from_files(
            &self,
            files: &[PathBuf],
            output_dir: &Path,
            test_output_dir: &Path,
            namespaces: &[String],
        ) -> eyre::Result<CompileReport> {
            self.calls.borrow_mut().push((
                files.to_vec(),
                output_dir.to_path_buf(),
                test_output_dir.to_path_buf(),
                namespaces.to_vec(),
            ));
            if self.fail {
                return Err(eyre::eyre!("bad schema").wrap_err("failed to load a.json"));
            }
            Ok(CompileReport::default())
        }

        fn preview(&self, _: &[PathBuf], _: &[String]) -> eyre::Result<Vec<PreviewFile>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_passes_arguments_through() {
        let compiler = Recording::default();
        let files = vec![PathBuf::from("/s/a.json"), PathBuf::from("/s/b.json")];
        let namespaces = vec!["ns1".to_string()];

        generate(
            &compiler,
            &files,
            Path::new("/out/main"),
            Path::new("/out/test"),
            &namespaces,
        )
        .unwrap();

        let calls = compiler.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, files);
        assert_eq!(calls[0].1, PathBuf::from("/out/main"));
        assert_eq!(calls[0].2, PathBuf::from("/out/test"));
        assert_eq!(calls[0].3, namespaces);
    }

    #[test]
    fn test_empty_file_list_still_invokes_compiler() {
        let compiler = Recording::default();
        generate(&compiler, &[], Path::new("/o"), Path::new("/t"), &[]).unwrap();
        assert_eq!(compiler.calls.borrow().len(), 1);
    }

    #[test]
    fn test_failure_keeps_cause_chain() {
        let compiler = Recording {
            fail: true,
            ..Default::default()
        };

        let err = generate(&compiler, &[], Path::new("/o"), Path::new("/t"), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generation);
        assert_eq!(
            err.to_string(),
            "recording failed: failed to load a.json: bad schema"
        );
    }

    #[test]
    fn test_rejects_coinciding_roots() {
        let compiler = Recording::default();
        let err = generate(&compiler, &[], Path::new("/o"), Path::new("/o/./"), &[]).unwrap_err();

        assert!(matches!(*err, Error::OutputRootsCoincide { .. }));
        assert!(compiler.calls.borrow().is_empty());
    }
}

use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Header placed at the top of every generated source file
pub const GENERATED_HEADER: &str = "// @generated by xschema. Do not edit by hand.";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file body (without header)
    fn render(&self) -> String;

    /// Render the file exactly as it would be written to disk
    fn contents(&self) -> String {
        match self.rules().header {
            Some(header) => format!("{}\n\n{}", header, self.render()),
            None => self.render(),
        }
    }

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        write_file(&path, &self.contents())
    }
}

/// Write `content` to `path`, creating parent directories.
///
/// Identical content is left untouched so that build tools watching
/// modification times do not rebuild needlessly.
fn write_file(path: &Path, content: &str) -> Result<WriteResult> {
    if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(WriteResult::Unchanged);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(WriteResult::Written)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the rendered content
    Unchanged,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub header: Option<&'static str>,
}

impl FileRules {
    /// Rules for generated sources: always carry [`GENERATED_HEADER`].
    pub fn generated() -> Self {
        Self {
            header: Some(GENERATED_HEADER),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        let result = write_file(&path, "nested").unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_file_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        assert_eq!(write_file(&path, "same").unwrap(), WriteResult::Written);
        assert_eq!(write_file(&path, "same").unwrap(), WriteResult::Unchanged);
    }

    struct Stub {
        name: &'static str,
        body: &'static str,
        rules: FileRules,
    }

    impl GeneratedFile for Stub {
        fn path(&self, base: &Path) -> PathBuf {
            base.join(self.name)
        }

        fn rules(&self) -> FileRules {
            self.rules.clone()
        }

        fn render(&self) -> String {
            self.body.to_string()
        }
    }

    #[test]
    fn test_write_relative_to_base() {
        let temp = TempDir::new().unwrap();
        let file = Stub {
            name: "ns1/types.rs",
            body: "pub struct A;\n",
            rules: FileRules::default(),
        };

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("ns1/types.rs")).unwrap(),
            "pub struct A;\n"
        );
    }

    #[test]
    fn test_generated_rules_prepend_header() {
        let file = Stub {
            name: "a.rs",
            body: "pub struct A;\n",
            rules: FileRules::generated(),
        };

        let contents = file.contents();

        assert!(contents.starts_with(GENERATED_HEADER));
        assert!(contents.ends_with("\n\npub struct A;\n"));
    }
}

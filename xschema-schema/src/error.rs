use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a serde_json error.
    pub fn parse_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, labelling the first quoted occurrence of `needle`.
    pub fn validation_error(&self, message: impl Into<String>, needle: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: find_quoted_span(&self.src, needle),
            message: message.into(),
        })
    }

    /// Create a reserved keyword error.
    pub fn reserved_keyword_error(&self, name: &str, context: impl Into<String>) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span: find_quoted_span(&self.src, name),
            name: name.to_string(),
            context: context.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: &str,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span: find_quoted_span(&self.src, name),
            name: name.to_string(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate name error pointing at the second occurrence.
    pub fn duplicate_error(&self, name: &str, context: impl Into<String>) -> Box<Error> {
        let quoted = format!("\"{}\"", name);
        let mut occurrences = self.src.match_indices(&quoted).map(|(pos, _)| pos + 1);
        let first_span = occurrences.next().map(|pos| SourceSpan::from((pos, name.len())));
        let second_span = occurrences.next().map(|pos| SourceSpan::from((pos, name.len())));
        Box::new(Error::Duplicate {
            src: self.named_source(),
            first_span,
            second_span,
            name: name.to_string(),
            context: context.into(),
        })
    }
}

/// Convert a 1-based line/column pair into a byte offset.
///
/// serde_json reports line 0 when it has no position information.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset < src.len()).then_some(offset)
}

/// Find the span of `"needle"` in the JSON source, excluding the quotes.
fn find_quoted_span(src: &str, needle: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", needle);
    src.find(&quoted)
        .map(|pos| SourceSpan::from((pos + 1, needle.len())))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(xschema::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file")]
    #[diagnostic(code(xschema::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(xschema::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("duplicate {context} '{name}'")]
    #[diagnostic(
        code(xschema::duplicate),
        help("each {context} name may only be declared once")
    )]
    Duplicate {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("declared again here")]
        second_span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("'{name}' is a Rust reserved keyword")]
    #[diagnostic(
        code(xschema::reserved_keyword),
        help("rename the {context} '{name}' to something else")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(xschema::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"a\": 1\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 3), Some(4));
        assert_eq!(offset_of(src, 0, 0), None);
        assert_eq!(offset_of(src, 9, 1), None);
    }

    #[test]
    fn test_find_quoted_span() {
        let src = r#"{"name": "Person"}"#;
        let span = find_quoted_span(src, "Person").unwrap();
        assert_eq!(span.offset(), 10);
        assert_eq!(span.len(), 6);
        assert!(find_quoted_span(src, "Missing").is_none());
    }

    #[test]
    fn test_duplicate_error_labels_both_occurrences() {
        let ctx = SourceContext::new(r#"["A", "A"]"#, "dup.json");
        let err = ctx.duplicate_error("A", "definition");
        match *err {
            Error::Duplicate {
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(first_span.unwrap().offset(), 2);
                assert_eq!(second_span.unwrap().offset(), 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

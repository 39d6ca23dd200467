//! Identifier validation for schema names.

use crate::{Result, error::SourceContext};

/// Validation context that carries source information and the current path
/// through the schema (e.g., `["Person", "fields"]`).
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context over the given source.
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: self.source,
            path,
        }
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'Person'" or just "definition" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path.join("."))
        }
    }

    /// Validate a name that becomes a Rust type or module name.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_rust_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind)));
        }
        self.validate_format(name, kind)
    }

    /// Validate a field name.
    ///
    /// Keywords are accepted here because generated code escapes them as raw
    /// identifiers, except for the few that cannot be raw identifiers.
    pub fn validate_field_name(&self, name: &str, kind: &str) -> Result<()> {
        if NON_RAW_KEYWORDS.contains(&name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind)));
        }
        self.validate_format(name, kind)
    }

    fn validate_format(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self
                .source
                .invalid_identifier_error(name, self.context_for(kind), reason));
        }
        Ok(())
    }
}

/// Rust reserved keywords that cannot be used as identifiers
/// Source: https://doc.rust-lang.org/reference/keywords.html
#[rustfmt::skip]
pub const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers (`r#self` is invalid).
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Validate that a name is a usable identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if name == "_" {
        return Some("name cannot be a lone underscore");
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

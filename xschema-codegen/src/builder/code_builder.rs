//! Code builder utility for generating properly indented code.

/// One indentation level, matching rustfmt.
const INDENT: &str = "    ";

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use xschema_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::rust()
///     .block_with_close("pub struct Point {", "}", |b| {
///         b.line("pub x: i32,").line("pub y: i32,")
///     })
///     .build();
///
/// assert_eq!(code, "pub struct Point {\n    pub x: i32,\n    pub y: i32,\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    /// Create an empty builder with 4-space indentation.
    pub fn rust() -> Self {
        Self {
            indent_level: 0,
            buffer: String::new(),
        }
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a Rust doc comment, one `///` line per line of text.
    pub fn rust_doc(self, text: &str) -> Self {
        text.lines().fold(self, |b, line| {
            if line.trim().is_empty() {
                b.line("///")
            } else {
                b.line(&format!("/// {}", line.trim_end()))
            }
        })
    }

    /// Apply `f` to each item, threading the builder through.
    pub fn each<T, F>(self, items: impl IntoIterator<Item = T>, f: F) -> Self
    where
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    /// Build the final code string.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        self.buffer.push_str(&INDENT.repeat(self.indent_level));
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}

/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template AST types.
//!
//! This module defines the tree produced by the parser. Each node carries the
//! byte span it was parsed from so diagnostics can point back into the source.

/// A byte range in the template source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The 1-based line and column of the span start within `source`.
    ///
    /// Columns count characters, not bytes.
    pub fn location(&self, source: &str) -> (usize, usize) {
        let prefix = &source[..self.start.min(source.len())];
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count() + 1;
        (line, column)
    }

    /// The source text covered by this span.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Literal text to be output as-is.
    Literal(Literal),

    /// Variable interpolation: `{{path}}` or `{{{path}}}`
    Variable(Variable),

    /// Section: `{{#path}}...{{/path}}` or `{{^path}}...{{/path}}`
    Section(Section),
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The literal text content.
    pub text: String,
    /// Source location of this literal.
    pub span: Span,
}

/// Variable interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The path to resolve (e.g. `job.title`, `../company`, `@index`).
    pub path: String,
    /// Whether the rendered value is HTML-escaped (`{{x}}`) or raw (`{{{x}}}`).
    pub escaped: bool,
    /// Source location of the whole tag.
    pub span: Span,
}

impl Variable {
    /// Create an escaped variable reference.
    pub fn escaped(path: impl Into<String>, span: Span) -> Self {
        Self {
            path: path.into(),
            escaped: true,
            span,
        }
    }

    /// Create a raw (unescaped) variable reference.
    pub fn raw(path: impl Into<String>, span: Span) -> Self {
        Self {
            path: path.into(),
            escaped: false,
            span,
        }
    }
}

/// Section block.
///
/// A positive section iterates sequences and re-scopes its body to the
/// resolved value; an inverted section renders its body in the current scope
/// when the value is falsy.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// The path named by both the opening and closing tag.
    pub path: String,
    /// `true` for `{{^path}}`, `false` for `{{#path}}`.
    pub inverted: bool,
    /// Section body.
    pub body: Vec<TemplateNode>,
    /// Source location from the opening tag through the closing tag.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_location_first_line() {
        let source = "Hello {{name}}";
        let span = Span::new(6, 14);
        assert_eq!(span.location(source), (1, 7));
        assert_eq!(span.text(source), "{{name}}");
    }

    #[test]
    fn test_span_location_counts_lines_and_chars() {
        let source = "line one\nTuyển {{x}}";
        let start = source.find("{{").unwrap();
        let span = Span::new(start, start + 5);
        // "Tuyển " is six characters but more bytes
        assert_eq!(span.location(source), (2, 7));
    }

    #[test]
    fn test_variable_constructors() {
        let span = Span::new(0, 8);
        let escaped = Variable::escaped("name", span);
        assert!(escaped.escaped);
        assert_eq!(escaped.path, "name");

        let raw = Variable::raw("name", span);
        assert!(!raw.escaped);
        assert_eq!(raw.span, span);
    }
}

/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template parser.
//!
//! A hand-written scanner turns the template source into the AST in a single
//! recursive pass. Sections are matched by name: an opening `{{#x}}` pairs
//! with the first `{{/x}}` that follows it, and the text between the two is
//! parsed on its own as the section body. Anything that does not form a
//! valid tag stays in the output as literal text.

use std::path::Path;

use crate::ast::{Literal, Section, Span, TemplateNode, Variable};
use crate::error::TemplateResult;
use crate::eval_context::{Diagnostic, DiagnosticCode, DiagnosticCollector};

/// Sections nested deeper than this are not expanded.
pub const MAX_SECTION_DEPTH: usize = 128;

/// A compiled template ready for evaluation.
#[derive(Debug, Clone)]
pub struct Template {
    /// The parsed template AST.
    pub(crate) nodes: Vec<TemplateNode>,

    /// Template source (for locating diagnostics).
    pub(crate) source: String,

    /// Warnings raised while parsing.
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Template {
    /// Compile a template from source text.
    ///
    /// Compilation always succeeds. Malformed tags are kept as literal text
    /// and reported through [`Template::diagnostics`].
    pub fn compile(source: &str) -> Self {
        let mut parser = Parser {
            source,
            diagnostics: DiagnosticCollector::new(),
        };
        let nodes = parser.parse(0, source.len(), 0);
        let diagnostics = parser.diagnostics.into_diagnostics();

        tracing::debug!(
            nodes = nodes.len(),
            warnings = diagnostics.len(),
            "Compiled template"
        );

        Template {
            nodes,
            source: source.to_string(),
            diagnostics,
        }
    }

    /// Compile a template from a file.
    pub fn compile_from_file(path: &Path) -> TemplateResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::compile(&source))
    }

    /// Get the AST nodes of this template.
    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }

    /// Get the template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Warnings raised while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// A recognized tag.
#[derive(Debug, PartialEq)]
enum Tag<'s> {
    /// `{{{path}}}`
    Raw(&'s str),
    /// `{{path}}`
    Variable(&'s str),
    /// `{{#name}}` or `{{^name}}`
    Open { name: &'s str, inverted: bool },
    /// `{{/name}}`
    Close(&'s str),
}

/// Result of scanning at a `{{`.
#[derive(Debug, PartialEq)]
enum Scan<'s> {
    Tag(Tag<'s>, Span),
    /// Not a tag; the first `{` is literal text.
    NotATag,
    /// No `}}` follows.
    Unterminated,
}

/// What to do with the text consumed by a tag.
enum Step {
    /// Emit a node and resume after it.
    Emit(TemplateNode, usize),
    /// Drop the consumed text and resume after it.
    Skip(usize),
    /// Keep the consumed text as part of the surrounding literal.
    Keep(usize),
}

struct Parser<'s> {
    source: &'s str,
    diagnostics: DiagnosticCollector,
}

impl<'s> Parser<'s> {
    /// Parse `source[start..end]` into nodes.
    fn parse(&mut self, start: usize, end: usize, depth: usize) -> Vec<TemplateNode> {
        let source = self.source;
        let mut nodes = Vec::new();
        let mut literal_start = start;
        let mut pos = start;

        while let Some(offset) = source[pos..end].find("{{") {
            let open = pos + offset;

            let step = match scan_tag(source, open, end) {
                Scan::NotATag => Step::Keep(open + 1),
                Scan::Unterminated => {
                    self.warn(
                        DiagnosticCode::UnterminatedTag,
                        "'{{' is never closed with '}}'",
                        Span::new(open, end),
                    );
                    break;
                }
                Scan::Tag(Tag::Raw(path), span) => {
                    Step::Emit(TemplateNode::Variable(Variable::raw(path, span)), span.end)
                }
                Scan::Tag(Tag::Variable(path), span) => Step::Emit(
                    TemplateNode::Variable(Variable::escaped(path, span)),
                    span.end,
                ),
                Scan::Tag(Tag::Close(name), span) => {
                    self.warn(
                        DiagnosticCode::StrayCloseTag,
                        format!("'{{{{/{}}}}}' does not close any section", name),
                        span,
                    );
                    Step::Keep(span.end)
                }
                Scan::Tag(Tag::Open { name, inverted }, span) => {
                    self.section(name, inverted, span, end, depth)
                }
            };

            match step {
                Step::Emit(node, resume) => {
                    push_literal(&mut nodes, source, literal_start, open);
                    nodes.push(node);
                    literal_start = resume;
                    pos = resume;
                }
                Step::Skip(resume) => {
                    push_literal(&mut nodes, source, literal_start, open);
                    literal_start = resume;
                    pos = resume;
                }
                Step::Keep(resume) => pos = resume,
            }
        }

        push_literal(&mut nodes, source, literal_start, end);
        nodes
    }

    /// Handle an opening tag whose tag text spans `open`.
    fn section(
        &mut self,
        name: &'s str,
        inverted: bool,
        open: Span,
        end: usize,
        depth: usize,
    ) -> Step {
        let Some(close) = find_close(self.source, name, open.end, end) else {
            let sigil = if inverted { '^' } else { '#' };
            self.warn(
                DiagnosticCode::UnclosedSection,
                format!("'{{{{{}{}}}}}' has no matching '{{{{/{}}}}}'", sigil, name, name),
                open,
            );
            return Step::Keep(open.end);
        };

        let span = Span::new(open.start, close.end);
        if depth >= MAX_SECTION_DEPTH {
            self.warn(
                DiagnosticCode::NestingLimit,
                format!(
                    "section '{}' is nested deeper than {} levels and was not rendered",
                    name, MAX_SECTION_DEPTH
                ),
                span,
            );
            return Step::Skip(close.end);
        }

        let body = self.parse(open.end, close.start, depth + 1);
        Step::Emit(
            TemplateNode::Section(Section {
                path: name.to_string(),
                inverted,
                body,
                span,
            }),
            close.end,
        )
    }

    fn warn(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        self.diagnostics.warn_at(code, message, span, self.source);
    }
}

fn push_literal(nodes: &mut Vec<TemplateNode>, source: &str, start: usize, end: usize) {
    if start < end {
        nodes.push(TemplateNode::Literal(Literal {
            text: source[start..end].to_string(),
            span: Span::new(start, end),
        }));
    }
}

/// Scan the tag starting at `open`, which must point at `{{`.
fn scan_tag(source: &str, open: usize, end: usize) -> Scan<'_> {
    let rest = &source[open..end];

    if rest.starts_with("{{{") {
        if let Some(close) = rest[3..].find("}}}") {
            let content = &rest[3..3 + close];
            if is_tag_content(content) {
                let span = Span::new(open, open + close + 6);
                return Scan::Tag(Tag::Raw(content.trim()), span);
            }
        }
        return Scan::NotATag;
    }

    let Some(close) = rest[2..].find("}}") else {
        return Scan::Unterminated;
    };
    let content = &rest[2..2 + close];
    if !is_tag_content(content) {
        return Scan::NotATag;
    }

    let span = Span::new(open, open + close + 4);
    let trimmed = content.trim();
    let tag = if let Some(name) = trimmed.strip_prefix('#') {
        Tag::Open {
            name: name.trim(),
            inverted: false,
        }
    } else if let Some(name) = trimmed.strip_prefix('^') {
        Tag::Open {
            name: name.trim(),
            inverted: true,
        }
    } else if let Some(name) = trimmed.strip_prefix('/') {
        Tag::Close(name.trim())
    } else {
        Tag::Variable(trimmed)
    };

    match tag {
        Tag::Open { name: "", .. } | Tag::Close("") => Scan::NotATag,
        tag => Scan::Tag(tag, span),
    }
}

/// Tag content must be non-blank and may not contain braces.
fn is_tag_content(content: &str) -> bool {
    !content.trim().is_empty() && !content.contains(['{', '}'])
}

/// Find the first `{{/name}}` in `source[from..end]`.
fn find_close(source: &str, name: &str, from: usize, end: usize) -> Option<Span> {
    let mut pos = from;
    while let Some(offset) = source[pos..end].find("{{") {
        let open = pos + offset;
        if let Scan::Tag(Tag::Close(close_name), span) = scan_tag(source, open, end) {
            if close_name == name {
                return Some(span);
            }
        }
        pos = open + 1;
    }
    None
}

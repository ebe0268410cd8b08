/*
 * eval_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostics and evaluation state.
//!
//! Nothing in this crate is fatal: malformed tags become literal text and
//! unresolved references render empty. Those situations are still worth
//! surfacing to template authors, so the parser and the evaluator record them
//! as warnings in a [`DiagnosticCollector`] instead of failing.

use std::fmt;

use crate::ast::Span;

/// The kind of situation a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// `{{` without a closing `}}`.
    UnterminatedTag,
    /// `{{#x}}` or `{{^x}}` with no matching `{{/x}}`.
    UnclosedSection,
    /// `{{/x}}` that does not close any section.
    StrayCloseTag,
    /// Sections nested deeper than the supported limit.
    NestingLimit,
    /// A variable path that resolved nowhere in the scope chain.
    UnresolvedReference,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnterminatedTag => "unterminated-tag",
            DiagnosticCode::UnclosedSection => "unclosed-section",
            DiagnosticCode::StrayCloseTag => "stray-close-tag",
            DiagnosticCode::NestingLimit => "nesting-limit",
            DiagnosticCode::UnresolvedReference => "unresolved-reference",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warning about a template, with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: usize,
    /// 1-based column of `span.start`.
    pub column: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: warning[{}]: {}",
            self.line, self.column, self.code, self.message
        )
    }
}

/// Collector for diagnostic messages during parsing and evaluation.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty diagnostic collector.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Add a warning located at `span` within `source`.
    pub fn warn_at(
        &mut self,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
        source: &str,
    ) {
        let (line, column) = span.location(source);
        self.diagnostics.push(Diagnostic {
            code,
            message: message.into(),
            span,
            line,
            column,
        });
    }

    /// Get a reference to the collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector and return the diagnostics, sorted by source location.
    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| d.span.start);
        self.diagnostics
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// State threaded through evaluation.
pub struct EvalContext<'t> {
    /// The template source, for locating diagnostics.
    pub source: &'t str,

    /// Diagnostic collector for warnings raised while rendering.
    pub diagnostics: DiagnosticCollector,

    /// Whether unresolved variable references are recorded.
    pub report_unresolved: bool,
}

impl<'t> EvalContext<'t> {
    /// Create an evaluation context that records nothing.
    pub fn new(source: &'t str) -> Self {
        Self {
            source,
            diagnostics: DiagnosticCollector::new(),
            report_unresolved: false,
        }
    }

    /// Enable or disable reporting of unresolved references.
    pub fn with_report_unresolved(mut self, report: bool) -> Self {
        self.report_unresolved = report;
        self
    }

    /// Record a variable path that did not resolve.
    pub fn unresolved(&mut self, path: &str, span: Span) {
        if self.report_unresolved {
            self.diagnostics.warn_at(
                DiagnosticCode::UnresolvedReference,
                format!("'{}' is not defined in any enclosing scope", path),
                span,
                self.source,
            );
        }
    }

    /// Consume the context and return collected diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_diagnostics()
    }
}

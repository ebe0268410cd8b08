/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template evaluation engine.
//!
//! This module implements the evaluation of parsed templates against a value.
//! Rendering writes straight into a single output buffer; section output and
//! interpolated values are never scanned for tags again.

use crate::ast::{Section, TemplateNode, Variable};
use crate::context::{Scope, TemplateValue};
use crate::escape::escape_html;
use crate::eval_context::{Diagnostic, EvalContext};
use crate::parser::Template;

/// Output of [`Template::render_with_diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered markup.
    pub output: String,
    /// Parse warnings followed by evaluation warnings, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Template {
    /// Render this template against `data`.
    ///
    /// Rendering never fails: unresolved references produce empty output.
    pub fn render(&self, data: &TemplateValue) -> String {
        let mut ctx = EvalContext::new(&self.source);
        evaluate(&self.nodes, &Scope::root(data), &mut ctx)
    }

    /// Render this template and report every variable that did not resolve.
    ///
    /// The output is identical to [`Template::render`].
    pub fn render_with_diagnostics(&self, data: &TemplateValue) -> Rendered {
        let mut ctx = EvalContext::new(&self.source).with_report_unresolved(true);
        let output = evaluate(&self.nodes, &Scope::root(data), &mut ctx);

        let mut diagnostics = self.diagnostics.clone();
        diagnostics.extend(ctx.into_diagnostics());
        diagnostics.sort_by_key(|d| d.span.start);

        for diagnostic in &diagnostics {
            tracing::debug!(%diagnostic, "Template diagnostic");
        }

        Rendered {
            output,
            diagnostics,
        }
    }
}

/// Compile and render `template` against `data` in one step.
pub fn render(template: &str, data: &TemplateValue) -> String {
    if !template.contains("{{") {
        return template.to_string();
    }
    Template::compile(template).render(data)
}

/// Evaluate a list of template nodes in `scope`.
pub fn evaluate(nodes: &[TemplateNode], scope: &Scope<'_>, ctx: &mut EvalContext<'_>) -> String {
    let mut out = String::new();
    evaluate_into(nodes, scope, ctx, &mut out);
    out
}

fn evaluate_into(
    nodes: &[TemplateNode],
    scope: &Scope<'_>,
    ctx: &mut EvalContext<'_>,
    out: &mut String,
) {
    for node in nodes {
        match node {
            TemplateNode::Literal(lit) => out.push_str(&lit.text),
            TemplateNode::Variable(var) => render_variable(var, scope, ctx, out),
            TemplateNode::Section(section) => evaluate_section(section, scope, ctx, out),
        }
    }
}

/// Render a variable reference.
fn render_variable(var: &Variable, scope: &Scope<'_>, ctx: &mut EvalContext<'_>, out: &mut String) {
    let Some(value) = scope.resolve(&var.path) else {
        ctx.unresolved(&var.path, var.span);
        return;
    };

    let text = value.render();
    if var.escaped {
        out.push_str(&escape_html(&text));
    } else {
        out.push_str(&text);
    }
}

/// Evaluate a positive or inverted section.
fn evaluate_section(
    section: &Section,
    scope: &Scope<'_>,
    ctx: &mut EvalContext<'_>,
    out: &mut String,
) {
    let value = scope.resolve(&section.path);
    let value = value.as_deref();

    if section.inverted {
        // Same scope, no new binding
        if !value.is_some_and(TemplateValue::is_truthy) {
            evaluate_into(&section.body, scope, ctx, out);
        }
        return;
    }

    match value {
        Some(TemplateValue::List(items)) => {
            for (index, item) in items.iter().enumerate() {
                let child = scope.item(item, index);
                evaluate_into(&section.body, &child, ctx, out);
            }
        }
        // Maps and truthy scalars render once, scoped to the value itself
        Some(value) if value.is_truthy() => {
            let child = scope.child(value);
            evaluate_into(&section.body, &child, ctx, out);
        }
        _ => {}
    }
}

/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Mustache-style template renderer for job posting previews.
//!
//! Layouts ship a template string; the preview renders it against a data
//! context built from the selected jobs. The supported tags are:
//!
//! - Escaped interpolation: `{{job.title}}` (HTML-escaped)
//! - Raw interpolation: `{{{body}}}`
//! - Sections: `{{#jobs}}...{{/jobs}}` iterate lists, re-scope to maps and
//!   render once for other truthy values
//! - Inverted sections: `{{^benefits}}...{{/benefits}}` render when falsy
//! - Special paths: `this` / `.`, `@index`, `../` for the enclosing scope
//!
//! Lookups that fail in an inner scope fall back to the enclosing scopes, so
//! a section body can read outer fields without `../` as long as the name is
//! not shadowed locally.
//!
//! # Example
//!
//! ```
//! use jobpost_template::{Template, TemplateValue};
//!
//! let data = TemplateValue::from_json_str(r#"{"jobs": [{"title": "Dev"}, {"title": "QA"}]}"#)?;
//! let template = Template::compile("{{#jobs}}<li>{{title}}</li>{{/jobs}}");
//! assert_eq!(template.render(&data), "<li>Dev</li><li>QA</li>");
//! # Ok::<(), jobpost_template::TemplateError>(())
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod escape;
pub mod eval_context;
pub mod evaluator;
pub mod parser;

// Re-export main types at crate root
pub use ast::{Literal, Section, Span, TemplateNode, Variable};
pub use context::{Scope, TemplateValue};
pub use error::{TemplateError, TemplateResult};
pub use escape::escape_html;
pub use eval_context::{Diagnostic, DiagnosticCode, DiagnosticCollector, EvalContext};
pub use evaluator::{Rendered, render};
pub use parser::{MAX_SECTION_DEPTH, Template};

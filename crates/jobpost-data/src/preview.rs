/*
 * preview.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Preview assembly: pick the layout, build the context, render.

use jobpost_template::{Diagnostic, Rendered, Template, escape_html};

use crate::catalog::Catalog;
use crate::records::{Job, Layout};
use crate::selection::Selection;
use crate::template_context::build_context;

/// Template used by layouts that carry no template of their own.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/default.html");

pub const EMPTY_TITLE: &str = "Chưa có dữ liệu để hiển thị";
pub const EMPTY_DESCRIPTION: &str =
    "Hãy chọn ít nhất một công việc và một layout để xem trước nội dung bài đăng.";

/// The outcome of rendering the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// No layout or no job is selected; there is nothing to export.
    Empty,
    Ready { layout_id: String, html: String },
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        matches!(self, Preview::Empty)
    }

    /// The markup to show: the rendered fragment or the empty-state notice.
    pub fn html(&self) -> String {
        match self {
            Preview::Empty => empty_state_html(),
            Preview::Ready { html, .. } => html.clone(),
        }
    }
}

/// Render the selection against its effective layout.
pub fn render_preview(catalog: &Catalog, selection: &Selection) -> Preview {
    match resolve(catalog, selection) {
        Some((layout, jobs)) => {
            let template = layout_template(layout);
            for diagnostic in template.diagnostics() {
                tracing::warn!(layout = %layout.id, "{}", diagnostic);
            }
            ready(layout, template.render(&build_context(layout, &jobs)))
        }
        None => Preview::Empty,
    }
}

/// Render the selection with `template` instead of the layout's own.
///
/// Returns the preview together with all parse and render diagnostics.
pub fn render_preview_with(
    catalog: &Catalog,
    selection: &Selection,
    template: &Template,
) -> (Preview, Vec<Diagnostic>) {
    match resolve(catalog, selection) {
        Some((layout, jobs)) => {
            let Rendered {
                output,
                diagnostics,
            } = template.render_with_diagnostics(&build_context(layout, &jobs));
            (ready(layout, output), diagnostics)
        }
        None => (Preview::Empty, Vec::new()),
    }
}

/// Compile the layout's template, falling back to the built-in one.
pub fn layout_template(layout: &Layout) -> Template {
    Template::compile(layout.template.as_deref().unwrap_or(DEFAULT_TEMPLATE))
}

/// Markup shown when nothing can be rendered.
pub fn empty_state_html() -> String {
    format!(
        "<div class=\"preview\"><div class=\"preview__empty\"><h3>{}</h3><p>{}</p></div></div>",
        EMPTY_TITLE, EMPTY_DESCRIPTION
    )
}

fn resolve<'c>(catalog: &'c Catalog, selection: &Selection) -> Option<(&'c Layout, Vec<&'c Job>)> {
    let layout = selection.effective_layout(catalog)?;
    let jobs = selection.selected_jobs(catalog);
    if jobs.is_empty() {
        tracing::debug!("No jobs selected");
        return None;
    }
    Some((layout, jobs))
}

fn ready(layout: &Layout, body: String) -> Preview {
    let html = format!(
        "<div class=\"preview preview-layout--{}\">\n{}</div>\n",
        escape_html(&layout.id),
        body
    );
    Preview::Ready {
        layout_id: layout.id.clone(),
        html,
    }
}

/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Loads the catalog, selects the requested jobs and layout, renders the
//! preview fragment and writes it to stdout, a file, or a dated file inside
//! an output directory. PNG capture of the fragment is left to the caller.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use jobpost_data::preview::{empty_state_html, layout_template};
use jobpost_data::{Catalog, Preview, Selection, export_file_name, render_preview_with};
use jobpost_template::Template;

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    /// Data directory
    pub data: PathBuf,
    /// Job ids to include
    pub jobs: Vec<String>,
    /// Layout id; the first layout when absent
    pub layout: Option<String>,
    /// Template file overriding the layout's template
    pub template: Option<PathBuf>,
    /// Output file path
    pub output: Option<PathBuf>,
    /// Output directory
    pub output_dir: Option<PathBuf>,
    /// Fail on template warnings
    pub check: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let catalog = Catalog::load(&args.data)
        .with_context(|| format!("Failed to load catalog from {}", args.data.display()))?;

    let mut selection = Selection::new();
    for id in &args.jobs {
        selection.select_job(&catalog, id)?;
    }
    if let Some(layout) = &args.layout {
        selection.select_layout(&catalog, layout)?;
    }

    let template = match (&args.template, selection.effective_layout(&catalog)) {
        (Some(path), _) => Template::compile_from_file(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?,
        (None, Some(layout)) => layout_template(layout),
        (None, None) => {
            eprintln!("{}", empty_state_html());
            anyhow::bail!("No layouts available in {}", args.data.display());
        }
    };

    let (preview, diagnostics) = render_preview_with(&catalog, &selection, &template);
    let Preview::Ready { layout_id, html } = preview else {
        eprintln!("{}", empty_state_html());
        anyhow::bail!("Nothing to render");
    };
    debug!(layout = %layout_id, bytes = html.len(), "Rendered preview");

    for diagnostic in &diagnostics {
        if args.check {
            warn!("{}", diagnostic);
        } else {
            debug!("{}", diagnostic);
        }
    }

    let destination = match (&args.output, &args.output_dir) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(dir)) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            let company = selection
                .selected_jobs(&catalog)
                .first()
                .and_then(|job| job.company.as_deref());
            // UTC, matching the ISO date stamp of browser exports
            let today = chrono::Utc::now().date_naive();
            Some(dir.join(export_file_name(company, Some(&layout_id), today, "html")))
        }
        (None, None) => None,
    };

    match destination {
        Some(path) => {
            fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "Wrote preview");
        }
        None => {
            std::io::stdout()
                .write_all(html.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    if args.check && !diagnostics.is_empty() {
        anyhow::bail!("Template produced {} warning(s)", diagnostics.len());
    }

    Ok(())
}

/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Job posting data: records, catalog loading, selection and preview.
//!
//! A [`Catalog`] is loaded from a data directory, a [`Selection`] picks jobs
//! and a layout from it, and [`render_preview`] turns the two into an HTML
//! fragment via [`build_context`] and the layout's template.

pub mod catalog;
pub mod error;
pub mod export;
pub mod preview;
pub mod records;
pub mod selection;
pub mod template_context;

pub use catalog::Catalog;
pub use error::{DataError, DataResult};
pub use export::{export_file_name, slugify};
pub use preview::{DEFAULT_TEMPLATE, Preview, render_preview, render_preview_with};
pub use records::{ApplyInfo, FooterLabels, Job, JobIndexEntry, Layout};
pub use selection::Selection;
pub use template_context::build_context;

/*
 * export.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! File naming for exported previews.

use chrono::NaiveDate;
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_COMPANY_SLUG: &str = "tuyendung";
pub const DEFAULT_LAYOUT_ID: &str = "layout";

/// Turn free text into a file-name-safe slug.
///
/// The text is lowercased and NFD-decomposed so accented letters lose their
/// combining marks. Anything that is not an ASCII word character, whitespace
/// or `-` is then dropped, and whitespace runs become a single `-`. Letters
/// with no decomposition (such as `đ`) are dropped rather than transliterated.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// `<company-slug>-<layout>-<YYYY-MM-DD>.<extension>`
pub fn export_file_name(
    company: Option<&str>,
    layout_id: Option<&str>,
    date: NaiveDate,
    extension: &str,
) -> String {
    format!(
        "{}-{}-{}.{}",
        slugify(company.unwrap_or(DEFAULT_COMPANY_SLUG)),
        layout_id.unwrap_or(DEFAULT_LAYOUT_ID),
        date.format("%Y-%m-%d"),
        extension
    )
}

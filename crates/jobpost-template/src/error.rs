/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template loading.
//!
//! Compiling and rendering never fail: malformed tags degrade to literal
//! text and unresolved references render as empty strings. Only reading a
//! template from disk or decoding JSON input can produce an error.

use thiserror::Error;

/// Errors that can occur while loading templates or template data.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// I/O error (e.g., reading a template file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Template data was not valid JSON.
    #[error("Invalid template data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

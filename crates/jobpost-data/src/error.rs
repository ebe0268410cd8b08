/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for loading and selecting catalog data.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Unknown job: {0}")]
    UnknownJob(String),
}

pub type DataResult<T> = std::result::Result<T, DataError>;

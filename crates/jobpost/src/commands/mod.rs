/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Command implementations for the jobpost CLI
//!
//! Each command module handles the CLI interface and delegates to
//! jobpost-data for the actual work.

pub mod list;
pub mod render;

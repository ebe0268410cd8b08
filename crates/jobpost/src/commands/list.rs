/*
 * list.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `jobpost list`: print the catalog of a data directory.

use std::path::Path;

use anyhow::{Context, Result};

use jobpost_data::Catalog;

pub fn execute(data_dir: &Path) -> Result<()> {
    let catalog = Catalog::load(data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    println!("Jobs:");
    if catalog.jobs.is_empty() {
        println!("  (none)");
    }
    for job in &catalog.jobs {
        let mut line = format!("  {}  {}", job.id(), job.title);
        for detail in [&job.company, &job.location].into_iter().flatten() {
            line.push_str(" | ");
            line.push_str(detail);
        }
        println!("{}", line);
    }

    println!("Layouts:");
    if catalog.layouts.is_empty() {
        println!("  (none)");
    }
    for layout in &catalog.layouts {
        match &layout.description {
            Some(description) => println!("  {}  {} - {}", layout.id, layout.name, description),
            None => println!("  {}  {}", layout.id, layout.name),
        }
    }

    Ok(())
}

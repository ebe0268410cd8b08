/*
 * catalog.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loading jobs and layouts from a data directory.
//!
//! The directory layout is:
//!
//! ```text
//! <data>/jobs/index.json   [{"file": "dev.json", "id": "dev"}, ...]
//! <data>/jobs/<file>       one job record per file
//! <data>/layouts.json      [{"id": "classic", "name": "...", ...}, ...]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{DataError, DataResult};
use crate::records::{Job, JobIndexEntry, Layout};

/// All jobs and layouts available for selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub jobs: Vec<Job>,
    pub layouts: Vec<Layout>,
}

impl Catalog {
    /// Create a catalog from already-loaded records.
    pub fn new(jobs: Vec<Job>, layouts: Vec<Layout>) -> Self {
        Self { jobs, layouts }
    }

    /// Load the catalog from `data_dir`.
    ///
    /// A job file that cannot be read or parsed is logged and skipped. A
    /// missing or invalid index or layouts file is an error.
    pub fn load(data_dir: &Path) -> DataResult<Self> {
        let jobs = load_jobs(&data_dir.join("jobs"))?;
        let layouts: Vec<Layout> = read_json(&data_dir.join("layouts.json"))?;

        tracing::info!(
            jobs = jobs.len(),
            layouts = layouts.len(),
            dir = %data_dir.display(),
            "Loaded catalog"
        );

        Ok(Self { jobs, layouts })
    }

    pub fn find_job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id() == id)
    }

    pub fn find_layout(&self, id: &str) -> Option<&Layout> {
        self.layouts.iter().find(|layout| layout.id == id)
    }
}

fn load_jobs(jobs_dir: &Path) -> DataResult<Vec<Job>> {
    let index: Vec<JobIndexEntry> = read_json(&jobs_dir.join("index.json"))?;

    let mut jobs = Vec::with_capacity(index.len());
    for entry in index {
        let path = jobs_dir.join(&entry.file);
        match read_json::<Job>(&path) {
            Ok(mut job) => {
                // Record id, then index id, then the file name
                if job.id.is_none() {
                    job.id = Some(entry.id.unwrap_or_else(|| file_stem(&entry.file)));
                }
                tracing::debug!(id = job.id(), file = %path.display(), "Loaded job");
                jobs.push(job);
            }
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Skipping job");
            }
        }
    }
    Ok(jobs)
}

/// Strip a trailing `.json` (any case) from a file name.
fn file_stem(file: &str) -> String {
    let cut = file.len().saturating_sub(5);
    match file.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".json") => file[..cut].to_string(),
        _ => file.to_string(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DataError::Json {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("dev.json"), "dev");
        assert_eq!(file_stem("DEV.JSON"), "DEV");
        assert_eq!(file_stem("notes.txt"), "notes.txt");
        assert_eq!(file_stem("json"), "json");
        assert_eq!(file_stem("kế-toán.json"), "kế-toán");
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::new(
            vec![Job {
                id: Some("dev".to_string()),
                title: "Dev".to_string(),
                ..Default::default()
            }],
            vec![Layout {
                id: "classic".to_string(),
                ..Default::default()
            }],
        );

        assert_eq!(catalog.find_job("dev").map(|j| j.title.as_str()), Some("Dev"));
        assert!(catalog.find_job("qa").is_none());
        assert!(catalog.find_layout("classic").is_some());
        assert!(catalog.find_layout("modern").is_none());
    }
}

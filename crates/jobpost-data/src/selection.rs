/*
 * selection.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Which jobs and which layout are currently picked.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::error::{DataError, DataResult};
use crate::records::{Job, Layout};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    job_ids: HashSet<String>,
    layout_id: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a job, checking that it exists in the catalog.
    pub fn select_job(&mut self, catalog: &Catalog, id: &str) -> DataResult<()> {
        if catalog.find_job(id).is_none() {
            return Err(DataError::UnknownJob(id.to_string()));
        }
        self.job_ids.insert(id.to_string());
        Ok(())
    }

    pub fn deselect_job(&mut self, id: &str) {
        self.job_ids.remove(id);
    }

    /// Flip the selection state of a job. Returns whether it is now selected.
    pub fn toggle_job(&mut self, id: &str) -> bool {
        if self.job_ids.remove(id) {
            false
        } else {
            self.job_ids.insert(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.job_ids.contains(id)
    }

    /// Select a layout, checking that it exists in the catalog.
    pub fn select_layout(&mut self, catalog: &Catalog, id: &str) -> DataResult<()> {
        if catalog.find_layout(id).is_none() {
            return Err(DataError::UnknownLayout(id.to_string()));
        }
        self.layout_id = Some(id.to_string());
        Ok(())
    }

    pub fn layout_id(&self) -> Option<&str> {
        self.layout_id.as_deref()
    }

    /// Selected jobs, in catalog order.
    pub fn selected_jobs<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Job> {
        catalog
            .jobs
            .iter()
            .filter(|job| self.job_ids.contains(job.id()))
            .collect()
    }

    /// The selected layout, or the first catalog layout when none is picked.
    pub fn effective_layout<'c>(&self, catalog: &'c Catalog) -> Option<&'c Layout> {
        match &self.layout_id {
            Some(id) => catalog.find_layout(id),
            None => catalog.layouts.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> Job {
        Job {
            id: Some(id.to_string()),
            title: id.to_uppercase(),
            ..Default::default()
        }
    }

    fn layout(id: &str) -> Layout {
        Layout {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![job("a"), job("b"), job("c")],
            vec![layout("classic"), layout("modern")],
        )
    }

    #[test]
    fn test_selected_jobs_follow_catalog_order() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.select_job(&catalog, "c").unwrap();
        selection.select_job(&catalog, "a").unwrap();

        let ids: Vec<&str> = selection
            .selected_jobs(&catalog)
            .iter()
            .map(|j| j.id())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_select_unknown() {
        let catalog = catalog();
        let mut selection = Selection::new();
        assert!(matches!(
            selection.select_job(&catalog, "zzz"),
            Err(DataError::UnknownJob(id)) if id == "zzz"
        ));
        assert!(matches!(
            selection.select_layout(&catalog, "zzz"),
            Err(DataError::UnknownLayout(_))
        ));
    }

    #[test]
    fn test_toggle_and_deselect() {
        let mut selection = Selection::new();
        assert!(selection.toggle_job("a"));
        assert!(selection.is_selected("a"));
        assert!(!selection.toggle_job("a"));
        assert!(!selection.is_selected("a"));

        selection.toggle_job("b");
        selection.deselect_job("b");
        assert!(!selection.is_selected("b"));
    }

    #[test]
    fn test_effective_layout_defaults_to_first() {
        let catalog = catalog();
        let mut selection = Selection::new();
        assert_eq!(
            selection.effective_layout(&catalog).map(|l| l.id.as_str()),
            Some("classic")
        );

        selection.select_layout(&catalog, "modern").unwrap();
        assert_eq!(selection.layout_id(), Some("modern"));
        assert_eq!(
            selection.effective_layout(&catalog).map(|l| l.id.as_str()),
            Some("modern")
        );
    }

    #[test]
    fn test_effective_layout_empty_catalog() {
        let catalog = Catalog::default();
        assert!(Selection::new().effective_layout(&catalog).is_none());
    }
}

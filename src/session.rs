use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{SieveConfig, EXPORT_MIME_TYPE};
use crate::data::{
    apply_filters, load_file, project, to_csv, Criterion, DataError, Dataset, Record, Result,
};

// ---------------------------------------------------------------------------
// FilteredView – the outcome of one filter run
// ---------------------------------------------------------------------------

/// Records produced by [`Session::run_filter`], tagged with the dataset
/// generation they were computed from.
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub generation: u64,
    pub records: Vec<Record>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Session – loaded dataset plus the derived state of one user session
// ---------------------------------------------------------------------------

/// Owns the loaded record set and everything derived from it.
///
/// Loading a new dataset bumps `generation` and drops the criteria and the
/// last filtered view, so nothing computed against an older file can be
/// previewed or exported afterwards.
#[derive(Debug, Default)]
pub struct Session {
    config: SieveConfig,
    dataset: Option<Dataset>,
    generation: u64,
    criteria: Vec<Criterion>,
    view: Option<FilteredView>,
}

impl Session {
    pub fn new(config: SieveConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Last filtered view, if one was computed for the current dataset.
    pub fn view(&self) -> Option<&FilteredView> {
        self.view.as_ref()
    }

    /// Replace the loaded dataset. Returns the new generation.
    pub fn load_dataset(&mut self, dataset: Dataset) -> u64 {
        self.generation += 1;
        log::info!(
            "Loaded dataset #{} with {} records and fields {:?}",
            self.generation,
            dataset.len(),
            dataset.field_names()
        );
        self.dataset = Some(dataset);
        self.criteria.clear();
        self.view = None;
        self.generation
    }

    /// Read a file from disk and make it the current dataset. On failure the
    /// previous dataset stays loaded.
    pub fn load_file(&mut self, path: &Path) -> Result<u64> {
        let dataset = load_file(path)?;
        Ok(self.load_dataset(dataset))
    }

    pub fn set_criteria(&mut self, criteria: Vec<Criterion>) {
        self.criteria = criteria;
    }

    /// Apply the current criteria to the current dataset.
    pub fn run_filter(&mut self) -> Result<&FilteredView> {
        let dataset = self.dataset.as_ref().ok_or(DataError::NoDataset)?;
        let records = apply_filters(&dataset.records, &self.criteria);
        Ok(self.view.insert(FilteredView {
            generation: self.generation,
            records,
        }))
    }

    /// The first `preview_rows` records of the last filtered view.
    pub fn preview(&self) -> &[Record] {
        match &self.view {
            Some(view) => {
                let n = view.records.len().min(self.config.preview_rows);
                &view.records[..n]
            }
            None => &[],
        }
    }

    /// Check that `view` was computed from the dataset currently loaded.
    ///
    /// The session's own view is dropped on every load; this is for clones
    /// held by callers across a reload.
    pub fn ensure_current(&self, view: &FilteredView) -> Result<()> {
        if view.generation == self.generation {
            Ok(())
        } else {
            Err(DataError::StaleResult {
                result: view.generation,
                current: self.generation,
            })
        }
    }

    /// Project the last filtered view onto `columns` and encode it as CSV.
    /// Without a filter run the whole dataset is exported.
    pub fn export_csv(&self, columns: &BTreeSet<String>) -> Result<String> {
        let dataset = self.dataset.as_ref().ok_or(DataError::NoDataset)?;
        // Loading clears `view`, so a stored view is always current.
        let records = match &self.view {
            Some(view) => &view.records,
            None => &dataset.records,
        };
        to_csv(&project(records, columns))
    }

    /// Write the export to `path`.
    pub fn export_to_file(&self, columns: &BTreeSet<String>, path: &Path) -> Result<()> {
        let csv = self.export_csv(columns)?;
        std::fs::write(path, csv)?;
        log::info!(
            "Exported {} columns to {} ({EXPORT_MIME_TYPE})",
            columns.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_json_records, LogicalOperand};

    fn names(cols: &[&str]) -> BTreeSet<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    fn loaded() -> Session {
        let mut session = Session::default();
        let ds = parse_json_records(
            r#"[
                {"name": "a", "type": "x", "qty": 1},
                {"name": "b", "type": "y", "qty": 2},
                {"name": "c", "type": "x", "qty": 3},
                {"name": "d", "type": "x", "qty": 4},
                {"name": "e", "type": "x", "qty": 5},
                {"name": "f", "type": "x", "qty": 6},
                {"name": "g", "type": "x", "qty": 7}
            ]"#,
        )
        .unwrap();
        session.load_dataset(ds);
        session
    }

    #[test]
    fn run_filter_without_dataset_fails() {
        let mut session = Session::default();
        assert!(matches!(session.run_filter(), Err(DataError::NoDataset)));
        assert!(matches!(
            session.export_csv(&names(&["a"])),
            Err(DataError::NoDataset)
        ));
        assert!(session.preview().is_empty());
    }

    #[test]
    fn preview_is_capped_but_export_is_not() {
        let mut session = loaded();
        session.set_criteria(vec![Criterion::new("type", "x", LogicalOperand::And)]);
        let view = session.run_filter().unwrap();
        assert_eq!(view.len(), 6);

        assert_eq!(session.preview().len(), 5);
        let csv = session.export_csv(&names(&["name"])).unwrap();
        assert_eq!(csv.lines().count(), 7);
    }

    #[test]
    fn export_projects_the_filtered_view() {
        let mut session = loaded();
        session.set_criteria(vec![
            Criterion::new("type", "y", LogicalOperand::And),
            Criterion::new("name", "a", LogicalOperand::Or),
        ]);
        session.run_filter().unwrap();
        let csv = session.export_csv(&names(&["name", "qty"])).unwrap();
        assert_eq!(csv, "name,qty\n\"b\",\"2\"\n\"a\",\"1\"");
    }

    #[test]
    fn export_without_filter_run_uses_whole_dataset() {
        let session = loaded();
        let csv = session.export_csv(&names(&["name"])).unwrap();
        assert_eq!(csv.lines().count(), 8);
    }

    #[test]
    fn loading_invalidates_criteria_and_view() {
        let mut session = loaded();
        session.set_criteria(vec![Criterion::new("type", "x", LogicalOperand::And)]);
        let old = session.run_filter().unwrap().clone();
        assert_eq!(session.generation(), 1);

        let generation = session.load_dataset(parse_json_records(r#"[{"k": "v"}]"#).unwrap());
        assert_eq!(generation, 2);
        assert!(session.criteria().is_empty());
        assert!(session.view().is_none());
        assert!(session.preview().is_empty());
        assert!(matches!(
            session.ensure_current(&old),
            Err(DataError::StaleResult { result: 1, current: 2 })
        ));

        let csv = session.export_csv(&names(&["k"])).unwrap();
        assert_eq!(csv, "k\n\"v\"");
    }

    #[test]
    fn export_after_reload_encodes_the_new_filter_run() {
        let mut session = loaded();
        session.set_criteria(vec![Criterion::new("type", "x", LogicalOperand::And)]);
        session.run_filter().unwrap();

        session.load_dataset(parse_json_records(r#"[{"k": "a"}, {"k": "b"}]"#).unwrap());
        session.set_criteria(vec![Criterion::new("k", "B", LogicalOperand::And)]);
        let view = session.run_filter().unwrap().clone();
        session.ensure_current(&view).unwrap();

        let csv = session.export_csv(&names(&["k"])).unwrap();
        assert_eq!(csv, "k\n\"b\"");
    }

    #[test]
    fn preview_size_comes_from_config() {
        let mut session = Session::new(SieveConfig {
            preview_rows: 2,
            ..SieveConfig::default()
        });
        session.load_dataset(parse_json_records(r#"[{"a":1},{"a":2},{"a":3}]"#).unwrap());
        session.run_filter().unwrap();
        assert_eq!(session.preview().len(), 2);
    }
}

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use record_sieve::data::{Criterion, Dataset, LogicalOperand};
use record_sieve::{SieveConfig, Session};

// ---------------------------------------------------------------------------
// Form rows
// ---------------------------------------------------------------------------

/// One row of the criteria form: field dropdown, value dropdown, AND/OR.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriterionRow {
    pub field: String,
    pub value: String,
    pub operand: LogicalOperand,
}

/// A column of the preview table and whether it goes into the export.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnToggle {
    pub name: String,
    pub selected: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, criteria and last filter result.
    pub session: Session,

    /// Criteria form, one entry per "Field N" group.
    pub rows: Vec<CriterionRow>,

    /// Columns of the preview table with their export checkbox.
    pub columns: Vec<ColumnToggle>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SieveConfig::default())
    }
}

impl AppState {
    pub fn new(config: SieveConfig) -> Self {
        Self {
            session: Session::new(config),
            rows: Vec::new(),
            columns: Vec::new(),
            status_message: None,
        }
    }

    /// Field names offered by the field dropdowns.
    pub fn field_names(&self) -> Vec<String> {
        self.session
            .dataset()
            .map(Dataset::field_names)
            .unwrap_or_default()
    }

    /// Values offered by a value dropdown for `field`.
    pub fn value_options(&self, field: &str) -> Vec<String> {
        self.session
            .dataset()
            .map(|ds| ds.unique_values(field))
            .unwrap_or_default()
    }

    /// Ingest a newly loaded dataset and reset the form.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.session.load_dataset(dataset);
        self.rows.clear();
        self.columns.clear();
        self.add_row();
        self.status_message = None;
    }

    /// Load a file from disk. The previous dataset survives a failed load.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset = record_sieve::data::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Append a criteria row preset to the first field and its first value.
    pub fn add_row(&mut self) {
        let field = self.field_names().into_iter().next().unwrap_or_default();
        let value = self
            .value_options(&field)
            .into_iter()
            .next()
            .unwrap_or_default();
        self.rows.push(CriterionRow {
            field,
            value,
            operand: LogicalOperand::And,
        });
    }

    /// Point a row at another field; its value resets to that field's first
    /// option.
    pub fn set_row_field(&mut self, index: usize, field: String) {
        let value = self
            .value_options(&field)
            .into_iter()
            .next()
            .unwrap_or_default();
        if let Some(row) = self.rows.get_mut(index) {
            row.field = field;
            row.value = value;
        }
    }

    /// Turn the form into criteria. Rows without a field are skipped.
    pub fn collect_criteria(&self) -> Vec<Criterion> {
        self.rows
            .iter()
            .filter(|row| !row.field.is_empty())
            .map(|row| Criterion::new(&row.field, &row.value, row.operand))
            .collect()
    }

    /// Run the form's criteria and rebuild the preview columns.
    pub fn apply_filters(&mut self) -> Result<usize> {
        let criteria = self.collect_criteria();
        self.session.set_criteria(criteria);
        let matched = self
            .session
            .run_filter()
            .context("applying filters")?
            .len();

        self.columns = self
            .session
            .preview()
            .first()
            .map(|record| {
                record
                    .field_names()
                    .map(|name| ColumnToggle {
                        name: name.to_string(),
                        selected: true,
                    })
                    .collect()
            })
            .unwrap_or_default();

        log::info!("Filter matched {matched} records");
        Ok(matched)
    }

    /// Columns whose export checkbox is ticked.
    pub fn selected_columns(&self) -> BTreeSet<String> {
        self.columns
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Write the filtered, column-pruned records to `path`.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        self.session
            .export_to_file(&self.selected_columns(), path)
            .with_context(|| format!("exporting to {}", path.display()))
    }

    /// Text for the record count label, once a filter has run.
    pub fn record_count_text(&self) -> Option<String> {
        self.session
            .view()
            .map(|view| format!("Filtered records: {}", view.len()))
    }
}

use std::path::{Path, PathBuf};

use job_explorer::charts::ChartKind;
use job_explorer::data::{
    export_jobs, filter_jobs, unique_values, FilterCriteria, JobColumn, JobTable, ALL,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Table,
    Chart(ChartKind),
    Summary,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until user loads a file). Never modified after load.
    pub table: Option<JobTable>,

    /// File the table came from.
    pub source: Option<PathBuf>,

    /// Current filter inputs.
    pub criteria: FilterCriteria,

    /// Records passing the current filters (cached).
    pub filtered: JobTable,

    /// Dropdown entries for the title / location filters.
    pub title_options: Vec<String>,
    pub location_options: Vec<String>,

    /// Colours per location, shared by the location charts.
    pub location_colors: Option<ColorMap>,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            criteria: FilterCriteria::default(),
            filtered: JobTable::default(),
            title_options: vec![ALL.to_string()],
            location_options: vec![ALL.to_string()],
            location_colors: None,
            view: View::Table,
            status_message: None,
            status_is_error: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table, reset filters and colours.
    pub fn set_table(&mut self, table: JobTable, source: &Path) {
        self.title_options = unique_values(&table, JobColumn::JobTitle.as_str());
        self.location_options = unique_values(&table, JobColumn::Location.as_str());
        self.location_colors = Some(ColorMap::new(&self.location_options[1..]));

        self.criteria = FilterCriteria::default();
        self.filtered = table.clone();
        self.table = Some(table);
        self.source = Some(source.to_path_buf());
        self.status_message = None;
        self.status_is_error = false;
    }

    /// Recompute `filtered` from the base table after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.filtered = filter_jobs(table, &self.criteria);
        }
    }

    /// Drop every predicate.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    /// Write the filtered records and report the outcome in the status line.
    pub fn export_filtered(&mut self, destination: &Path) {
        match export_jobs(&self.filtered, destination) {
            Ok(message) => self.set_status(message),
            Err(e) => {
                log::error!("Export failed: {e}");
                self.set_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Range (min, max) of known salaries in the loaded table, for slider defaults.
    pub fn salary_bounds(&self) -> (f64, f64) {
        self.numeric_bounds(|r| r.salary_numeric)
    }

    /// Range (min, max) of known experience years in the loaded table.
    pub fn experience_bounds(&self) -> (f64, f64) {
        self.numeric_bounds(|r| r.experience_years)
    }

    fn numeric_bounds(&self, value: impl Fn(&job_explorer::data::JobRecord) -> Option<f64>) -> (f64, f64) {
        let Some(table) = &self.table else {
            return (0.0, 0.0);
        };
        table
            .iter()
            .filter_map(value)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0))
    }
}

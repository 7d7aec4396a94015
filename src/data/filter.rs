use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::model::{JobRecord, JobTable};

/// Dropdown sentinel meaning "no constraint".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter criteria: one optional predicate per field
// ---------------------------------------------------------------------------

/// Optional predicates combined with logical AND.
///
/// A field that is `None` (or `"All"` for the text fields) does not constrain
/// the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the job title.
    pub job_title: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    /// Case-insensitive substring of the job description.
    pub keyword: Option<String>,
}

impl FilterCriteria {
    /// Read a criteria preset from a JSON file; missing keys are disabled.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading criteria preset {}", path.display()))?;
        serde_json::from_str(&text).context("parsing criteria preset")
    }

    /// Whether at least one predicate would narrow a table.
    pub fn is_active(&self) -> bool {
        active_text(&self.job_title).is_some()
            || active_text(&self.location).is_some()
            || active_keyword(&self.keyword).is_some()
            || self.min_salary.is_some()
            || self.max_salary.is_some()
            || self.min_experience.is_some()
            || self.max_experience.is_some()
    }

    /// Whether a single record passes every enabled predicate.
    pub fn matches(&self, record: &JobRecord) -> bool {
        if let Some(needle) = active_text(&self.job_title) {
            if !contains_ignore_case(record.job_title.as_deref(), needle) {
                return false;
            }
        }
        if let Some(needle) = active_text(&self.location) {
            if !contains_ignore_case(record.location.as_deref(), needle) {
                return false;
            }
        }
        if !in_range(record.salary_numeric, self.min_salary, self.max_salary) {
            return false;
        }
        if !in_range(record.experience_years, self.min_experience, self.max_experience) {
            return false;
        }
        if let Some(needle) = active_keyword(&self.keyword) {
            if !contains_ignore_case(record.job_description.as_deref(), needle) {
                return false;
            }
        }
        true
    }
}

/// Title / location predicate: disabled when absent, empty or `"All"`.
fn active_text(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL)
}

/// Keyword predicate: additionally disabled when whitespace-only.
fn active_keyword(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty() && *v != ALL)
}

/// An absent field never contains an active needle.
fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Inclusive range check. With either bound set, an absent value fails.
fn in_range(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(v) = value else {
        return false;
    };
    min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return a new table holding the records that pass all enabled predicates.
///
/// The source table is never modified; the result owns copies of the
/// matching records and keeps the source column order.
pub fn filter_jobs(table: &JobTable, criteria: &FilterCriteria) -> JobTable {
    if !criteria.is_active() {
        return table.clone();
    }
    let records = table
        .records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect();
    table.derive(records)
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// JobColumn – the required columns of a job listing source
// ---------------------------------------------------------------------------

/// The six columns every job listing source must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobColumn {
    JobTitle,
    Company,
    Location,
    Salary,
    Experience,
    JobDescription,
}

impl JobColumn {
    /// All required columns in canonical header order.
    pub const ALL: [JobColumn; 6] = [
        JobColumn::JobTitle,
        JobColumn::Company,
        JobColumn::Location,
        JobColumn::Salary,
        JobColumn::Experience,
        JobColumn::JobDescription,
    ];

    /// Header text as it appears in the source file.
    pub fn as_str(self) -> &'static str {
        match self {
            JobColumn::JobTitle => "Job Title",
            JobColumn::Company => "Company",
            JobColumn::Location => "Location",
            JobColumn::Salary => "Salary",
            JobColumn::Experience => "Experience",
            JobColumn::JobDescription => "Job Description",
        }
    }
}

impl fmt::Display for JobColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("not a job column: {s}"))
    }
}

// ---------------------------------------------------------------------------
// JobRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single job listing.
///
/// Text fields are `None` when the source cell is empty. The two numeric
/// fields are derived once at load time and are `None` when the raw text
/// could not be interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRecord {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// Currency formatted, e.g. `"$120,000"`.
    pub salary: Option<String>,
    /// Free text, e.g. `"5+ years"`.
    pub experience: Option<String>,
    pub job_description: Option<String>,
    /// Parsed from `salary`.
    pub salary_numeric: Option<f64>,
    /// Parsed from `experience`.
    pub experience_years: Option<f64>,
    /// Any non-required source columns: column_name → cell text.
    pub extra: BTreeMap<String, String>,
}

impl JobRecord {
    /// Raw text of a required column.
    pub fn get(&self, column: JobColumn) -> Option<&str> {
        let value = match column {
            JobColumn::JobTitle => &self.job_title,
            JobColumn::Company => &self.company,
            JobColumn::Location => &self.location,
            JobColumn::Salary => &self.salary,
            JobColumn::Experience => &self.experience,
            JobColumn::JobDescription => &self.job_description,
        };
        value.as_deref()
    }

    /// Raw text of any source column, required or extra, by header name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name.parse::<JobColumn>() {
            Ok(column) => self.get(column),
            Err(_) => self.extra.get(name).map(String::as_str),
        }
    }

    /// Store raw text for a column by header name. Empty text is stored as absent.
    pub fn set_field(&mut self, name: &str, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        let slot = match name.parse::<JobColumn>() {
            Ok(JobColumn::JobTitle) => &mut self.job_title,
            Ok(JobColumn::Company) => &mut self.company,
            Ok(JobColumn::Location) => &mut self.location,
            Ok(JobColumn::Salary) => &mut self.salary,
            Ok(JobColumn::Experience) => &mut self.experience,
            Ok(JobColumn::JobDescription) => &mut self.job_description,
            Err(_) => {
                match value {
                    Some(v) => {
                        self.extra.insert(name.to_string(), v);
                    }
                    None => {
                        self.extra.remove(name);
                    }
                }
                return;
            }
        };
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// JobTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An ordered set of job records sharing the same source columns.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTable {
    /// All records (rows), in source order.
    pub records: Vec<JobRecord>,
    /// Source column names in header order.
    pub columns: Vec<String>,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl JobTable {
    /// A table with the required columns only.
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self {
            records,
            columns: JobColumn::ALL.iter().map(|c| c.as_str().to_string()).collect(),
        }
    }

    /// A table with an explicit column order (e.g. a loaded header).
    pub fn with_columns(records: Vec<JobRecord>, columns: Vec<String>) -> Self {
        Self { records, columns }
    }

    /// Same columns, different rows.
    pub fn derive(&self, records: Vec<JobRecord>) -> Self {
        Self {
            records,
            columns: self.columns.clone(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a JobTable {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

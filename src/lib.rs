//! Job listings explorer.
//!
//! Load a table of job listings, narrow it with [`data::FilterCriteria`],
//! summarise it, turn it into chart data and export the result.
//!
//! ```no_run
//! use job_explorer::data::{filter_jobs, load_file, salary_stats, FilterCriteria};
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = load_file("sample_data/jobs_sample.csv".as_ref())?;
//! let criteria = FilterCriteria {
//!     location: Some("Remote".into()),
//!     min_salary: Some(90000.0),
//!     ..Default::default()
//! };
//! let remote = filter_jobs(&table, &criteria);
//! println!("{:?}", salary_stats(&remote));
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod data;
pub mod workbook;

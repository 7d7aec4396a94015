/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → JobTable (+ derived salary / years)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  FilterCriteria → new JobTable
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary  │   │  export  │  JobTable → .csv / .json / .parquet / .xlsx
///   └──────────┘   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;

pub use error::{ExportError, LoadError, ParseWarning};
pub use export::export_jobs;
pub use filter::{filter_jobs, FilterCriteria, ALL};
pub use loader::{load_file, load_file_with_warnings, LoadOutcome};
pub use model::{JobColumn, JobRecord, JobTable};
pub use summary::{job_summary, salary_stats, unique_values, value_counts, JobSummary, SalaryStats};

//! Error and warning types for file-level operations.

use std::fmt;

use thiserror::Error;

use super::model::JobColumn;

/// The source file could not be turned into a job table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("reading {path}: {cause}")]
    Io { path: String, cause: String },

    #[error("parsing CSV: {0}")]
    Csv(String),

    #[error("parsing JSON: {0}")]
    Json(String),

    #[error("reading parquet: {0}")]
    Parquet(String),

    #[error("reading spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("malformed source: {0}")]
    Malformed(String),
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e.to_string())
    }
}

impl From<parquet::errors::ParquetError> for LoadError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        LoadError::Parquet(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for LoadError {
    fn from(e: arrow::error::ArrowError) -> Self {
        LoadError::Parquet(e.to_string())
    }
}

impl From<calamine::Error> for LoadError {
    fn from(e: calamine::Error) -> Self {
        LoadError::Spreadsheet(e.to_string())
    }
}

/// The destination could not be written.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export extension: .{0}")]
    UnsupportedFormat(String),

    #[error("writing {path}: {cause}")]
    Io { path: String, cause: String },

    #[error("writing CSV: {0}")]
    Csv(String),

    #[error("writing JSON: {0}")]
    Json(String),

    #[error("writing parquet: {0}")]
    Parquet(String),

    #[error("writing spreadsheet: {0}")]
    Spreadsheet(String),
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e.to_string())
    }
}

impl From<parquet::errors::ParquetError> for ExportError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        ExportError::Parquet(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for ExportError {
    fn from(e: arrow::error::ArrowError) -> Self {
        ExportError::Parquet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Spreadsheet(e.to_string())
    }
}

/// A derived field whose raw text could not be interpreted.
/// The record keeps `None` for that field; loading carries on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    /// Zero-based data row (header excluded).
    pub row: usize,
    pub column: JobColumn,
    pub raw: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: cannot read {} from '{}'", self.row, self.column, self.raw)
    }
}

use std::path::Path;
use std::sync::LazyLock;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use regex::Regex;
use serde_json::Value as JsonValue;

use super::error::{LoadError, ParseWarning};
use super::model::{JobColumn, JobRecord, JobTable};

/// First contiguous run of digits in an experience description.
static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("static regex"));

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// A loaded table together with the derived fields that could not be read.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: JobTable,
    pub warnings: Vec<ParseWarning>,
}

/// Load a job table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one listing per line
/// * `.json`    – `[{ "Job Title": "...", "Salary": "$120,000", ... }, ...]`
/// * `.parquet` – one column per field; non-string columns are read as text
/// * `.xlsx` / `.xls` / `.ods` – first worksheet, header in the first row
pub fn load_file(path: &Path) -> Result<JobTable, LoadError> {
    load_file_with_warnings(path).map(|outcome| outcome.table)
}

/// Like [`load_file`], but also returns every unparseable derived field.
pub fn load_file_with_warnings(path: &Path) -> Result<LoadOutcome, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let outcome = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        "xlsx" | "xlsm" | "xls" | "ods" => load_spreadsheet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} job records from {} ({} unparseable fields)",
        outcome.table.len(),
        path.display(),
        outcome.warnings.len()
    );
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// `"$120,000"` → `120000.0`. Anything that is not a finite number after
/// stripping `$` and `,` yields `None`.
pub fn parse_salary(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// `"5+ years"` → `5.0`. Only the first run of digits is considered.
pub fn parse_experience(raw: &str) -> Option<f64> {
    YEARS_RE
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

struct TableBuilder {
    columns: Vec<String>,
    records: Vec<JobRecord>,
    warnings: Vec<ParseWarning>,
}

impl TableBuilder {
    fn new(columns: Vec<String>) -> Result<Self, LoadError> {
        for required in JobColumn::ALL {
            if !columns.iter().any(|c| c == required.as_str()) {
                return Err(LoadError::MissingColumn(required.as_str().to_string()));
            }
        }
        Ok(Self {
            columns,
            records: Vec::new(),
            warnings: Vec::new(),
        })
    }

    /// Add one row; `cells` is aligned with `self.columns`.
    fn push_row<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let row = self.records.len();
        let mut record = JobRecord::default();
        for (name, value) in self.columns.iter().zip(cells) {
            record.set_field(name, value);
        }

        if let Some(raw) = record.salary.as_deref() {
            record.salary_numeric = parse_salary(raw);
            if record.salary_numeric.is_none() {
                self.warn(row, JobColumn::Salary, raw);
            }
        }
        if let Some(raw) = record.experience.as_deref() {
            record.experience_years = parse_experience(raw);
            if record.experience_years.is_none() {
                self.warn(row, JobColumn::Experience, raw);
            }
        }

        self.records.push(record);
    }

    fn warn(&mut self, row: usize, column: JobColumn, raw: &str) {
        let warning = ParseWarning {
            row,
            column,
            raw: raw.to_string(),
        };
        log::debug!("{warning}");
        self.warnings.push(warning);
    }

    fn finish(self) -> LoadOutcome {
        LoadOutcome {
            table: JobTable::with_columns(self.records, self.columns),
            warnings: self.warnings,
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.display().to_string(),
        cause: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LoadOutcome, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = csv::Reader::from_reader(file);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut builder = TableBuilder::new(headers)?;
    for result in reader.records() {
        let record = result?;
        builder.push_row(record.iter().map(|cell| Some(cell.to_string())));
    }
    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `to_json(orient='records')` layout.
/// Numbers and booleans are read as their text form; `null` is absent.
fn load_json(path: &Path) -> Result<LoadOutcome, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    let mut objects = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        objects.push(obj);
    }

    // Key order of the first object, then keys that only appear later.
    // An empty array still yields the required columns.
    let mut columns: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    if objects.is_empty() {
        columns = JobColumn::ALL.iter().map(|c| c.as_str().to_string()).collect();
    }

    let mut builder = TableBuilder::new(columns.clone())?;
    for obj in objects {
        builder.push_row(columns.iter().map(|c| obj.get(c).and_then(json_to_text)));
    }
    Ok(builder.finish())
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every column is cast to Utf8 so numeric salary columns written by other
/// tools go through the same derived-field parsing as text ones.
fn load_parquet(path: &Path) -> Result<LoadOutcome, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut table = TableBuilder::new(columns)?;

    for batch_result in reader {
        let batch = batch_result?;
        let text_columns = batch
            .columns()
            .iter()
            .map(|col| cast(col.as_ref(), &DataType::Utf8))
            .collect::<Result<Vec<_>, _>>()?;

        for row in 0..batch.num_rows() {
            let cells = text_columns.iter().map(|col| {
                if col.is_null(row) {
                    None
                } else {
                    Some(col.as_string::<i32>().value(row).to_string())
                }
            });
            table.push_row(cells);
        }
    }

    Ok(table.finish())
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Reads the first worksheet; its first row is the header.
fn load_spreadsheet(path: &Path) -> Result<LoadOutcome, LoadError> {
    std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Malformed("workbook has no worksheets".into()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| cell_to_text(cell).unwrap_or_default().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut builder = TableBuilder::new(headers)?;
    for row in rows {
        builder.push_row(row.iter().map(cell_to_text));
    }
    Ok(builder.finish())
}

fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, XlsxError};
use serde_json::{Map, Value as JsonValue};

use super::error::ExportError;
use super::model::JobTable;

/// Write `table` to `destination`, choosing the format from the extension.
///
/// Only the source columns are written, in source order; the derived
/// numeric fields never leave the process. On success the returned message
/// is ready to show to the user.
pub fn export_jobs(table: &JobTable, destination: &Path) -> Result<String, ExportError> {
    let ext = destination
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => export_csv(table, destination),
        "json" => export_json(table, destination),
        "parquet" | "pq" => export_parquet(table, destination),
        "xlsx" => export_xlsx(table, destination),
        other => Err(ExportError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!("Exported {} job records to {}", table.len(), destination.display());
    Ok(format!(
        "Data exported successfully to {}",
        destination.display()
    ))
}

fn create(destination: &Path) -> Result<File, ExportError> {
    File::create(destination).map_err(|e| ExportError::Io {
        path: destination.display().to_string(),
        cause: e.to_string(),
    })
}

fn export_csv(table: &JobTable, destination: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(create(destination)?);
    writer.write_record(&table.columns)?;
    for record in table {
        writer.write_record(
            table
                .columns
                .iter()
                .map(|c| record.field(c).unwrap_or("")),
        )?;
    }
    writer.flush().map_err(|e| ExportError::Io {
        path: destination.display().to_string(),
        cause: e.to_string(),
    })
}

fn export_json(table: &JobTable, destination: &Path) -> Result<(), ExportError> {
    let rows: Vec<JsonValue> = table
        .iter()
        .map(|record| {
            let obj: Map<String, JsonValue> = table
                .columns
                .iter()
                .map(|c| {
                    let value = record
                        .field(c)
                        .map_or(JsonValue::Null, |v| JsonValue::String(v.to_string()));
                    (c.clone(), value)
                })
                .collect();
            JsonValue::Object(obj)
        })
        .collect();

    serde_json::to_writer_pretty(create(destination)?, &rows)?;
    Ok(())
}

/// Every column is written as nullable Utf8.
fn export_parquet(table: &JobTable, destination: &Path) -> Result<(), ExportError> {
    let schema = Arc::new(Schema::new(
        table
            .columns
            .iter()
            .map(|c| Field::new(c, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let arrays: Vec<ArrayRef> = table
        .columns
        .iter()
        .map(|c| {
            let values: Vec<Option<&str>> = table.iter().map(|r| r.field(c)).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let mut writer = ArrowWriter::try_new(create(destination)?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// One worksheet, bold header row; absent cells stay blank.
fn export_xlsx(table: &JobTable, destination: &Path) -> Result<(), ExportError> {
    let mut workbook = XlsxWorkbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Jobs")?;

    let header = Format::new().set_bold();
    for (col, name) in (0u16..).zip(&table.columns) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }
    for (row, record) in (1u32..).zip(table.iter()) {
        for (col, name) in (0u16..).zip(&table.columns) {
            if let Some(value) = record.field(name) {
                sheet.write_string(row, col, value)?;
            }
        }
    }

    workbook.save(destination).map_err(|e| match e {
        XlsxError::IoError(io) => ExportError::Io {
            path: destination.display().to_string(),
            cause: io.to_string(),
        },
        other => ExportError::from(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::JobRecord;

    fn table() -> JobTable {
        let mut record = JobRecord {
            job_title: Some("Engineer".into()),
            company: Some("Acme, Inc.".into()),
            location: Some("Lisbon".into()),
            salary: Some("$75,000".into()),
            experience: Some("2 years".into()),
            job_description: None,
            salary_numeric: Some(75000.0),
            experience_years: Some(2.0),
            ..Default::default()
        };
        record.set_field("Remote", Some("no".into()));
        let mut columns = JobTable::default().columns;
        columns.push("Remote".into());
        JobTable::with_columns(vec![record], columns)
    }

    #[test]
    fn csv_writes_original_columns_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let message = export_jobs(&table(), &path).unwrap();
        assert!(message.starts_with("Data exported successfully to"));

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Job Title,Company,Location,Salary,Experience,Job Description,Remote")
        );
        assert_eq!(
            lines.next(),
            Some("Engineer,\"Acme, Inc.\",Lisbon,\"$75,000\",2 years,,no")
        );
        assert!(!text.contains("75000"));
    }

    #[test]
    fn reload_returns_same_values() {
        let dir = tempfile::tempdir().unwrap();
        let original = table();
        for name in ["out.json", "out.parquet", "out.xlsx"] {
            let path = dir.path().join(name);
            export_jobs(&original, &path).unwrap();
            let reloaded = load_file(&path).unwrap();
            assert_eq!(reloaded.len(), 1, "{name}");
            assert_eq!(reloaded.records[0], original.records[0], "{name}");
        }
    }

    #[test]
    fn unwritable_destination_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");
        let err = export_jobs(&table(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("out.csv"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_jobs(&table(), &dir.path().join("out.txt")).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(_)));
    }

    #[test]
    fn column_order_survives_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = table();
        source.columns.rotate_right(1);
        assert_eq!(source.columns[0], "Remote");

        for name in ["out.csv", "out.json", "out.parquet", "out.xlsx"] {
            let path = dir.path().join(name);
            export_jobs(&source, &path).unwrap();
            let reloaded = load_file(&path).unwrap();
            assert_eq!(reloaded.columns, source.columns, "{name}");
        }
    }

    #[test]
    fn json_keys_written_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut source = table();
        source.columns.rotate_right(1);
        export_jobs(&source, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let remote = text.find("\"Remote\"").unwrap();
        let title = text.find("\"Job Title\"").unwrap();
        let company = text.find("\"Company\"").unwrap();
        assert!(remote < title && title < company);
    }
}

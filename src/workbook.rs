//! Template workbook: five sheets of instructions and code snippets that
//! walk a user through loading, filtering, summarising, charting and
//! exporting job data.
//!
//! The workbook is static content. It is saved as an `.xlsx` file, or as a
//! JSON document when the path ends in `.json`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook};
use serde::{Deserialize, Serialize};

/// Visual role of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    /// Bold, large, header fill.
    Title,
    /// Bold section heading.
    Heading,
    /// Instruction fill.
    Instruction,
    /// Code fill, wrapped, top aligned.
    Code,
    /// Bold label next to an input.
    Label,
    /// Bordered user-editable value.
    Input,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// A1-style reference.
    pub address: String,
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub cells: Vec<Cell>,
    /// Column letter → width in characters.
    pub column_widths: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// Split `"B12"` into `('B', 12)`. Only single-letter columns are used here.
pub fn parse_address(address: &str) -> Option<(char, u32)> {
    let mut chars = address.chars();
    let column = chars.next().filter(|c| c.is_ascii_uppercase())?;
    let row: u32 = chars.as_str().parse().ok()?;
    (row > 0).then_some((column, row))
}

/// Zero-based worksheet column of a column letter.
fn column_index(column: char) -> u16 {
    u16::from(column as u8 - b'A')
}

impl CellStyle {
    fn format(self) -> Format {
        match self {
            CellStyle::Title => Format::new()
                .set_bold()
                .set_font_size(16)
                .set_background_color(Color::RGB(0xD9E1F2)),
            CellStyle::Heading | CellStyle::Label => Format::new().set_bold(),
            CellStyle::Instruction => Format::new().set_background_color(Color::RGB(0xFFF2CC)),
            CellStyle::Code => Format::new()
                .set_font_name("Consolas")
                .set_background_color(Color::RGB(0xF2F2F2))
                .set_text_wrap()
                .set_align(FormatAlign::Top),
            CellStyle::Input => Format::new().set_border(FormatBorder::Thin),
        }
    }
}

impl Sheet {
    fn new(name: &str) -> Self {
        let column_widths = [("A", 50.0), ("B", 20.0), ("C", 20.0), ("D", 30.0), ("E", 30.0), ("F", 30.0)]
            .into_iter()
            .map(|(c, w)| (c.to_string(), w))
            .collect();
        Self {
            name: name.to_string(),
            cells: Vec::new(),
            column_widths,
        }
    }

    fn put(&mut self, column: char, row: u32, text: impl Into<String>, style: CellStyle) {
        self.cells.push(Cell {
            address: format!("{column}{row}"),
            text: text.into(),
            style,
        });
    }

    /// Heading, "Code in <cell>:" caption and the snippet on the two rows below.
    fn section(&mut self, row: u32, title: &str, code_cell: &str, code: &str) {
        self.put('A', row, title, CellStyle::Instruction);
        self.put('A', row + 1, format!("Code in {code_cell}:"), CellStyle::Heading);
        self.put('A', row + 2, code, CellStyle::Code);
    }

    pub fn cell(&self, address: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.address == address)
    }
}

impl Workbook {
    /// The job market explorer template.
    pub fn job_market_explorer() -> Self {
        Self {
            sheets: vec![
                data_input_sheet(),
                filter_controls_sheet(),
                dashboard_sheet(),
                visualizations_sheet(),
                export_sheet(),
            ],
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Reject duplicate sheet names and malformed or repeated cell addresses.
    pub fn validate(&self) -> Result<()> {
        let mut names = std::collections::HashSet::new();
        for sheet in &self.sheets {
            if !names.insert(sheet.name.as_str()) {
                bail!("duplicate sheet name '{}'", sheet.name);
            }
            let mut seen = std::collections::HashSet::new();
            for cell in &sheet.cells {
                if parse_address(&cell.address).is_none() {
                    bail!("sheet '{}': bad cell address '{}'", sheet.name, cell.address);
                }
                if !seen.insert(cell.address.as_str()) {
                    bail!("sheet '{}': cell {} written twice", sheet.name, cell.address);
                }
            }
        }
        Ok(())
    }

    /// Write the workbook; `.xlsx` or `.json` by extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => self.save_xlsx(path)?,
            "json" => {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("creating {}", path.display()))?;
                serde_json::to_writer_pretty(file, self).context("writing workbook JSON")?;
            }
            other => bail!("unsupported workbook extension: .{other}"),
        }
        log::info!("Wrote workbook with {} sheets to {}", self.sheets.len(), path.display());
        Ok(())
    }

    fn save_xlsx(&self, path: &Path) -> Result<()> {
        let mut book = XlsxWorkbook::new();
        for sheet in &self.sheets {
            let ws = book.add_worksheet();
            ws.set_name(&sheet.name)?;
            for (letter, width) in &sheet.column_widths {
                if let Some(column) = letter.chars().next().filter(|c| c.is_ascii_uppercase()) {
                    ws.set_column_width(column_index(column), *width)?;
                }
            }
            for cell in &sheet.cells {
                let (column, row) = parse_address(&cell.address)
                    .with_context(|| format!("bad cell address '{}'", cell.address))?;
                ws.write_string_with_format(row - 1, column_index(column), &cell.text, &cell.style.format())?;
                if cell.style == CellStyle::Code {
                    let lines = cell.text.lines().count().max(1) as f64;
                    ws.set_row_height(row - 1, 15.0 * lines)?;
                }
            }
        }
        book.save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sheet contents
// ---------------------------------------------------------------------------

fn data_input_sheet() -> Sheet {
    let mut ws = Sheet::new("Data Input");
    ws.put('A', 1, "Job Market Explorer - Data Input", CellStyle::Title);
    ws.put('A', 3, "Instructions:", CellStyle::Heading);
    ws.put('A', 4, "1. Load your job data using the code cell below", CellStyle::Instruction);
    ws.put('A', 5, "2. Use the sample data from sample_data/jobs_sample.csv", CellStyle::Instruction);
    ws.put('A', 6, "3. Or load your own CSV, JSON, Parquet or Excel file with job data", CellStyle::Instruction);
    ws.put('A', 8, "Code to Load Data:", CellStyle::Heading);
    ws.put(
        'A',
        9,
        "use job_explorer::data::load_file;\n\n\
         let table = load_file(\"sample_data/jobs_sample.csv\".as_ref())?;\n\
         println!(\"{} records\", table.len());",
        CellStyle::Code,
    );
    ws
}

fn filter_controls_sheet() -> Sheet {
    let mut ws = Sheet::new("Filter Controls");
    ws.put('A', 1, "Job Market Explorer - Filter Controls", CellStyle::Title);
    ws.put('A', 3, "Filter Parameters:", CellStyle::Heading);

    let params = [
        ("Job Title Filter", "All"),
        ("Location Filter", "All"),
        ("Min Salary", "50000"),
        ("Max Salary", "150000"),
        ("Min Experience (years)", "1"),
        ("Max Experience (years)", "10"),
        ("Keyword Search", "python"),
    ];
    for (row, (label, default)) in (4..).zip(params) {
        ws.put('A', row, label, CellStyle::Label);
        ws.put('B', row, default, CellStyle::Input);
    }

    ws.put('A', 12, "Code to Apply Filters:", CellStyle::Heading);
    ws.put(
        'A',
        13,
        "use job_explorer::data::{filter_jobs, FilterCriteria};\n\n\
         let criteria = FilterCriteria {\n    \
             job_title: Some(\"All\".into()),      // B4\n    \
             location: Some(\"All\".into()),       // B5\n    \
             min_salary: Some(50000.0),          // B6\n    \
             max_salary: Some(150000.0),         // B7\n    \
             min_experience: Some(1.0),          // B8\n    \
             max_experience: Some(10.0),         // B9\n    \
             keyword: Some(\"python\".into()),     // B10\n\
         };\n\
         let filtered = filter_jobs(&table, &criteria);",
        CellStyle::Code,
    );
    ws
}

fn dashboard_sheet() -> Sheet {
    let mut ws = Sheet::new("Analysis Dashboard");
    ws.put('A', 1, "Job Market Explorer - Analysis Dashboard", CellStyle::Title);

    let sections = [
        (3, "Job Summary", "D2", "job_summary(&filtered)"),
        (6, "Salary Statistics", "D5", "salary_stats(&filtered)"),
        (9, "Top Job Titles", "D8", "value_counts(&filtered, \"Job Title\").into_iter().take(5)"),
        (13, "Top Locations", "D12", "value_counts(&filtered, \"Location\").into_iter().take(5)"),
        (17, "Top Companies", "D16", "value_counts(&filtered, \"Company\").into_iter().take(5)"),
    ];
    for (row, title, code_cell, call) in sections {
        let code = format!(
            "use job_explorer::data::{{job_summary, salary_stats, value_counts}};\n\n{call}"
        );
        ws.section(row, title, code_cell, &code);
    }
    ws
}

fn visualizations_sheet() -> Sheet {
    let mut ws = Sheet::new("Visualizations");
    ws.put('A', 1, "Job Market Explorer - Visualizations", CellStyle::Title);

    let sections = [
        (3, "Salary Analysis Chart", "E2", "ChartKind::Salary"),
        (16, "Location Distribution Chart", "E15", "ChartKind::Location"),
        (29, "Experience Level Chart", "E28", "ChartKind::Experience"),
    ];
    for (row, title, code_cell, kind) in sections {
        let code = format!(
            "use job_explorer::charts::ChartKind;\n\nlet figure = {kind}.build(&filtered);"
        );
        ws.section(row, title, code_cell, &code);
    }
    ws
}

fn export_sheet() -> Sheet {
    let mut ws = Sheet::new("Export");
    ws.put('A', 1, "Job Market Explorer - Export Results", CellStyle::Title);

    ws.section(
        3,
        "Export Filtered Data",
        "F2",
        "use job_explorer::data::export_jobs;\n\n\
         let message = export_jobs(&filtered, \"filtered_jobs_export.xlsx\".as_ref())?;\n\
         println!(\"{message}\");",
    );
    ws.section(
        6,
        "Export Summary Report",
        "F5",
        "use job_explorer::data::{job_summary, JobRecord, JobTable};\n\n\
         let summary = job_summary(&filtered);\n\
         let top = |v: &[(String, usize)]| v.first().map(|(k, _)| k.clone());\n\
         let mut report = JobTable::with_columns(Vec::new(), vec![\"Metric\".into(), \"Value\".into()]);\n\
         for (metric, value) in [\n    \
             (\"Total Jobs\", Some(summary.total_jobs.to_string())),\n    \
             (\"Average Salary\", Some(format!(\"${:.2}\", summary.avg_salary))),\n    \
             (\"Top Location\", top(&summary.top_locations)),\n    \
             (\"Top Company\", top(&summary.top_companies)),\n\
         ] {\n    \
             let mut row = JobRecord::default();\n    \
             row.set_field(\"Metric\", Some(metric.into()));\n    \
             row.set_field(\"Value\", Some(value.unwrap_or_else(|| \"N/A\".into())));\n    \
             report.records.push(row);\n\
         }\n\
         export_jobs(&report, \"job_market_summary.xlsx\".as_ref())?;",
    );

    ws.put('A', 10, "Setup Instructions:", CellStyle::Heading);
    let steps = [
        "1. Build the tools: cargo build --release",
        "2. Generate sample data: cargo run --bin generate_sample",
        "3. Open the viewer: cargo run --release, then File > Open",
        "4. Load sample data from sample_data/jobs_sample.csv",
        "5. Adjust filter parameters in Sheet 2 to explore the data",
    ];
    for (row, step) in (11..).zip(steps) {
        ws.put('A', row, step, CellStyle::Instruction);
    }
    ws
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_five_named_sheets() {
        let wb = Workbook::job_market_explorer();
        let names: Vec<&str> = wb.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Data Input", "Filter Controls", "Analysis Dashboard", "Visualizations", "Export"]
        );
        wb.validate().unwrap();
    }

    #[test]
    fn filter_defaults_sit_in_column_b() {
        let wb = Workbook::job_market_explorer();
        let ws = wb.sheet("Filter Controls").unwrap();
        assert_eq!(ws.cell("A4").unwrap().text, "Job Title Filter");
        assert_eq!(ws.cell("B4").unwrap().text, "All");
        assert_eq!(ws.cell("B10").unwrap().text, "python");
        assert_eq!(ws.cell("B10").unwrap().style, CellStyle::Input);
    }

    #[test]
    fn sections_place_code_two_rows_below_heading() {
        let wb = Workbook::job_market_explorer();
        let ws = wb.sheet("Visualizations").unwrap();
        assert_eq!(ws.cell("A16").unwrap().text, "Location Distribution Chart");
        assert_eq!(ws.cell("A17").unwrap().text, "Code in E15:");
        let code = ws.cell("A18").unwrap();
        assert_eq!(code.style, CellStyle::Code);
        assert!(code.text.contains("ChartKind::Location"));
    }

    #[test]
    fn column_widths_applied_to_every_sheet() {
        for ws in Workbook::job_market_explorer().sheets {
            assert_eq!(ws.column_widths["A"], 50.0);
            assert_eq!(ws.column_widths["F"], 30.0);
        }
    }

    #[test]
    fn address_parsing() {
        assert_eq!(parse_address("A1"), Some(('A', 1)));
        assert_eq!(parse_address("F29"), Some(('F', 29)));
        assert_eq!(parse_address("a1"), None);
        assert_eq!(parse_address("A0"), None);
        assert_eq!(parse_address("AA"), None);
    }

    #[test]
    fn duplicate_cells_fail_validation() {
        let mut wb = Workbook::job_market_explorer();
        wb.sheets[0].put('A', 1, "again", CellStyle::Title);
        assert!(wb.validate().is_err());
    }

    #[test]
    fn save_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wb.json");
        let wb = Workbook::job_market_explorer();
        wb.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Workbook = serde_json::from_str(&text).unwrap();
        assert_eq!(back, wb);
        assert!(text.contains("\"style\": \"code\""));
    }

    #[test]
    fn save_writes_xlsx_sheets_and_cells() {
        use calamine::{open_workbook_auto, Data, Reader};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_market_explorer.xlsx");
        let wb = Workbook::job_market_explorer();
        wb.save(&path).unwrap();

        let mut book = open_workbook_auto(&path).unwrap();
        let names: Vec<String> = wb.sheets.iter().map(|s| s.name.clone()).collect();
        assert_eq!(book.sheet_names(), names);

        let range = book.worksheet_range("Filter Controls").unwrap();
        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Job Market Explorer - Filter Controls".into()))
        );
        assert_eq!(range.get_value((9, 1)), Some(&Data::String("python".into())));
    }

    #[test]
    fn save_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = Workbook::job_market_explorer()
            .save(&dir.path().join("wb.txt"))
            .unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }
}

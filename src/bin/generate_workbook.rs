use std::path::PathBuf;

use anyhow::Result;
use job_explorer::workbook::Workbook;

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("job_market_explorer.xlsx"));

    let workbook = Workbook::job_market_explorer();
    workbook.save(&output_path)?;

    println!("Workbook created successfully: {}", output_path.display());
    for sheet in &workbook.sheets {
        println!("  {} ({} cells)", sheet.name, sheet.cells.len());
    }
    Ok(())
}

//! Console walkthrough: load, filter, summarise, search, export.
//!
//! Usage: `demo [jobs.csv] [criteria.json]`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use job_explorer::charts::{ChartKind, Figure};
use job_explorer::data::{
    export_jobs, filter_jobs, job_summary, load_file_with_warnings, salary_stats,
    summary::format_thousands, unique_values, FilterCriteria, JobTable,
};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let source = args
        .next()
        .unwrap_or_else(|| PathBuf::from("sample_data/jobs_sample.csv"));
    let criteria = match args.next() {
        Some(preset) => FilterCriteria::from_json_file(&preset)?,
        None => FilterCriteria {
            job_title: Some("Software Engineer".into()),
            location: Some("San Francisco".into()),
            min_salary: Some(100_000.0),
            max_salary: Some(150_000.0),
            ..Default::default()
        },
    };

    println!("Job Market Explorer Demo");
    println!("{}", "=".repeat(50));

    println!("\nLoading job data from {}...", source.display());
    let outcome = load_file_with_warnings(&source)
        .with_context(|| format!("loading {}", source.display()))?;
    let table = outcome.table;
    println!("Loaded {} job records", table.len());
    println!("Columns: {:?}", table.columns);
    for warning in &outcome.warnings {
        println!("  note: {warning}");
    }

    println!("\nData preview:");
    print_rows(&table, 5);

    println!("\nAvailable filter options:");
    println!("Job titles: {:?}", unique_values(&table, "Job Title"));
    println!("Locations: {:?}", unique_values(&table, "Location"));

    println!("\nFiltering with {criteria:?}");
    let filtered = filter_jobs(&table, &criteria);
    println!("Found {} matching jobs", filtered.len());
    print_rows(&filtered, filtered.len());

    println!("\nSalary analysis:");
    let stats = salary_stats(&table);
    println!("Average salary: ${}", money(stats.mean));
    println!("Median salary: ${}", money(stats.median));
    println!("Salary range: ${} - ${}", money(stats.min), money(stats.max));

    println!("\nJob market summary:");
    let summary = job_summary(&table);
    println!("Total jobs: {}", summary.total_jobs);
    println!("Unique companies: {}", summary.unique_companies);
    println!("Unique locations: {}", summary.unique_locations);
    println!("Average salary: {}", summary.avg_salary);
    println!("Salary range: {}", summary.salary_range);
    println!("Top locations: {:?}", summary.top_locations);
    println!("Top companies: {:?}", summary.top_companies);

    println!("\nKeyword search for 'python'...");
    let python_jobs = filter_jobs(
        &table,
        &FilterCriteria {
            keyword: Some("python".into()),
            ..Default::default()
        },
    );
    println!("Found {} jobs mentioning Python", python_jobs.len());
    print_rows(&python_jobs, 5);

    println!("\nChart data:");
    for kind in ChartKind::ALL {
        println!("  {}: {}", kind.title(), describe(&kind.build(&table)));
    }

    println!("\nExport:");
    match export_jobs(&filtered, Path::new("demo_filtered_jobs.csv")) {
        Ok(message) => println!("{message}"),
        Err(e) => println!("Export failed: {e}"),
    }

    println!("\nDemo completed.");
    Ok(())
}

/// `-1234.5` → `"-1,234.50"`.
fn money(v: f64) -> String {
    let cents = (v.abs() * 100.0).round() as u64;
    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", format_thousands((cents / 100) as f64), cents % 100)
}

fn print_rows(table: &JobTable, limit: usize) {
    for record in table.iter().take(limit) {
        println!(
            "  {:<28} {:<20} {:<20} {}",
            record.job_title.as_deref().unwrap_or("-"),
            record.company.as_deref().unwrap_or("-"),
            record.location.as_deref().unwrap_or("-"),
            record.salary.as_deref().unwrap_or("-"),
        );
    }
}

fn describe(figure: &Figure) -> String {
    match figure {
        Figure::NoData => job_explorer::charts::NO_DATA.to_string(),
        Figure::Salary(fig) => format!(
            "{} titles, histogram {:?}",
            fig.avg_by_title.len(),
            fig.histogram.counts
        ),
        Figure::Location(fig) => format!("{} locations", fig.shares.len()),
        Figure::Experience(fig) => format!("{} experience levels", fig.counts.len()),
    }
}

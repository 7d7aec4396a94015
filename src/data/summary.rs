//! Descriptive statistics over a job table.
//!
//! Every function here is total: an empty table yields zero-valued results
//! so the viewer can always render something.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::filter::ALL;
use super::model::{JobColumn, JobTable};

/// Number of entries kept in the ranked groupings of [`JobSummary`].
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalaryStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Number of records in the table, including those without a salary.
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobSummary {
    pub total_jobs: usize,
    pub unique_companies: usize,
    pub unique_locations: usize,
    pub avg_salary: f64,
    /// `"$80,000 - $120,000"`; empty when no salary is known.
    pub salary_range: String,
    pub top_locations: Vec<(String, usize)>,
    pub top_companies: Vec<(String, usize)>,
}

/// Mean, median, min and max of the known salaries, rounded to cents.
pub fn salary_stats(table: &JobTable) -> SalaryStats {
    if table.is_empty() {
        return SalaryStats::default();
    }

    let mut salaries: Vec<f64> = table.iter().filter_map(|r| r.salary_numeric).collect();
    let count = table.len();
    if salaries.is_empty() {
        return SalaryStats {
            count,
            ..SalaryStats::default()
        };
    }
    salaries.sort_by(f64::total_cmp);

    let n = salaries.len();
    let mean = salaries.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        salaries[n / 2]
    } else {
        (salaries[n / 2 - 1] + salaries[n / 2]) / 2.0
    };

    SalaryStats {
        mean: round2(mean),
        median: round2(median),
        min: round2(salaries[0]),
        max: round2(salaries[n - 1]),
        count,
    }
}

/// Headline numbers for the dashboard.
pub fn job_summary(table: &JobTable) -> JobSummary {
    if table.is_empty() {
        return JobSummary::default();
    }

    let stats = salary_stats(table);
    let has_salary = table.iter().any(|r| r.salary_numeric.is_some());
    let salary_range = if has_salary {
        format!(
            "${} - ${}",
            format_thousands(stats.min),
            format_thousands(stats.max)
        )
    } else {
        String::new()
    };

    let mut top_locations = value_counts(table, JobColumn::Location.as_str());
    top_locations.truncate(TOP_N);
    let mut top_companies = value_counts(table, JobColumn::Company.as_str());
    top_companies.truncate(TOP_N);

    JobSummary {
        total_jobs: table.len(),
        unique_companies: distinct_count(table, JobColumn::Company.as_str()),
        unique_locations: distinct_count(table, JobColumn::Location.as_str()),
        avg_salary: stats.mean,
        salary_range,
        top_locations,
        top_companies,
    }
}

/// Distinct present values of `column`, sorted, with `"All"` in front.
pub fn unique_values(table: &JobTable, column: &str) -> Vec<String> {
    let distinct: BTreeSet<&str> = table.iter().filter_map(|r| r.field(column)).collect();
    std::iter::once(ALL.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// Occurrences of each present value of `column`, most frequent first.
/// Equal counts keep the order in which values first appear in the table.
pub fn value_counts(table: &JobTable, column: &str) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for value in table.iter().filter_map(|r| r.field(column)) {
        match slot.get(value) {
            Some(&i) => order[i].1 += 1,
            None => {
                slot.insert(value, order.len());
                order.push((value.to_string(), 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

fn distinct_count(table: &JobTable, column: &str) -> usize {
    table
        .iter()
        .filter_map(|r| r.field(column))
        .collect::<BTreeSet<_>>()
        .len()
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `1234567.4` → `"1,234,567"`.
pub fn format_thousands(v: f64) -> String {
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_salary;
    use crate::data::model::JobRecord;

    fn job(company: &str, location: &str, salary: &str) -> JobRecord {
        JobRecord {
            job_title: Some("Engineer".into()),
            company: Some(company.into()),
            location: Some(location.into()),
            salary: Some(salary.into()),
            salary_numeric: parse_salary(salary),
            ..Default::default()
        }
    }

    fn three_salaries() -> JobTable {
        JobTable::new(vec![
            job("Acme", "Austin", "$100,000"),
            job("Globex", "Boston", "$120,000"),
            job("Initech", "Austin", "$80,000"),
        ])
    }

    #[test]
    fn stats_over_three_salaries() {
        let stats = salary_stats(&three_salaries());
        assert_eq!(
            stats,
            SalaryStats {
                mean: 100000.0,
                median: 100000.0,
                min: 80000.0,
                max: 120000.0,
                count: 3,
            }
        );
    }

    #[test]
    fn stats_on_empty_table_are_zero() {
        assert_eq!(salary_stats(&JobTable::default()), SalaryStats::default());
    }

    #[test]
    fn unparseable_salary_is_excluded_but_counted() {
        let mut table = three_salaries();
        table.records.push(job("Hooli", "Remote", "N/A"));

        let stats = salary_stats(&table);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 100000.0);
        assert_eq!(stats.min, 80000.0);

        let summary = job_summary(&table);
        assert_eq!(summary.total_jobs, 4);
        assert_eq!(summary.avg_salary, 100000.0);
    }

    #[test]
    fn even_count_median_averages_middle_pair() {
        let table = JobTable::new(vec![
            job("A", "X", "$10"),
            job("B", "X", "$20"),
            job("C", "X", "$40"),
            job("D", "X", "$30"),
        ]);
        assert_eq!(salary_stats(&table).median, 25.0);
    }

    #[test]
    fn stats_round_to_two_decimals() {
        let table = JobTable::new(vec![
            job("A", "X", "$1"),
            job("B", "X", "$1"),
            job("C", "X", "$2"),
        ]);
        assert_eq!(salary_stats(&table).mean, 1.33);
    }

    #[test]
    fn no_known_salary_gives_zero_stats_with_count() {
        let table = JobTable::new(vec![job("A", "X", "TBD"), job("B", "Y", "")]);
        let stats = salary_stats(&table);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(job_summary(&table).salary_range, "");
    }

    #[test]
    fn summary_of_empty_table() {
        let summary = job_summary(&JobTable::default());
        assert_eq!(summary.total_jobs, 0);
        assert_eq!(summary.unique_companies, 0);
        assert_eq!(summary.unique_locations, 0);
        assert_eq!(summary.avg_salary, 0.0);
        assert!(summary.top_locations.is_empty());
    }

    #[test]
    fn summary_counts_and_range() {
        let summary = job_summary(&three_salaries());
        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.unique_companies, 3);
        assert_eq!(summary.unique_locations, 2);
        assert_eq!(summary.salary_range, "$80,000 - $120,000");
        assert_eq!(
            summary.top_locations,
            vec![("Austin".to_string(), 2), ("Boston".to_string(), 1)]
        );
    }

    #[test]
    fn top_n_ties_keep_first_seen_order() {
        let table = JobTable::new(vec![
            job("Zeta", "L", "$1"),
            job("Alpha", "L", "$1"),
            job("Mid", "L", "$1"),
            job("Alpha", "L", "$1"),
            job("Beta", "L", "$1"),
        ]);
        let summary = job_summary(&table);
        let names: Vec<&str> = summary.top_companies.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta", "Mid"]);
    }

    #[test]
    fn unique_values_sorted_with_sentinel() {
        let values = unique_values(&three_salaries(), "Location");
        assert_eq!(values, vec!["All", "Austin", "Boston"]);

        let empty = unique_values(&JobTable::default(), "Location");
        assert_eq!(empty, vec!["All"]);
    }

    #[test]
    fn unique_values_skip_absent() {
        let mut table = three_salaries();
        table.records[1].location = None;
        assert_eq!(unique_values(&table, "Location"), vec!["All", "Austin"]);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(120000.4), "120,000");
        assert_eq!(format_thousands(1234567.6), "1,234,568");
        assert_eq!(format_thousands(-4500.0), "-4,500");
    }
}

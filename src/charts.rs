//! Plot-ready data for the three fixed chart kinds.
//!
//! Nothing here draws; the viewer turns a [`Figure`] into `egui_plot`
//! widgets. Keeping the numbers separate makes them testable headlessly.

use std::collections::HashMap;

use crate::data::summary::{round2, value_counts};
use crate::data::{JobColumn, JobTable};

/// Placeholder text shown when a table has no rows.
pub const NO_DATA: &str = "No data to display";

/// Number of salary histogram bins.
pub const SALARY_BINS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Salary,
    Location,
    Experience,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Salary, ChartKind::Location, ChartKind::Experience];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Salary => "Salary Analysis",
            ChartKind::Location => "Location Analysis",
            ChartKind::Experience => "Experience Analysis",
        }
    }

    pub fn build(self, table: &JobTable) -> Figure {
        match self {
            ChartKind::Salary => salary_figure(table),
            ChartKind::Location => location_figure(table),
            ChartKind::Experience => experience_figure(table),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    NoData,
    Salary(SalaryFigure),
    Location(LocationFigure),
    Experience(ExperienceFigure),
}

/// Average salary by job title + salary distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryFigure {
    /// Ascending by average.
    pub avg_by_title: Vec<(String, f64)>,
    pub histogram: Histogram,
}

/// Share of jobs per location + average salary by location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFigure {
    /// Descending by count.
    pub shares: Vec<Share>,
    /// Ascending by average.
    pub avg_by_location: Vec<(String, f64)>,
}

/// Jobs per experience level (raw experience text).
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceFigure {
    pub counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: usize,
    /// 0–100, one decimal.
    pub percent: f64,
}

/// Equal-width bins; `edges.len() == counts.len() + 1` unless empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` over `[min, max]`. The last bin is closed on the right.
    /// A degenerate range is widened by half a unit on each side.
    pub fn new(values: &[f64], bins: usize) -> Self {
        if values.is_empty() || bins == 0 {
            return Self::default();
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Self { edges, counts }
    }

    /// Centre and width of bin `i`, for drawing bars.
    pub fn bin(&self, i: usize) -> (f64, f64) {
        let (a, b) = (self.edges[i], self.edges[i + 1]);
        ((a + b) / 2.0, b - a)
    }
}

pub fn salary_figure(table: &JobTable) -> Figure {
    if table.is_empty() {
        return Figure::NoData;
    }
    let salaries: Vec<f64> = table.iter().filter_map(|r| r.salary_numeric).collect();
    Figure::Salary(SalaryFigure {
        avg_by_title: mean_salary_by(table, JobColumn::JobTitle),
        histogram: Histogram::new(&salaries, SALARY_BINS),
    })
}

pub fn location_figure(table: &JobTable) -> Figure {
    if table.is_empty() {
        return Figure::NoData;
    }
    let counts = value_counts(table, JobColumn::Location.as_str());
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let shares = counts
        .into_iter()
        .map(|(label, count)| Share {
            percent: (count as f64 * 1000.0 / total as f64).round() / 10.0,
            label,
            count,
        })
        .collect();
    Figure::Location(LocationFigure {
        shares,
        avg_by_location: mean_salary_by(table, JobColumn::Location),
    })
}

pub fn experience_figure(table: &JobTable) -> Figure {
    if table.is_empty() {
        return Figure::NoData;
    }
    Figure::Experience(ExperienceFigure {
        counts: value_counts(table, JobColumn::Experience.as_str()),
    })
}

/// Average known salary per value of `column`, ascending.
/// Groups without any known salary are left out.
fn mean_salary_by(table: &JobTable, column: JobColumn) -> Vec<(String, f64)> {
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for record in table {
        let (Some(key), Some(salary)) = (record.get(column), record.salary_numeric) else {
            continue;
        };
        let i = *slot.entry(key).or_insert_with(|| {
            groups.push((key.to_string(), 0.0, 0));
            groups.len() - 1
        });
        groups[i].1 += salary;
        groups[i].2 += 1;
    }

    let mut means: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(key, sum, n)| (key, round2(sum / n as f64)))
        .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1));
    means
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_salary;
    use crate::data::JobRecord;

    fn job(title: &str, location: &str, salary: &str, experience: &str) -> JobRecord {
        JobRecord {
            job_title: Some(title.into()),
            location: Some(location.into()),
            salary: Some(salary.into()),
            experience: Some(experience.into()),
            salary_numeric: parse_salary(salary),
            ..Default::default()
        }
    }

    fn table() -> JobTable {
        JobTable::new(vec![
            job("Engineer", "Austin", "$100", "2 years"),
            job("Engineer", "Boston", "$200", "5+ years"),
            job("Analyst", "Austin", "$50", "2 years"),
            job("Manager", "Austin", "N/A", "10 years"),
        ])
    }

    #[test]
    fn empty_table_yields_placeholder() {
        let empty = JobTable::default();
        for kind in ChartKind::ALL {
            assert_eq!(kind.build(&empty), Figure::NoData);
        }
    }

    #[test]
    fn salary_by_title_ascending_without_unknown_groups() {
        let Figure::Salary(fig) = salary_figure(&table()) else {
            panic!("expected salary figure");
        };
        assert_eq!(
            fig.avg_by_title,
            vec![("Analyst".to_string(), 50.0), ("Engineer".to_string(), 150.0)]
        );
        assert_eq!(fig.histogram.counts.iter().sum::<usize>(), 3);
        assert_eq!(fig.histogram.edges.len(), SALARY_BINS + 1);
    }

    #[test]
    fn histogram_closes_last_bin() {
        let h = Histogram::new(&[0.0, 5.0, 10.0], 2);
        assert_eq!(h.edges, vec![0.0, 5.0, 10.0]);
        assert_eq!(h.counts, vec![1, 2]);
        assert_eq!(h.bin(0), (2.5, 5.0));
    }

    #[test]
    fn histogram_widens_degenerate_range() {
        let h = Histogram::new(&[7.0, 7.0], 1);
        assert_eq!(h.edges, vec![6.5, 7.5]);
        assert_eq!(h.counts, vec![2]);
        assert_eq!(Histogram::new(&[], 10), Histogram::default());
    }

    #[test]
    fn location_shares_sum_to_total() {
        let Figure::Location(fig) = location_figure(&table()) else {
            panic!("expected location figure");
        };
        assert_eq!(fig.shares[0].label, "Austin");
        assert_eq!(fig.shares[0].count, 3);
        assert_eq!(fig.shares[0].percent, 75.0);
        assert_eq!(fig.shares[1].percent, 25.0);
        assert_eq!(
            fig.avg_by_location,
            vec![("Austin".to_string(), 75.0), ("Boston".to_string(), 200.0)]
        );
    }

    #[test]
    fn experience_counts_raw_levels() {
        let Figure::Experience(fig) = experience_figure(&table()) else {
            panic!("expected experience figure");
        };
        assert_eq!(fig.counts[0], ("2 years".to_string(), 2));
        assert_eq!(fig.counts.len(), 3);
    }
}

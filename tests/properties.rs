//! Property-based checks for filtering, aggregation and export.

use job_explorer::data::loader::{parse_experience, parse_salary};
use job_explorer::data::{
    export_jobs, filter_jobs, load_file, salary_stats, unique_values, FilterCriteria, JobColumn,
    JobRecord, JobTable, ALL,
};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z0-9 ,$\"+-]{1,12}")
}

fn salary_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        (0u32..400_000).prop_map(|v| Some(format!("${v}"))),
        Just(Some("N/A".to_string())),
        Just(None),
    ]
}

fn record() -> impl Strategy<Value = JobRecord> {
    (
        prop::option::of(prop::sample::select(vec!["Engineer", "Analyst", "Data Engineer"])),
        text(),
        prop::option::of(prop::sample::select(vec!["Austin", "Boston", "Remote"])),
        salary_text(),
        prop::option::of(prop::sample::select(vec!["1 year", "3+ years", "Entry level"])),
        text(),
    )
        .prop_map(|(title, company, location, salary, experience, description)| JobRecord {
            job_title: title.map(str::to_string),
            company,
            location: location.map(str::to_string),
            salary_numeric: salary.as_deref().and_then(parse_salary),
            salary,
            experience_years: experience.and_then(parse_experience),
            experience: experience.map(str::to_string),
            job_description: description,
            ..Default::default()
        })
}

fn table() -> impl Strategy<Value = JobTable> {
    prop::collection::vec(record(), 0..25).prop_map(JobTable::new)
}

fn criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(prop::sample::select(vec!["All", "engineer", "ANALYST", ""])),
        prop::option::of(prop::sample::select(vec!["All", "aus", "remote"])),
        prop::option::of(0.0f64..200_000.0),
        prop::option::of(100_000.0f64..400_000.0),
        prop::option::of(0.0f64..3.0),
        prop::option::of(2.0f64..10.0),
        prop::option::of(prop::sample::select(vec!["All", " ", "a", "$"])),
    )
        .prop_map(|(t, l, smin, smax, emin, emax, k)| FilterCriteria {
            job_title: t.map(str::to_string),
            location: l.map(str::to_string),
            min_salary: smin,
            max_salary: smax,
            min_experience: emin,
            max_experience: emax,
            keyword: k.map(str::to_string),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_disabled_criteria_keep_every_record(t in table()) {
        let disabled = FilterCriteria {
            job_title: Some(ALL.into()),
            location: Some(ALL.into()),
            keyword: Some(ALL.into()),
            ..Default::default()
        };
        prop_assert_eq!(filter_jobs(&t, &disabled), t.clone());
        prop_assert_eq!(filter_jobs(&t, &FilterCriteria::default()), t);
    }

    #[test]
    fn prop_filter_is_idempotent(t in table(), c in criteria()) {
        let once = filter_jobs(&t, &c);
        let twice = filter_jobs(&once, &c);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_filter_only_narrows(t in table(), c in criteria()) {
        let out = filter_jobs(&t, &c);
        prop_assert!(out.len() <= t.len());
        for r in &out {
            prop_assert!(t.records.contains(r));
            if c.min_salary.is_some() || c.max_salary.is_some() {
                prop_assert!(r.salary_numeric.is_some());
            }
        }
    }

    #[test]
    fn prop_stats_count_is_table_length(t in table()) {
        let stats = salary_stats(&t);
        prop_assert_eq!(stats.count, t.len());
        if t.is_empty() {
            prop_assert_eq!(stats.mean, 0.0);
            prop_assert_eq!(stats.median, 0.0);
            prop_assert_eq!(stats.min, 0.0);
            prop_assert_eq!(stats.max, 0.0);
        } else {
            prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        }
    }

    #[test]
    fn prop_unique_values_sorted_after_sentinel(t in table()) {
        for column in JobColumn::ALL {
            let values = unique_values(&t, column.as_str());
            prop_assert_eq!(values[0].as_str(), ALL);
            prop_assert!(values[1..].windows(2).all(|w| w[0] < w[1]));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_csv_round_trip_preserves_original_columns(t in table()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.csv");
        export_jobs(&t, &path).unwrap();
        let back = load_file(&path).unwrap();

        prop_assert_eq!(back.len(), t.len());
        for (a, b) in t.iter().zip(back.iter()) {
            for column in JobColumn::ALL {
                prop_assert_eq!(a.get(column), b.get(column));
            }
        }
    }
}

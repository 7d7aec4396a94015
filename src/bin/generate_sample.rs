use std::path::PathBuf;

use anyhow::{Context, Result};
use job_explorer::data::{export_jobs, JobRecord, JobTable};

const TITLES: [(&str, f64); 8] = [
    ("Software Engineer", 115_000.0),
    ("Senior Software Engineer", 150_000.0),
    ("Data Scientist", 125_000.0),
    ("Data Analyst", 78_000.0),
    ("DevOps Engineer", 120_000.0),
    ("Product Manager", 135_000.0),
    ("UX Designer", 95_000.0),
    ("Machine Learning Engineer", 145_000.0),
];

const COMPANIES: [&str; 7] = [
    "TechCorp",
    "DataWorks",
    "CloudNine Systems",
    "InnovateLabs",
    "FinEdge",
    "HealthGrid",
    "RetailFlow",
];

/// Location and its salary multiplier.
const LOCATIONS: [(&str, f64); 6] = [
    ("San Francisco, CA", 1.25),
    ("New York, NY", 1.2),
    ("Seattle, WA", 1.15),
    ("Austin, TX", 1.0),
    ("Chicago, IL", 0.95),
    ("Remote", 0.9),
];

const EXPERIENCE: [&str; 6] = [
    "Entry level",
    "1-2 years",
    "3+ years",
    "5+ years",
    "7-10 years",
    "10+ years",
];

const SKILLS: [&str; 8] = [
    "Python",
    "Rust",
    "SQL",
    "Kubernetes",
    "AWS",
    "machine learning",
    "Figma",
    "stakeholder management",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data/jobs_sample.csv"));
    let count = 60;

    let mut rng = SimpleRng::new(42);
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        let &(title, base) = rng.pick(&TITLES);
        let &(location, factor) = rng.pick(&LOCATIONS);
        let company = *rng.pick(&COMPANIES);
        let experience = *rng.pick(&EXPERIENCE);
        let skill_a = *rng.pick(&SKILLS);
        let skill_b = *rng.pick(&SKILLS);

        // Every 15th listing has no published salary.
        let salary = if i % 15 == 14 {
            "N/A".to_string()
        } else {
            let noise = 0.85 + rng.next_f64() * 0.3;
            let amount = (base * factor * noise / 1000.0).round() * 1000.0;
            format!("${}", job_explorer::data::summary::format_thousands(amount))
        };

        let mut record = JobRecord::default();
        record.set_field("Job Title", Some(title.to_string()));
        record.set_field("Company", Some(company.to_string()));
        record.set_field("Location", Some(location.to_string()));
        record.set_field("Salary", Some(salary));
        record.set_field("Experience", Some(experience.to_string()));
        record.set_field(
            "Job Description",
            Some(format!(
                "{company} is hiring a {title} with experience in {skill_a} and {skill_b}."
            )),
        );
        records.push(record);
    }

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let table = JobTable::new(records);
    let message = export_jobs(&table, &output_path)?;
    println!("{message} ({} listings)", table.len());
    Ok(())
}

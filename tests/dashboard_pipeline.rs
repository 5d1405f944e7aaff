//! End-to-end runs over a loaded dataset, the way a dashboard backend would
//! drive the crate: load JSON, optionally filter, then fan out to the
//! aggregations.

use chrono::NaiveDate;
use posting_analytics::analysis::salary::PlausibilityRange;
use posting_analytics::analysis::{CorrelationConfig, correlation, grouped, skills};
use posting_analytics::ingest::{LoadOptions, load_postings_from_path, load_postings_from_str};
use posting_analytics::types::{PostingDataset, PostingFilter};

fn fixture_dataset() -> PostingDataset {
    let postings =
        load_postings_from_path("tests/fixtures/postings.json", &LoadOptions::default()).unwrap();
    PostingDataset::new(postings)
}

#[test]
fn aggregations_are_idempotent_on_an_immutable_dataset() {
    let ds = fixture_dataset();
    let before = ds.clone();

    let first = (
        skills::count_frequencies(&ds),
        skills::combinations(&ds, 10),
        grouped::by_location(&ds, &PlausibilityRange::default()),
        correlation::correlation_matrix(&ds, &PlausibilityRange::default()),
        grouped::time_series(&ds),
    );
    let second = (
        skills::count_frequencies(&ds),
        skills::combinations(&ds, 10),
        grouped::by_location(&ds, &PlausibilityRange::default()),
        correlation::correlation_matrix(&ds, &PlausibilityRange::default()),
        grouped::time_series(&ds),
    );

    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2, second.2);
    assert_eq!(first.3.labels, second.3.labels);
    assert_eq!(first.4, second.4);
    // No hidden mutation of the input.
    assert_eq!(ds, before);
}

#[test]
fn filtered_view_feeds_the_same_aggregations() {
    let ds = fixture_dataset();
    let filtered = ds.filter(&PostingFilter {
        cities: Some(vec!["Warszawa".to_string()]),
        ..PostingFilter::default()
    });

    assert_eq!(filtered.size(), 2);
    let freq = skills::count_frequencies(&filtered);
    assert_eq!(freq.get("Python"), Some(&2));
    assert_eq!(freq.get("Spark"), None);

    let by_city = grouped::by_location(&filtered, &PlausibilityRange::default());
    assert_eq!(by_city.len(), 1);
    let warsaw = by_city.get("Warszawa").unwrap();
    assert_eq!(warsaw.total_jobs, 2);
    assert_eq!(warsaw.companies, 2);
    assert_eq!(warsaw.remote_ratio, 0.5);
    // 13500 from the range, 12000 from the single value.
    let salary = warsaw.salary_stats.as_ref().unwrap();
    assert_eq!(salary.count, 2);
    assert_eq!(salary.mean, 12750.0);
}

#[test]
fn implausible_salaries_are_excluded_from_all_rollups() {
    let ds = fixture_dataset();
    // "500 - 2000000 PLN" and "do uzgodnienia" both parse to no salary data.
    let gdansk = grouped::by_location(&ds, &PlausibilityRange::default())
        .remove("Gdańsk")
        .unwrap();
    assert_eq!(gdansk.total_jobs, 2);
    assert!(gdansk.salary_stats.is_none());
}

#[test]
fn skill_salary_correlation_end_to_end() {
    // 3 postings mention Python (10k/12k/14k), 2 do not (20k/22k).
    let input = r#"[
        {"url": "p1", "skills": {"Python": "Regular"}, "salary": "10000 PLN"},
        {"url": "p2", "skills": {"Python": "Regular"}, "salary": "12000 PLN"},
        {"url": "p3", "skills": {"Python": "Regular", "SQL": "Regular"}, "salary": "14000 PLN"},
        {"url": "p4", "skills": {"Management": "Expert"}, "salary": "20000 PLN"},
        {"url": "p5", "skills": {"Management": "Expert"}, "salary": "22000 PLN"}
    ]"#;
    let postings = load_postings_from_str(input, &LoadOptions::default()).unwrap();
    let ds = PostingDataset::new(postings);

    let out = correlation::skill_salary_correlation(&ds, &CorrelationConfig::default());
    let python = out.get("Python").unwrap();
    assert_eq!(python.avg_with_skill, 12000.0);
    assert_eq!(python.avg_without_skill, 21000.0);
    assert_eq!(python.count_with_skill, 3);
    assert_eq!(python.count_without_skill, 2);
    assert!(python.correlation < 0.0);
}

#[test]
fn time_series_and_trends_over_fixture_dates() {
    let ds = fixture_dataset();
    let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    // Two postings on 01-01, one on 02-01; undated/unparseable rows dropped.
    assert_eq!(grouped::time_series(&ds), vec![(jan1, 2), (jan2, 1)]);

    let trends = grouped::skill_trends(&ds, 2);
    assert_eq!(trends.skills[0], "Python");
    for (_, counts) in &trends.rows {
        assert_eq!(counts.len(), trends.skills.len());
    }
}

#[test]
fn correlation_matrix_over_fixture() {
    let ds = fixture_dataset();
    let matrix = correlation::correlation_matrix(&ds, &PlausibilityRange::default());

    assert!(!matrix.is_empty());
    assert_eq!(matrix.labels[0], "salary_avg");
    assert_eq!(matrix.labels[1], "skills_count");
    assert!(matrix.labels.iter().any(|l| l == "seniority_Senior"));
    assert!(matrix.labels.iter().any(|l| l == "remote"));
    // Square, symmetric where defined.
    assert_eq!(matrix.values.len(), matrix.labels.len());
    for row in &matrix.values {
        assert_eq!(row.len(), matrix.labels.len());
    }
}

#[test]
fn filter_options_enumerate_distinct_values() {
    let ds = fixture_dataset();
    assert_eq!(
        ds.cities(),
        vec!["Gdańsk", "Kraków", "Warszawa"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert!(ds.skill_names().contains(&"Spark".to_string()));
    assert!(ds.companies().contains(&"Initech".to_string()));
}

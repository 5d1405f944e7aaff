//! Per-city, per-company, and per-date rollups.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::analysis::salary::{PlausibilityRange, parse_salary};
use crate::analysis::skills::{rank_descending, skill_counts};
use crate::analysis::stats;
use crate::types::{Posting, PostingDataset};

/// Skills listed in a city rollup.
pub const LOCATION_TOP_SKILLS: usize = 5;

/// Skills listed in a company rollup.
pub const COMPANY_TOP_SKILLS: usize = 3;

/// Salary summary for one group of postings.
#[derive(Debug, Clone, PartialEq)]
pub struct SalarySummary {
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Rollup for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationStats {
    pub total_jobs: usize,
    /// Top skills by frequency, at most [`LOCATION_TOP_SKILLS`].
    pub top_skills: Vec<(String, usize)>,
    /// Absent when no posting in the city has usable salary data.
    pub salary_stats: Option<SalarySummary>,
    /// Distinct companies hiring in the city.
    pub companies: usize,
    /// Share of postings with `remote == true` among those carrying the flag;
    /// 0 when none do.
    pub remote_ratio: f64,
}

/// Rollup for one company.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyStats {
    pub total_jobs: usize,
    /// Top skills by frequency, at most [`COMPANY_TOP_SKILLS`].
    pub top_skills: Vec<(String, usize)>,
    pub salary_stats: Option<SalarySummary>,
    /// Distinct cities the company hires in.
    pub cities: usize,
    pub remote_ratio: f64,
    pub seniority_distribution: BTreeMap<String, usize>,
}

/// Daily posting-count series for the top skills.
///
/// `rows` holds one entry per date (ascending) with a count per tracked
/// skill, in `skills` order; date/skill combinations without postings are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillTrends {
    pub skills: Vec<String>,
    pub rows: Vec<(NaiveDate, Vec<usize>)>,
}

impl SkillTrends {
    /// Returns `true` when no dated posting mentioned a tracked skill.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Statistics per city. Postings without a city are excluded.
pub fn by_location(
    dataset: &PostingDataset,
    range: &PlausibilityRange,
) -> BTreeMap<String, LocationStats> {
    group_by(dataset, |p| p.city.as_deref())
        .into_iter()
        .map(|(city, group)| {
            let stats = LocationStats {
                total_jobs: group.len(),
                top_skills: top_skills(&group, LOCATION_TOP_SKILLS),
                salary_stats: salary_summary(&group, range),
                companies: distinct_count(&group, |p| p.company.as_deref()),
                remote_ratio: remote_ratio(&group),
            };
            (city, stats)
        })
        .collect()
}

/// Statistics per company. Postings without a company are excluded.
pub fn by_company(
    dataset: &PostingDataset,
    range: &PlausibilityRange,
) -> BTreeMap<String, CompanyStats> {
    group_by(dataset, |p| p.company.as_deref())
        .into_iter()
        .map(|(company, group)| {
            let mut seniority_distribution = BTreeMap::new();
            for posting in &group {
                if let Some(seniority) = posting.seniority.as_deref() {
                    *seniority_distribution
                        .entry(seniority.to_string())
                        .or_insert(0) += 1;
                }
            }
            let stats = CompanyStats {
                total_jobs: group.len(),
                top_skills: top_skills(&group, COMPANY_TOP_SKILLS),
                salary_stats: salary_summary(&group, range),
                cities: distinct_count(&group, |p| p.city.as_deref()),
                remote_ratio: remote_ratio(&group),
                seniority_distribution,
            };
            (company, stats)
        })
        .collect()
}

/// Daily posting counts, ascending by date.
///
/// `published_date` is parsed day-first; unparseable rows are dropped and
/// time-of-day is discarded.
pub fn time_series(dataset: &PostingDataset) -> Vec<(NaiveDate, usize)> {
    let mut daily: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for posting in dataset.iter() {
        let Some(date) = posting.published_date.as_deref().and_then(parse_published_date)
        else {
            continue;
        };
        *daily.entry(date).or_insert(0) += 1;
    }
    daily.into_iter().collect()
}

/// Daily count series for the `top_n` most frequent skills.
///
/// Dates appear when at least one tracked skill was posted that day; within a
/// date, skills without postings are zero-filled. Rows are ascending by date.
pub fn skill_trends(dataset: &PostingDataset, top_n: usize) -> SkillTrends {
    let mut ranked = rank_descending(skill_counts(dataset.iter()));
    ranked.truncate(top_n);
    let skills: Vec<String> = ranked.into_iter().map(|(skill, _)| skill).collect();
    if skills.is_empty() {
        return SkillTrends {
            skills,
            rows: Vec::new(),
        };
    }

    let mut daily: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for posting in dataset.iter() {
        let Some(date) = posting.published_date.as_deref().and_then(parse_published_date)
        else {
            continue;
        };
        for (idx, skill) in skills.iter().enumerate() {
            if posting.skills.contains_key(skill) {
                daily.entry(date).or_insert_with(|| vec![0; skills.len()])[idx] += 1;
            }
        }
    }

    SkillTrends {
        skills,
        rows: daily.into_iter().collect(),
    }
}

/// Parse a publish date, day-first.
///
/// Accepts `31-12-2024`, `31/12/2024`, `31.12.2024`, ISO `2024-12-31`, the
/// same with a time component, and RFC 3339 timestamps. Time-of-day is
/// discarded.
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    // Day-first formats take priority over ISO for ambiguous inputs.
    for fmt in ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in ["%d-%m-%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn group_by<'a, F>(dataset: &'a PostingDataset, mut key: F) -> BTreeMap<String, Vec<&'a Posting>>
where
    F: FnMut(&'a Posting) -> Option<&'a str>,
{
    let mut groups: BTreeMap<String, Vec<&Posting>> = BTreeMap::new();
    for posting in dataset.iter() {
        if let Some(k) = key(posting) {
            if !k.is_empty() {
                groups.entry(k.to_string()).or_default().push(posting);
            }
        }
    }
    groups
}

fn top_skills(group: &[&Posting], limit: usize) -> Vec<(String, usize)> {
    let mut ranked = rank_descending(skill_counts(group.iter().copied()));
    ranked.truncate(limit);
    ranked
}

fn salary_summary(group: &[&Posting], range: &PlausibilityRange) -> Option<SalarySummary> {
    let salaries: Vec<f64> = group
        .iter()
        .filter_map(|p| parse_salary(p, range).map(|b| b.avg))
        .collect();
    Some(SalarySummary {
        mean: stats::mean(&salaries)?,
        median: stats::median(&salaries)?,
        count: salaries.len(),
    })
}

fn remote_ratio(group: &[&Posting]) -> f64 {
    let flags: Vec<bool> = group.iter().filter_map(|p| p.remote).collect();
    if flags.is_empty() {
        return 0.0;
    }
    flags.iter().filter(|f| **f).count() as f64 / flags.len() as f64
}

fn distinct_count<'a, F>(group: &[&'a Posting], mut key: F) -> usize
where
    F: FnMut(&'a Posting) -> Option<&'a str>,
{
    let mut values: Vec<&str> = group.iter().filter_map(|&p| key(p)).collect();
    values.sort_unstable();
    values.dedup();
    values.len()
}

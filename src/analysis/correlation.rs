//! Skill-vs-salary statistics and the numeric correlation matrix.
//!
//! Everything here is restricted to postings with a usable parsed salary;
//! rows without salary data are excluded, never zero-filled. Small groups are
//! silently omitted rather than reported as noisy statistics.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::salary::{PlausibilityRange, parse_salary};
use crate::analysis::stats;
use crate::types::{Posting, PostingDataset};

/// Minimum salaried postings a skill needs to appear in [`salary_by_skill`].
pub const MIN_SALARY_SAMPLES: usize = 3;

/// Per-skill salary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillSalaryStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Salary statistics per skill, over postings with a valid parsed salary.
///
/// A skill is included only when it has at least [`MIN_SALARY_SAMPLES`]
/// salaried postings.
pub fn salary_by_skill(
    dataset: &PostingDataset,
    range: &PlausibilityRange,
) -> BTreeMap<String, SkillSalaryStats> {
    let mut per_skill: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for posting in dataset.iter() {
        let Some(bounds) = parse_salary(posting, range) else {
            continue;
        };
        for skill in posting.skills.keys() {
            per_skill.entry(skill.clone()).or_default().push(bounds.avg);
        }
    }

    per_skill
        .into_iter()
        .filter(|(_, salaries)| salaries.len() >= MIN_SALARY_SAMPLES)
        .map(|(skill, salaries)| {
            let summary = SkillSalaryStats {
                // Guarded by the sample minimum, so the helpers cannot see an
                // empty slice here.
                mean: stats::mean(&salaries).unwrap_or(f64::NAN),
                median: stats::median(&salaries).unwrap_or(f64::NAN),
                min: salaries.iter().copied().fold(f64::INFINITY, f64::min),
                max: salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                count: salaries.len(),
                std_dev: stats::population_std_dev(&salaries).unwrap_or(f64::NAN),
            };
            (skill, summary)
        })
        .collect()
}

/// Limits and thresholds for [`skill_salary_correlation`].
///
/// The caps keep the cost roughly linear in dataset size: the candidate
/// vocabulary is drawn from a bounded sample of salaried postings and then
/// itself bounded.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationConfig {
    pub plausibility: PlausibilityRange,
    /// Salaried postings scanned to build the candidate skill vocabulary.
    pub posting_sample_cap: usize,
    /// Maximum number of candidate skills evaluated.
    pub skill_cap: usize,
    /// Minimum salaried postings listing the skill.
    pub min_with_skill: usize,
    /// Minimum salaried postings not listing the skill.
    pub min_without_skill: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            plausibility: PlausibilityRange::default(),
            posting_sample_cap: 200,
            skill_cap: 100,
            min_with_skill: 3,
            min_without_skill: 2,
        }
    }
}

/// Skill-presence vs. salary comparison for one skill.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillSalaryCorrelation {
    /// Normalized mean difference:
    /// `(meanWith − meanWithout) / max(meanWith, meanWithout, 1)`.
    pub correlation: f64,
    pub avg_with_skill: f64,
    pub avg_without_skill: f64,
    pub count_with_skill: usize,
    pub count_without_skill: usize,
}

/// Compare salaries of postings with vs. without each candidate skill.
///
/// Salaried postings are partitioned per skill into "lists it" / "does not
/// list it"; skills whose partitions are below the configured minimums are
/// omitted. The reported similarity measure is a normalized mean difference
/// in `[-1, 1]`, positive when the skill is associated with higher pay.
pub fn skill_salary_correlation(
    dataset: &PostingDataset,
    config: &CorrelationConfig,
) -> BTreeMap<String, SkillSalaryCorrelation> {
    let salaried: Vec<(&Posting, f64)> = dataset
        .iter()
        .filter_map(|p| parse_salary(p, &config.plausibility).map(|b| (p, b.avg)))
        .collect();

    // Candidate vocabulary from a bounded sample, alphabetical, then capped.
    let mut vocabulary = BTreeSet::new();
    for (posting, _) in salaried.iter().take(config.posting_sample_cap) {
        for skill in posting.skills.keys() {
            vocabulary.insert(skill.clone());
        }
    }

    let mut correlations = BTreeMap::new();
    for skill in vocabulary.into_iter().take(config.skill_cap) {
        let mut with_skill = Vec::new();
        let mut without_skill = Vec::new();
        for (posting, avg) in &salaried {
            if posting.skills.contains_key(&skill) {
                with_skill.push(*avg);
            } else {
                without_skill.push(*avg);
            }
        }

        if with_skill.len() < config.min_with_skill
            || without_skill.len() < config.min_without_skill
        {
            continue;
        }

        let avg_with = stats::mean(&with_skill).unwrap_or(f64::NAN);
        let avg_without = stats::mean(&without_skill).unwrap_or(f64::NAN);
        let correlation = (avg_with - avg_without) / avg_with.max(avg_without).max(1.0);

        correlations.insert(
            skill,
            SkillSalaryCorrelation {
                correlation,
                avg_with_skill: avg_with,
                avg_without_skill: avg_without,
                count_with_skill: with_skill.len(),
                count_without_skill: without_skill.len(),
            },
        );
    }
    correlations
}

/// Labeled Pearson correlation matrix.
///
/// `values[i][j]` is the correlation between columns `labels[i]` and
/// `labels[j]`. Zero-variance columns produce `NaN` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Returns `true` if no salaried rows were available.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Look up one entry by column labels.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        Some(self.values[i][j])
    }
}

/// Pairwise Pearson correlation over salary, skill count, seniority one-hot
/// columns, and the remote flag.
///
/// One row per salaried posting (others are dropped entirely). Columns:
/// `salary_avg`, `skills_count`, one `seniority_<value>` 0/1 column per
/// distinct seniority among the rows (sorted), and `remote` as 0/1 when at
/// least one row carries the flag. A missing seniority leaves all one-hot
/// columns at 0; a missing remote flag counts as 0.
pub fn correlation_matrix(dataset: &PostingDataset, range: &PlausibilityRange) -> CorrelationMatrix {
    let salaried: Vec<(&Posting, f64)> = dataset
        .iter()
        .filter_map(|p| parse_salary(p, range).map(|b| (p, b.avg)))
        .collect();

    if salaried.is_empty() {
        return CorrelationMatrix {
            labels: Vec::new(),
            values: Vec::new(),
        };
    }

    let seniorities: Vec<String> = salaried
        .iter()
        .filter_map(|(p, _)| p.seniority.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let any_remote = salaried.iter().any(|(p, _)| p.remote.is_some());

    let mut labels = vec!["salary_avg".to_string(), "skills_count".to_string()];
    labels.extend(seniorities.iter().map(|s| format!("seniority_{s}")));
    if any_remote {
        labels.push("remote".to_string());
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(salaried.len()); labels.len()];
    for (posting, avg) in &salaried {
        let mut col = 0;
        columns[col].push(*avg);
        col += 1;
        columns[col].push(posting.skills.len() as f64);
        col += 1;
        for seniority in &seniorities {
            let hit = posting.seniority.as_deref() == Some(seniority.as_str());
            columns[col].push(if hit { 1.0 } else { 0.0 });
            col += 1;
        }
        if any_remote {
            columns[col].push(if posting.remote == Some(true) { 1.0 } else { 0.0 });
        }
    }

    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| stats::pearson(a, b)).collect())
        .collect();

    CorrelationMatrix { labels, values }
}

#[cfg(test)]
mod tests {
    use super::{
        CorrelationConfig, MIN_SALARY_SAMPLES, correlation_matrix, salary_by_skill,
        skill_salary_correlation,
    };
    use crate::analysis::salary::PlausibilityRange;
    use crate::types::{Posting, PostingDataset};

    fn salaried_posting(skills: &[&str], avg: f64) -> Posting {
        Posting {
            skills: skills
                .iter()
                .map(|s| (s.to_string(), "Regular".to_string()))
                .collect(),
            salary_avg: Some(avg),
            ..Posting::default()
        }
    }

    #[test]
    fn skills_below_sample_minimum_are_omitted() {
        let ds = PostingDataset::new(vec![
            salaried_posting(&["Python", "SQL"], 10000.0),
            salaried_posting(&["Python", "SQL"], 12000.0),
            salaried_posting(&["Python"], 14000.0),
        ]);
        let stats = salary_by_skill(&ds, &PlausibilityRange::default());
        // SQL has only 2 salaried postings
        assert!(!stats.contains_key("SQL"));

        let python = stats.get("Python").unwrap();
        assert_eq!(python.count, MIN_SALARY_SAMPLES);
        assert_eq!(python.mean, 12000.0);
        assert_eq!(python.median, 12000.0);
        assert_eq!(python.min, 10000.0);
        assert_eq!(python.max, 14000.0);
        // Population std dev of {10000, 12000, 14000}
        assert!((python.std_dev - (8_000_000.0_f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn unsalaried_postings_do_not_count_toward_samples() {
        let mut unsalaried = salaried_posting(&["Python"], 0.0);
        unsalaried.salary_avg = None;
        let ds = PostingDataset::new(vec![
            salaried_posting(&["Python"], 10000.0),
            salaried_posting(&["Python"], 12000.0),
            unsalaried,
        ]);
        assert!(salary_by_skill(&ds, &PlausibilityRange::default()).is_empty());
    }

    #[test]
    fn correlation_partitions_and_averages() {
        let ds = PostingDataset::new(vec![
            salaried_posting(&["Python"], 10000.0),
            salaried_posting(&["Python"], 12000.0),
            salaried_posting(&["Python"], 14000.0),
            salaried_posting(&["Java"], 20000.0),
            salaried_posting(&["Java"], 22000.0),
        ]);
        let out = skill_salary_correlation(&ds, &CorrelationConfig::default());

        let python = out.get("Python").unwrap();
        assert_eq!(python.avg_with_skill, 12000.0);
        assert_eq!(python.avg_without_skill, 21000.0);
        assert_eq!(python.count_with_skill, 3);
        assert_eq!(python.count_without_skill, 2);
        // (12000 - 21000) / 21000
        assert!((python.correlation - (-9000.0 / 21000.0)).abs() < 1e-12);

        // Java appears in only 2 salaried postings, below min_with_skill.
        assert!(!out.contains_key("Java"));
    }

    #[test]
    fn correlation_respects_vocabulary_caps() {
        let ds = PostingDataset::new(vec![
            salaried_posting(&["Alpha"], 10000.0),
            salaried_posting(&["Alpha", "Beta"], 11000.0),
            salaried_posting(&["Alpha", "Beta"], 12000.0),
            salaried_posting(&["Beta"], 13000.0),
            salaried_posting(&["Beta"], 14000.0),
        ]);
        let config = CorrelationConfig {
            skill_cap: 1,
            min_with_skill: 2,
            min_without_skill: 1,
            ..CorrelationConfig::default()
        };
        let out = skill_salary_correlation(&ds, &config);
        // Alphabetical vocabulary capped to one entry: only Alpha evaluated.
        assert!(out.contains_key("Alpha"));
        assert!(!out.contains_key("Beta"));
    }

    #[test]
    fn matrix_has_expected_labels_and_diagonal() {
        let mut p1 = salaried_posting(&["Python"], 10000.0);
        p1.seniority = Some("Junior".into());
        p1.remote = Some(false);
        let mut p2 = salaried_posting(&["Python", "SQL"], 14000.0);
        p2.seniority = Some("Senior".into());
        p2.remote = Some(true);
        let mut p3 = salaried_posting(&["Python", "SQL", "Rust"], 18000.0);
        p3.seniority = Some("Senior".into());
        p3.remote = Some(true);
        // No salary: dropped before the matrix is computed.
        let unsalaried = Posting {
            seniority: Some("Expert".into()),
            ..Posting::default()
        };

        let ds = PostingDataset::new(vec![p1, p2, p3, unsalaried]);
        let matrix = correlation_matrix(&ds, &PlausibilityRange::default());

        assert_eq!(
            matrix.labels,
            vec![
                "salary_avg",
                "skills_count",
                "seniority_Junior",
                "seniority_Senior",
                "remote",
            ]
        );
        // Salary rises exactly with skill count here.
        assert!((matrix.get("salary_avg", "skills_count").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get("salary_avg", "salary_avg").unwrap() - 1.0).abs() < 1e-12);
        // Symmetry
        assert_eq!(
            matrix.get("salary_avg", "remote"),
            matrix.get("remote", "salary_avg")
        );
    }

    #[test]
    fn matrix_is_empty_without_salaried_rows() {
        let ds = PostingDataset::new(vec![Posting::default()]);
        let matrix = correlation_matrix(&ds, &PlausibilityRange::default());
        assert!(matrix.is_empty());
    }

    #[test]
    fn zero_variance_column_yields_nan() {
        let mut p1 = salaried_posting(&["Python"], 10000.0);
        p1.remote = Some(true);
        let mut p2 = salaried_posting(&["SQL"], 12000.0);
        p2.remote = Some(true);
        let ds = PostingDataset::new(vec![p1, p2]);
        let matrix = correlation_matrix(&ds, &PlausibilityRange::default());
        assert!(matrix.get("salary_avg", "remote").unwrap().is_nan());
    }
}

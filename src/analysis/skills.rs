//! Skill frequency, weighting, combination mining, and co-occurrence.

use std::collections::{BTreeMap, HashMap};

use crate::types::{Posting, PostingDataset, UNKNOWN_SENIORITY, UNSPECIFIED_CATEGORY};

/// At most this many selected skills are honored by [`cooccurring`].
pub const COOCCURRENCE_SELECTION_CAP: usize = 3;

/// Weight table for proficiency level labels.
///
/// Level labels are an open vocabulary: any label missing from the table gets
/// `default_weight` rather than being rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelWeights {
    weights: BTreeMap<String, f64>,
    pub default_weight: f64,
}

impl Default for LevelWeights {
    fn default() -> Self {
        let weights = [
            ("Junior", 1.0),
            ("Regular", 2.0),
            ("Senior", 3.0),
            ("Expert", 4.0),
        ]
        .into_iter()
        .map(|(label, w)| (label.to_string(), w))
        .collect();
        Self {
            weights,
            default_weight: 1.0,
        }
    }
}

impl LevelWeights {
    /// Build a custom weight table.
    pub fn new(weights: BTreeMap<String, f64>, default_weight: f64) -> Self {
        Self {
            weights,
            default_weight,
        }
    }

    /// Weight for a level label, falling back to the default weight.
    pub fn weight_for(&self, level: &str) -> f64 {
        self.weights.get(level).copied().unwrap_or(self.default_weight)
    }
}

/// Per-skill category profile produced by [`by_category`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCategoryProfile {
    /// Category with the highest occurrence count for this skill. Ties break
    /// alphabetically.
    pub main_category: String,
    /// Occurrence count within the main category.
    pub main_category_count: usize,
    /// Occurrences across all categories.
    pub total_count: usize,
    /// Full category -> count breakdown.
    pub all_categories: BTreeMap<String, usize>,
}

/// Count how many postings list each skill, regardless of level.
pub fn count_frequencies(dataset: &PostingDataset) -> BTreeMap<String, usize> {
    skill_counts(dataset.iter())
}

pub(crate) fn skill_counts<'a, I>(postings: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let mut counts = BTreeMap::new();
    for posting in postings {
        for skill in posting.skills.keys() {
            *counts.entry(skill.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Rank counts descending; ties break alphabetically (stable sort over the
/// already-sorted map).
pub(crate) fn rank_descending(counts: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Per-skill breakdown of level-label counts.
pub fn level_breakdown(dataset: &PostingDataset) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut breakdown: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for posting in dataset.iter() {
        for (skill, level) in &posting.skills {
            *breakdown
                .entry(skill.clone())
                .or_default()
                .entry(level.clone())
                .or_insert(0) += 1;
        }
    }
    breakdown
}

/// Skill counts grouped by posting seniority.
///
/// Postings without a seniority land in the [`UNKNOWN_SENIORITY`] bucket.
pub fn by_seniority(dataset: &PostingDataset) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut grouped: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for posting in dataset.iter() {
        if posting.skills.is_empty() {
            continue;
        }
        let seniority = posting.seniority.as_deref().unwrap_or(UNKNOWN_SENIORITY);
        let bucket = grouped.entry(seniority.to_string()).or_default();
        for skill in posting.skills.keys() {
            *bucket.entry(skill.clone()).or_insert(0) += 1;
        }
    }
    grouped
}

/// Level-weighted score per skill: (Σ weight × count) / (Σ count).
///
/// Skills with a zero total count are omitted.
pub fn weighted_scores(
    breakdown: &BTreeMap<String, BTreeMap<String, usize>>,
    weights: &LevelWeights,
) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    for (skill, levels) in breakdown {
        let mut total_weight = 0.0;
        let mut total_count = 0usize;
        for (level, count) in levels {
            total_weight += weights.weight_for(level) * *count as f64;
            total_count += count;
        }
        if total_count > 0 {
            scores.insert(skill.clone(), total_weight / total_count as f64);
        }
    }
    scores
}

/// Most frequent skill combinations, most frequent first.
///
/// For each posting the skill names are sorted alphabetically, and every
/// window of 2 to 4 consecutive names is counted as one combination. This is
/// a positional windowing heuristic, not a full subset enumeration: `{A, B,
/// C, D}` contributes (A,B), (A,B,C), (A,B,C,D), (B,C), (B,C,D), (C,D) and
/// nothing else. Ties break by first-encountered combination.
pub fn combinations(dataset: &PostingDataset, limit: usize) -> Vec<(Vec<String>, usize)> {
    // count + first-seen rank, so ties resolve deterministically
    let mut counters: HashMap<Vec<String>, (usize, usize)> = HashMap::new();
    for posting in dataset.iter() {
        let names: Vec<&String> = posting.skills.keys().collect();
        for i in 0..names.len() {
            let upper = (i + 4).min(names.len());
            for j in (i + 1)..upper {
                let combo: Vec<String> = names[i..=j].iter().map(|s| s.to_string()).collect();
                let rank = counters.len();
                let entry = counters.entry(combo).or_insert((0, rank));
                entry.0 += 1;
            }
        }
    }

    let mut ranked: Vec<(Vec<String>, usize, usize)> = counters
        .into_iter()
        .map(|(combo, (count, seen))| (combo, count, seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(combo, count, _)| (combo, count))
        .collect()
}

/// Skills that most frequently co-occur with the selected skills.
///
/// Among postings listing at least one selected skill (only the first
/// [`COOCCURRENCE_SELECTION_CAP`] selections are honored), counts every other
/// skill. Returns the top `limit` by count, ties broken by first encounter.
pub fn cooccurring(
    dataset: &PostingDataset,
    selected_skills: &[String],
    limit: usize,
) -> Vec<(String, usize)> {
    let selected: Vec<&String> = selected_skills.iter().take(COOCCURRENCE_SELECTION_CAP).collect();
    if selected.is_empty() {
        return Vec::new();
    }

    let mut counters: HashMap<String, (usize, usize)> = HashMap::new();
    for posting in dataset.iter() {
        let has_selected = selected.iter().any(|s| posting.skills.contains_key(*s));
        if !has_selected {
            continue;
        }
        for skill in posting.skills.keys() {
            if selected.iter().any(|s| *s == skill) {
                continue;
            }
            let rank = counters.len();
            let entry = counters.entry(skill.clone()).or_insert((0, rank));
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = counters
        .into_iter()
        .map(|(skill, (count, seen))| (skill, count, seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(skill, count, _)| (skill, count))
        .collect()
}

/// Per-skill category profile.
///
/// Postings without a category count under [`UNSPECIFIED_CATEGORY`].
pub fn by_category(dataset: &PostingDataset) -> BTreeMap<String, SkillCategoryProfile> {
    let mut per_skill: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for posting in dataset.iter() {
        let category = posting.category.as_deref().unwrap_or(UNSPECIFIED_CATEGORY);
        for skill in posting.skills.keys() {
            *per_skill
                .entry(skill.clone())
                .or_default()
                .entry(category.to_string())
                .or_insert(0) += 1;
        }
    }

    per_skill
        .into_iter()
        .map(|(skill, categories)| {
            // Strict greater-than keeps the alphabetically-first max.
            let (main_category, main_category_count) = categories
                .iter()
                .fold(("", 0usize), |best, (cat, count)| {
                    if *count > best.1 {
                        (cat.as_str(), *count)
                    } else {
                        best
                    }
                });
            let profile = SkillCategoryProfile {
                main_category: main_category.to_string(),
                main_category_count,
                total_count: categories.values().sum(),
                all_categories: categories.clone(),
            };
            (skill, profile)
        })
        .collect()
}

/// Top `top_n` skills per category, by frequency descending.
pub fn top_skills_by_category(
    dataset: &PostingDataset,
    top_n: usize,
) -> BTreeMap<String, Vec<(String, usize)>> {
    let mut per_category: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for posting in dataset.iter() {
        if posting.skills.is_empty() {
            continue;
        }
        let category = posting.category.as_deref().unwrap_or(UNSPECIFIED_CATEGORY);
        let bucket = per_category.entry(category.to_string()).or_default();
        for skill in posting.skills.keys() {
            *bucket.entry(skill.clone()).or_insert(0) += 1;
        }
    }

    per_category
        .into_iter()
        .map(|(category, counts)| {
            let mut ranked = rank_descending(counts);
            ranked.truncate(top_n);
            (category, ranked)
        })
        .collect()
}

//! Core data model types.
//!
//! The loading layer produces [`Posting`] records; analysis operates on an
//! immutable [`PostingDataset`] wrapping them. No analysis function mutates
//! the dataset: filtering and every aggregation return derived structures.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Bucket label used when a posting has no seniority value.
pub const UNKNOWN_SENIORITY: &str = "Unknown";

/// Bucket label used when a posting has no category value.
///
/// Polish for "unspecified"; kept verbatim because it is a data-facing label
/// that dashboards group and display under this exact name.
pub const UNSPECIFIED_CATEGORY: &str = "Nieokreślona";

/// One job-posting record.
///
/// Every field except `skills` is optional: postings are heterogeneous and an
/// absent field simply excludes the posting from the aggregations that need
/// it. `skills` maps skill name to a proficiency level label (e.g. `Junior`,
/// `Regular`, `Senior`, `Expert`, or any other string the source uses).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Posting {
    /// Unique identity key, used for deduplication (first occurrence wins).
    pub url: Option<String>,
    pub city: Option<String>,
    pub company: Option<String>,
    pub category: Option<String>,
    pub seniority: Option<String>,
    pub remote: Option<bool>,
    /// Skill name -> level label. A non-object JSON value degrades to an
    /// empty map instead of failing the record.
    #[serde(deserialize_with = "lenient_skills")]
    pub skills: BTreeMap<String, String>,
    /// Free-text salary, e.g. `"11 000 - 16 000 PLN"` or `"12000 zł"`.
    pub salary: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// Pre-parsed salary average. When present it takes precedence over
    /// parsing the `salary` text.
    pub salary_avg: Option<f64>,
    /// Publish date as provided by the source, day-first format expected.
    pub published_date: Option<String>,
}

/// Deserializes the skills mapping leniently.
///
/// Sources are inconsistent here: `skills` is sometimes a string, a list, or
/// `null`. Anything that is not a JSON object becomes an empty map, and level
/// values that are not strings are stringified (numbers/bools) or dropped.
fn lenient_skills<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let mut skills = BTreeMap::new();
    if let serde_json::Value::Object(map) = value {
        for (name, level) in map {
            let level = match level {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            skills.insert(name, level);
        }
    }
    Ok(skills)
}

/// A single scalar cell produced by column-style access.
///
/// Missing values are represented by `None` at the [`PostingDataset::column`]
/// level, never by a placeholder value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// UTF-8 string.
    Text(String),
    /// 64-bit float.
    Number(f64),
    /// Boolean.
    Flag(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKey {
    Url,
    City,
    Company,
    Category,
    Seniority,
    Remote,
    Salary,
    SalaryMin,
    SalaryMax,
    SalaryAvg,
    PublishedDate,
}

impl ColumnKey {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "url" => Some(Self::Url),
            "city" => Some(Self::City),
            "company" => Some(Self::Company),
            "category" => Some(Self::Category),
            "seniority" => Some(Self::Seniority),
            "remote" => Some(Self::Remote),
            "salary" => Some(Self::Salary),
            "salary_min" => Some(Self::SalaryMin),
            "salary_max" => Some(Self::SalaryMax),
            "salary_avg" => Some(Self::SalaryAvg),
            "published_date" => Some(Self::PublishedDate),
            _ => None,
        }
    }
}

impl Posting {
    fn field(&self, key: ColumnKey) -> Option<FieldValue> {
        let text = |v: &Option<String>| v.clone().map(FieldValue::Text);
        let number = |v: Option<f64>| v.map(FieldValue::Number);
        match key {
            ColumnKey::Url => text(&self.url),
            ColumnKey::City => text(&self.city),
            ColumnKey::Company => text(&self.company),
            ColumnKey::Category => text(&self.category),
            ColumnKey::Seniority => text(&self.seniority),
            ColumnKey::Remote => self.remote.map(FieldValue::Flag),
            ColumnKey::Salary => text(&self.salary),
            ColumnKey::SalaryMin => number(self.salary_min),
            ColumnKey::SalaryMax => number(self.salary_max),
            ColumnKey::SalaryAvg => number(self.salary_avg),
            ColumnKey::PublishedDate => text(&self.published_date),
        }
    }
}

/// AND-combined field constraints for [`PostingDataset::filter`].
///
/// Each constraint is independent; `None` or an empty list leaves the field
/// unconstrained. Within the `skills` list the semantics are OR: a posting
/// matches if it lists at least one of the selected skills. For every other
/// list the posting's value must be present and contained in the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingFilter {
    pub cities: Option<Vec<String>>,
    pub seniorities: Option<Vec<String>>,
    pub companies: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub remote: Option<Vec<bool>>,
    pub skills: Option<Vec<String>>,
}

impl PostingFilter {
    /// Returns `true` if `posting` satisfies every active constraint.
    pub fn matches(&self, posting: &Posting) -> bool {
        if !matches_text(&self.cities, &posting.city) {
            return false;
        }
        if !matches_text(&self.seniorities, &posting.seniority) {
            return false;
        }
        if !matches_text(&self.companies, &posting.company) {
            return false;
        }
        if !matches_text(&self.categories, &posting.category) {
            return false;
        }
        if let Some(allowed) = active(&self.remote) {
            match posting.remote {
                Some(flag) if allowed.contains(&flag) => {}
                _ => return false,
            }
        }
        if let Some(selected) = active(&self.skills) {
            if !selected.iter().any(|s| posting.skills.contains_key(s)) {
                return false;
            }
        }
        true
    }
}

fn active<T>(constraint: &Option<Vec<T>>) -> Option<&[T]> {
    match constraint {
        Some(values) if !values.is_empty() => Some(values.as_slice()),
        _ => None,
    }
}

fn matches_text(constraint: &Option<Vec<String>>, value: &Option<String>) -> bool {
    match active(constraint) {
        None => true,
        Some(allowed) => match value {
            Some(v) => allowed.iter().any(|a| a == v),
            None => false,
        },
    }
}

/// Immutable in-memory table of postings.
///
/// All analysis functions read from a dataset and return derived structures;
/// none mutate it. Filtering builds a new dataset from matching postings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostingDataset {
    postings: Vec<Posting>,
}

impl PostingDataset {
    /// Create a dataset from already-deduplicated postings.
    pub fn new(postings: Vec<Posting>) -> Self {
        Self { postings }
    }

    /// Number of postings in the dataset.
    pub fn size(&self) -> usize {
        self.postings.len()
    }

    /// Returns `true` if the dataset has no postings.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// All postings, in load order.
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Iterate over postings in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.postings.iter()
    }

    /// Create a new dataset containing only postings matching `filter`.
    pub fn filter(&self, filter: &PostingFilter) -> Self {
        self.filter_postings(|p| filter.matches(p))
    }

    /// Create a new dataset containing only postings for which `predicate`
    /// returns `true`.
    pub fn filter_postings<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Posting) -> bool,
    {
        let postings = self
            .postings
            .iter()
            .filter(|p| predicate(p))
            .cloned()
            .collect();
        Self { postings }
    }

    /// Column-style access: one cell per posting, in order, with missing
    /// values as `None`.
    ///
    /// Unknown column names yield an all-`None` sequence rather than failing,
    /// since postings are heterogeneous. The `skills` mapping is not a scalar
    /// column; it is reached through [`Posting::skills`] directly.
    pub fn column(&self, name: &str) -> impl Iterator<Item = Option<FieldValue>> + '_ {
        let key = ColumnKey::parse(name);
        self.postings
            .iter()
            .map(move |p| key.and_then(|k| p.field(k)))
    }

    /// Distinct cities, sorted. Used to populate UI filter options.
    pub fn cities(&self) -> Vec<String> {
        self.distinct(|p| p.city.as_deref())
    }

    /// Distinct seniority levels, sorted.
    pub fn seniorities(&self) -> Vec<String> {
        self.distinct(|p| p.seniority.as_deref())
    }

    /// Distinct companies, sorted.
    pub fn companies(&self) -> Vec<String> {
        self.distinct(|p| p.company.as_deref())
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.distinct(|p| p.category.as_deref())
    }

    /// Distinct skill names across all postings, sorted.
    pub fn skill_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for posting in &self.postings {
            for skill in posting.skills.keys() {
                names.insert(skill.clone());
            }
        }
        names.into_iter().collect()
    }

    fn distinct<'a, F>(&'a self, mut get: F) -> Vec<String>
    where
        F: FnMut(&'a Posting) -> Option<&'a str>,
    {
        let mut values = BTreeSet::new();
        for posting in &self.postings {
            if let Some(v) = get(posting) {
                if !v.is_empty() {
                    values.insert(v.to_string());
                }
            }
        }
        values.into_iter().collect()
    }
}

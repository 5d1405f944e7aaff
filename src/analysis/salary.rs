//! Salary parsing with plausibility filtering.
//!
//! Salaries arrive either as pre-parsed numeric fields or as free text like
//! `"11 000 - 16 000 PLN"` / `"12000 zł"`. [`parse_salary`] turns one posting
//! into structured [`SalaryBounds`], or `None` when there is no usable salary
//! data. Parsing is pure and deterministic per posting.

use crate::types::{Posting, PostingDataset};

/// Structured salary bounds for one posting.
///
/// `min`/`max` stay optional because pre-parsed postings may carry only
/// `salary_avg`; values derived from text always have all three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: f64,
}

/// Inclusive sanity bound on a text-derived salary average.
///
/// Averages outside the range are treated as data-entry errors or unit
/// mismatches: the posting counts as having no salary data, never a clamped
/// value. The default reads as a monthly-salary bound for the target unit.
/// The bound applies only to text-derived values; pre-supplied `salary_avg`
/// fields pass through unchecked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityRange {
    pub lower: f64,
    pub upper: f64,
}

impl Default for PlausibilityRange {
    fn default() -> Self {
        Self {
            lower: 4000.0,
            upper: 60000.0,
        }
    }
}

impl PlausibilityRange {
    /// Returns `true` if `avg` is within the inclusive bound.
    pub fn contains(&self, avg: f64) -> bool {
        self.lower <= avg && avg <= self.upper
    }
}

/// Parse one posting's salary data.
///
/// A pre-supplied `salary_avg` takes precedence and passes through with the
/// posting's `salary_min`/`salary_max` as-is (no re-derivation, no
/// plausibility check). Otherwise the free-text `salary` field is parsed via
/// [`parse_salary_text`]. `None` means "no salary data" and propagates as row
/// exclusion to all downstream statistics.
pub fn parse_salary(posting: &Posting, range: &PlausibilityRange) -> Option<SalaryBounds> {
    if let Some(avg) = posting.salary_avg {
        return Some(SalaryBounds {
            min: posting.salary_min,
            max: posting.salary_max,
            avg,
        });
    }
    parse_salary_text(posting.salary.as_deref()?, range)
}

/// Parse a free-text salary into bounds.
///
/// Currency markers (`PLN`, `zł`) and surrounding whitespace are stripped. A
/// single `-` splits a range into two numeric tokens (interior spaces and
/// thousands-separator commas removed); the average is their arithmetic mean.
/// Without a `-` the whole string is one numeric token and min = max = avg.
/// Any parse failure, or an average outside `range`, yields `None`.
pub fn parse_salary_text(text: &str, range: &PlausibilityRange) -> Option<SalaryBounds> {
    let cleaned = text.replace("PLN", "").replace("zł", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let bounds = if cleaned.contains('-') {
        let parts: Vec<&str> = cleaned.split('-').collect();
        if parts.len() != 2 {
            return None;
        }
        let min = parse_amount(parts[0])?;
        let max = parse_amount(parts[1])?;
        SalaryBounds {
            min: Some(min),
            max: Some(max),
            avg: (min + max) / 2.0,
        }
    } else {
        let value = parse_amount(cleaned)?;
        SalaryBounds {
            min: Some(value),
            max: Some(value),
            avg: value,
        }
    };

    range.contains(bounds.avg).then_some(bounds)
}

fn parse_amount(token: &str) -> Option<f64> {
    let compact: String = token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    compact.parse().ok()
}

/// Parsed salary average per posting, preserving dataset order.
///
/// One entry per posting; `None` marks postings without usable salary data.
pub fn salary_averages(dataset: &PostingDataset, range: &PlausibilityRange) -> Vec<Option<f64>> {
    dataset
        .iter()
        .map(|p| parse_salary(p, range).map(|b| b.avg))
        .collect()
}

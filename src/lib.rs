//! `posting-analytics` is a small library for computing the descriptive
//! statistics behind a job-market dashboard from in-memory job-posting
//! records.
//!
//! Postings are loaded from uploaded JSON documents into a
//! [`types::PostingDataset`]; every analysis function is a pure computation
//! over that immutable table and returns plain structured data (mappings,
//! ordered sequences, labeled matrices) for a UI layer to render. There is no
//! persistence, no rendering, and no shared mutable state.
//!
//! ## What it computes
//!
//! - **Salary parsing** ([`analysis::salary`]): free-text ranges like
//!   `"11 000 - 16 000 PLN"` into numeric bounds, with a configurable
//!   plausibility filter that discards (never clamps) implausible averages.
//! - **Skill aggregation** ([`analysis::skills`]): frequency counts,
//!   level-weighted scores, consecutive-window combination mining, and
//!   co-occurrence ranking.
//! - **Correlation** ([`analysis::correlation`]): salary statistics per
//!   skill, skill-presence vs. salary comparison, and a Pearson correlation
//!   matrix over salary / skill count / seniority / remote columns.
//! - **Rollups** ([`analysis::grouped`]): per-city and per-company stats,
//!   daily posting counts, and top-skill trend series.
//!
//! ## Quick example
//!
//! ```rust
//! use posting_analytics::analysis::salary::PlausibilityRange;
//! use posting_analytics::analysis::{grouped, skills};
//! use posting_analytics::ingest::{load_postings_from_str, LoadOptions};
//! use posting_analytics::types::{PostingDataset, PostingFilter};
//!
//! # fn main() -> Result<(), posting_analytics::LoadError> {
//! let input = r#"[
//!     {"url": "a", "city": "Warszawa", "skills": {"Python": "Senior"},
//!      "salary": "11 000 - 16 000 PLN"},
//!     {"url": "b", "city": "Warszawa", "skills": {"Python": "Junior", "SQL": "Regular"}}
//! ]"#;
//!
//! let postings = load_postings_from_str(input, &LoadOptions::default())?;
//! let ds = PostingDataset::new(postings);
//!
//! let freq = skills::count_frequencies(&ds);
//! assert_eq!(freq.get("Python"), Some(&2));
//!
//! let by_city = grouped::by_location(&ds, &PlausibilityRange::default());
//! assert_eq!(by_city.get("Warszawa").unwrap().total_jobs, 2);
//!
//! // Filtering returns a new dataset; the original is untouched.
//! let filtered = ds.filter(&PostingFilter {
//!     skills: Some(vec!["SQL".to_string()]),
//!     ..PostingFilter::default()
//! });
//! assert_eq!(filtered.size(), 1);
//! assert_eq!(ds.size(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: JSON loading, URL dedup, load observability
//! - [`types`]: posting record, dataset, filters, column access
//! - [`analysis`]: the aggregation core
//! - [`error`]: error types used by loading
//!
//! ## Error model
//!
//! Only loading returns [`LoadError`]. Analysis never errors: unparseable
//! salaries, missing fields, and under-sampled groups degrade to absent
//! values or empty results, which a UI renders as "no data".

pub mod analysis;
pub mod error;
pub mod ingest;
pub mod types;

pub use error::{LoadError, LoadResult};

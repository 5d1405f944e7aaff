//! The data-processing core.
//!
//! Every function here is a pure, synchronous computation over an immutable
//! [`crate::types::PostingDataset`]: no shared state, no I/O, and repeated
//! calls on the same dataset yield identical output. Failure modes degrade to
//! "no data" (absent options, empty mappings) rather than errors.
//!
//! - [`salary`]: free-text salary parsing with plausibility filtering
//! - [`skills`]: frequency counts, level weighting, combination mining,
//!   co-occurrence
//! - [`correlation`]: skill-presence vs. salary comparison and the numeric
//!   correlation matrix
//! - [`grouped`]: per-city / per-company / per-date rollups
//! - [`stats`]: shared numeric helpers (mean/median/stddev/Pearson)
//!
//! ## Example: from postings to a skill ranking
//!
//! ```rust
//! use posting_analytics::analysis::skills;
//! use posting_analytics::types::{Posting, PostingDataset};
//!
//! let ds = PostingDataset::new(vec![
//!     Posting {
//!         skills: [("Python".to_string(), "Senior".to_string())].into_iter().collect(),
//!         ..Posting::default()
//!     },
//!     Posting {
//!         skills: [("Python".to_string(), "Junior".to_string())].into_iter().collect(),
//!         ..Posting::default()
//!     },
//! ]);
//!
//! let freq = skills::count_frequencies(&ds);
//! assert_eq!(freq.get("Python"), Some(&2));
//! ```

pub mod correlation;
pub mod grouped;
pub mod salary;
pub mod skills;
pub mod stats;

pub use correlation::{CorrelationConfig, CorrelationMatrix, SkillSalaryCorrelation, SkillSalaryStats};
pub use grouped::{CompanyStats, LocationStats, SalarySummary, SkillTrends};
pub use salary::{PlausibilityRange, SalaryBounds};
pub use skills::{LevelWeights, SkillCategoryProfile};

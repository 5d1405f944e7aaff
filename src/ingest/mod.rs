//! Loading postings from uploaded JSON documents.
//!
//! [`load_postings_from_str`] / [`load_postings_from_path`] accept an array
//! of objects, a single object (treated as a one-element array), or NDJSON,
//! and deduplicate by URL (first occurrence wins). Records that fail to read
//! as postings are skipped, not fatal; an optional [`LoadObserver`] receives
//! success stats, per-record skips, and failures.

use std::fmt;
use std::sync::Arc;

pub mod json;
pub mod observability;

pub use json::{dedup_by_url, load_postings_from_path, load_postings_from_str};
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadStats, StdErrObserver,
};

/// Options controlling loading behavior.
///
/// Use [`Default`] for common cases: dedup on, no observer.
#[derive(Clone)]
pub struct LoadOptions {
    /// Drop postings whose URL was already seen in the batch.
    pub dedup: bool,
    /// Optional observer for logging/metrics.
    pub observer: Option<Arc<dyn LoadObserver>>,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("dedup", &self.dedup)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            dedup: true,
            observer: None,
        }
    }
}

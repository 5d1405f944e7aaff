//! JSON loading of posting records.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"url": "..."}, {"url": "..."}]`
//! - A single JSON object, treated as a one-element array
//! - Newline-delimited JSON (NDJSON): one object per line
//!
//! Individual records that fail to read as postings are skipped and reported
//! to the configured observer; only input that is not usable JSON at all
//! fails the whole load.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::Posting;

use super::observability::{LoadContext, LoadStats};
use super::LoadOptions;

/// Load postings from a JSON file.
pub fn load_postings_from_path(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> LoadResult<Vec<Posting>> {
    let path = path.as_ref();
    let ctx = LoadContext {
        source: path.display().to_string(),
    };
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            let err = LoadError::Io(e);
            if let Some(obs) = options.observer.as_ref() {
                obs.on_failure(&ctx, &err);
            }
            return Err(err);
        }
    };
    load_with_context(&text, options, &ctx)
}

/// Load postings from an in-memory JSON string.
pub fn load_postings_from_str(input: &str, options: &LoadOptions) -> LoadResult<Vec<Posting>> {
    let ctx = LoadContext {
        source: "<memory>".to_string(),
    };
    load_with_context(input, options, &ctx)
}

fn load_with_context(
    input: &str,
    options: &LoadOptions,
    ctx: &LoadContext,
) -> LoadResult<Vec<Posting>> {
    let result = parse_records(input);
    let records = match result {
        Ok(records) => records,
        Err(err) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_failure(ctx, &err);
            }
            return Err(err);
        }
    };

    let mut postings = Vec::with_capacity(records.len());
    let mut skipped = 0usize;
    for (idx0, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Posting>(record) {
            Ok(posting) => postings.push(posting),
            Err(e) => {
                skipped += 1;
                if let Some(obs) = options.observer.as_ref() {
                    let err = LoadError::Record {
                        record: idx0 + 1,
                        message: e.to_string(),
                    };
                    obs.on_skipped_record(ctx, &err);
                }
            }
        }
    }

    let before = postings.len();
    if options.dedup {
        postings = dedup_by_url(postings);
    }
    let duplicates = before - postings.len();

    if let Some(obs) = options.observer.as_ref() {
        obs.on_success(
            ctx,
            LoadStats {
                rows: postings.len(),
                skipped,
                duplicates,
            },
        );
    }
    Ok(postings)
}

fn parse_records(input: &str) -> LoadResult<Vec<serde_json::Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LoadError::Malformed {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return match v {
            serde_json::Value::Array(items) => Ok(items),
            serde_json::Value::Object(_) => Ok(vec![v]),
            _ => Err(LoadError::Malformed {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        };
    }

    // Fall back to NDJSON.
    let mut values = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| LoadError::Malformed {
            message: format!("invalid ndjson at line {}: {}", i + 1, e),
        })?;
        values.push(v);
    }
    Ok(values)
}

/// Drop postings whose URL was already seen; the first occurrence wins.
///
/// Postings without a URL cannot collide and are all kept.
pub fn dedup_by_url(postings: Vec<Posting>) -> Vec<Posting> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(postings.len());
    for posting in postings {
        match posting.url.as_deref() {
            Some(url) => {
                if seen.insert(url.to_string()) {
                    unique.push(posting);
                }
            }
            None => unique.push(posting),
        }
    }
    unique
}

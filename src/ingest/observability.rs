use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::LoadError;

/// Context about one load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Where the postings came from: a file path, or `"<memory>"` for
    /// string-based loading.
    pub source: String,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Postings that made it into the batch.
    pub rows: usize,
    /// Records skipped because they could not be read as postings.
    pub skipped: usize,
    /// Postings dropped as URL duplicates.
    pub duplicates: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when a load completes, with batch stats.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called for each record skipped during an otherwise successful load.
    fn on_skipped_record(&self, _ctx: &LoadContext, _error: &LoadError) {}

    /// Called when the whole load fails.
    fn on_failure(&self, _ctx: &LoadContext, _error: &LoadError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_skipped_record(&self, ctx: &LoadContext, error: &LoadError) {
        for o in &self.observers {
            o.on_skipped_record(ctx, error);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, error: &LoadError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!(
            "[load][ok] source={} rows={} skipped={} duplicates={}",
            ctx.source, stats.rows, stats.skipped, stats.duplicates
        );
    }

    fn on_skipped_record(&self, ctx: &LoadContext, error: &LoadError) {
        eprintln!("[load][skip] source={} err={}", ctx.source, error);
    }

    fn on_failure(&self, ctx: &LoadContext, error: &LoadError) {
        eprintln!("[load][fail] source={} err={}", ctx.source, error);
    }
}

/// Appends load events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append_line(&format!(
            "{} ok source={} rows={} skipped={} duplicates={}",
            unix_ts(),
            ctx.source,
            stats.rows,
            stats.skipped,
            stats.duplicates
        ));
    }

    fn on_skipped_record(&self, ctx: &LoadContext, error: &LoadError) {
        self.append_line(&format!("{} skip source={} err={}", unix_ts(), ctx.source, error));
    }

    fn on_failure(&self, ctx: &LoadContext, error: &LoadError) {
        self.append_line(&format!("{} fail source={} err={}", unix_ts(), ctx.source, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

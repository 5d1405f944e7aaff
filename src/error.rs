use thiserror::Error;

/// Convenience result type for posting-loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the loading layer.
///
/// Only loading can fail. The analysis functions never error: missing or
/// malformed per-posting data degrades to "no data" (absent options, empty
/// mappings) instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid JSON at all.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed as JSON but does not have a usable shape
    /// (not an object, an array of objects, or NDJSON).
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// A single record could not be read as a posting.
    ///
    /// This variant is reported to observers for skipped records; it never
    /// aborts a whole batch.
    #[error("record {record} could not be read: {message}")]
    Record { record: usize, message: String },
}

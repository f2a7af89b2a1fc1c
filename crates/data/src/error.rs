//! Error types for market data access.

/// Errors returned by a kline source.
///
/// The range fetcher treats every variant the same way: pagination stops and
/// the bars collected so far are returned.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The body was neither a kline array nor an error object.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The exchange answered with an error object.
    #[error("Upstream error {code}: {message}")]
    Upstream { code: i64, message: String },
    /// A kline row had an unparseable field.
    #[error("Malformed kline: {0}")]
    Malformed(String),
}

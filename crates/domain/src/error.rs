//! Domain error types.

/// Errors raised by domain constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A moving average window must hold at least one value.
    #[error("Moving average window must be greater than zero")]
    InvalidWindow,
    /// The interval string is not one of the supported timeframes.
    #[error("Unsupported interval: {0}")]
    UnsupportedInterval(String),
    /// A date could not be mapped to a UTC instant.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

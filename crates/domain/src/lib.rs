//! Domain model for BTC price history analysis.
//!
//! This crate holds the exchange-agnostic types and pure computations:
//! - Price bars (klines) and the derived price series
//! - Sampling intervals and calendar fetch windows
//! - Simple moving average indicators
//! - The series transformer that augments bars with MA-20 and MA-50

/// Prelude module for convenient imports.
pub mod prelude;

/// Entity types.
pub mod entities;
/// Enumerations.
pub mod enums;
/// Error types.
pub mod error;
/// Technical indicators.
pub mod indicators;
/// Series transformation.
pub mod series;
/// Value objects.
pub mod value_objects;

pub use error::DomainError;
pub use series::{SeriesSummary, Trend, transform};

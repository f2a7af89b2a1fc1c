//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use btc_ma_domain::prelude::*;
//! ```

// Entities
pub use crate::entities::{Bar, DerivedRow, SeriesPoint};

// Enums
pub use crate::enums::Interval;

// Errors
pub use crate::error::DomainError;

// Indicators
pub use crate::indicators::{MA_LONG_WINDOW, MA_SHORT_WINDOW, SimpleMovingAverage};

// Series
pub use crate::series::{SeriesSummary, Trend, transform};

// Value objects
pub use crate::value_objects::{FetchWindow, Price};

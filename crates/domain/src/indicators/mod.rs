//! Trailing-window price indicators.

mod sma;

pub use sma::SimpleMovingAverage;

/// Window of the short moving average.
pub const MA_SHORT_WINDOW: usize = 20;
/// Window of the long moving average.
pub const MA_LONG_WINDOW: usize = 50;

pub mod bar;
pub mod series;

// Re-export for easier access
pub use bar::Bar;
pub use series::{DerivedRow, SeriesPoint};

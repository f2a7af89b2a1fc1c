use crate::error::DomainError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval of the requested price bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Daily,
    FourHour,
}

impl Interval {
    /// Interval code understood by the klines endpoint.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::FourHour => "4h",
        }
    }

    /// Human readable timeframe label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::FourHour => "4 Hour",
        }
    }

    /// Nominal length of one bar.
    pub fn duration(&self) -> Duration {
        match self {
            Self::Daily => Duration::days(1),
            Self::FourHour => Duration::hours(4),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "1d" | "day" => Ok(Self::Daily),
            "4h" | "4hour" | "4-hour" | "four-hour" => Ok(Self::FourHour),
            other => Err(DomainError::UnsupportedInterval(other.to_string())),
        }
    }
}

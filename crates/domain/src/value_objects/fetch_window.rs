use crate::error::DomainError;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Calendar date window for a history request, inclusive on both ends.
///
/// The window is not validated: an inverted window (`start > end`) simply
/// produces an empty millisecond range. Rejecting it is left to the caller
/// that collects the dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window covering the `days` days before `end`, plus `end` itself.
    ///
    /// # Errors
    /// Returns an error if the start date underflows the calendar.
    pub fn trailing_days(end: NaiveDate, days: i64) -> Result<Self, DomainError> {
        let start = end
            .checked_sub_signed(Duration::days(days))
            .ok_or_else(|| DomainError::DateOutOfRange(format!("{end} - {days} days")))?;
        Ok(Self::new(start, end))
    }

    /// Midnight UTC of the start date, in epoch milliseconds.
    pub fn start_ms(&self) -> i64 {
        self.start.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
    }

    /// Last millisecond of the end date (UTC), in epoch milliseconds.
    pub fn end_ms(&self) -> i64 {
        self.end.and_time(NaiveTime::MIN).and_utc().timestamp_millis() + DAY_MS - 1
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Checks whether an epoch millisecond instant falls inside the window.
    pub fn contains_ms(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.start_ms() && timestamp_ms <= self.end_ms()
    }
}

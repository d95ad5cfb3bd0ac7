//! Strong types for the token record system.
//!
//! - `Symbol` - upper-cased trading symbol, the natural key of a record
//! - `Day` - local calendar-day bucket used for freshness versioning

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Symbol
// =============================================================================

/// Upper-cased trading symbol.
///
/// Symbols are always upper-cased before storage or comparison; the
/// constructor enforces this so a lower-case symbol can never leak into
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Day
// =============================================================================

/// Local calendar-day bucket for record versioning.
///
/// Record timestamps are stored in UTC, but freshness is judged against the
/// local midnight boundary, so the bucket of a timestamp is its local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Day(pub NaiveDate);

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a Day from year, month, day components.
    /// Returns None if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The day bucket a UTC timestamp falls into, local midnight boundary.
    pub fn of(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp.with_timezone(&Local).date_naive())
    }

    /// Today's local calendar day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Returns the underlying NaiveDate.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<Day> for NaiveDate {
    fn from(day: Day) -> Self {
        day.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_symbol_uppercases_and_trims() {
        assert_eq!(Symbol::new(" btc ").as_str(), "BTC");
        assert_eq!(Symbol::new("Eth").as_str(), "ETH");
        assert_eq!(Symbol::new("LINK").as_str(), "LINK");
    }

    #[test]
    fn test_symbol_equality_after_normalization() {
        assert_eq!(Symbol::new("btc"), Symbol::new("BTC"));
    }

    #[test]
    fn test_day_of_now_is_today() {
        assert_eq!(Day::of(Utc::now()), Day::today());
    }

    #[test]
    fn test_day_bucket_changes_across_days() {
        let yesterday = Utc::now() - Duration::days(1);
        assert_ne!(Day::of(yesterday), Day::today());
    }

    #[test]
    fn test_day_display() {
        let day = Day::from_ymd(2026, 8, 29).unwrap();
        assert_eq!(day.to_string(), "2026-08-29");
    }
}

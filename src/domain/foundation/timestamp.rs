//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days. Returns `None` when the result falls
    /// outside the representable date range.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    ///
    /// Returns `None` when the result falls outside the representable range.
    pub fn minus_days(&self, days: i64) -> Option<Self> {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_sub_signed(delta))
            .map(Self)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn fixed() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap())
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamps_order_chronologically() {
        let earlier = fixed();
        let later = earlier.add_days(1).unwrap();

        assert!(earlier < later);
    }

    #[test]
    fn duration_since_counts_whole_days() {
        let start = fixed();
        let end = start.add_days(45).unwrap();
        assert_eq!(end.duration_since(&start).num_days(), 45);
        assert_eq!(start.duration_since(&end).num_days(), -45);
    }

    #[test]
    fn minus_days_moves_backwards() {
        let ts = fixed().minus_days(15).unwrap();
        assert_eq!(ts.as_datetime().month(), 2);
        assert_eq!(ts.as_datetime().day(), 28);
    }

    #[test]
    fn day_arithmetic_outside_the_calendar_is_none() {
        assert!(fixed().minus_days(i64::from(u32::MAX)).is_none());
        assert!(fixed().add_days(i64::MAX).is_none());
        assert!(fixed().minus_days(i64::MIN).is_none());
    }

    #[test]
    fn timestamp_roundtrips_through_json() {
        let ts = fixed();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2026-03-15"));

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}

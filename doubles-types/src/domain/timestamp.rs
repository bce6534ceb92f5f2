//! Record timestamps.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// ISO-8601 UTC instant at second precision with a `Z` suffix
/// (`2024-05-01T12:30:00Z`).
///
/// Stored as text: the fixed-width format sorts lexicographically in time
/// order, which is what the `since`/`from`/`to` filters compare against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Current wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if this instant is at or after `bound` (text comparison).
    pub fn is_at_or_after(&self, bound: &str) -> bool {
        self.0.as_str() >= bound
    }

    /// `true` if this instant is at or before `bound` (text comparison).
    pub fn is_at_or_before(&self, bound: &str) -> bool {
        self.0.as_str() <= bound
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_is_second_precision_with_z() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(Timestamp::from_datetime(at).as_str(), "2024-05-01T12:30:05Z");
    }

    #[test]
    fn test_sub_second_part_is_dropped() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap()
            + chrono::Duration::milliseconds(750);
        assert_eq!(Timestamp::from_datetime(at).as_str(), "2024-05-01T12:30:05Z");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let ts = Timestamp("2024-05-01T12:30:05Z".into());
        assert!(ts.is_at_or_after("2024-05-01T12:30:05Z"));
        assert!(ts.is_at_or_before("2024-05-01T12:30:05Z"));
        assert!(ts.is_at_or_after("2024-05-01"));
        assert!(!ts.is_at_or_before("2024-05-01T12:30:04Z"));
    }

    #[test]
    fn test_now_has_expected_shape() {
        let now = Timestamp::now();
        assert_eq!(now.as_str().len(), 20);
        assert!(now.as_str().ends_with('Z'));
    }
}

//! Cache key for per-day logger instances

use std::fmt;

use chrono::{Days, NaiveDate};

use super::severity::Severity;

/// Entries older than this many days are pruned when their successor is built
pub const EVICTION_AGE_DAYS: u64 = 2;

/// Format of the day stamp used in keys and file names
pub const DAY_STAMP_FORMAT: &str = "%Y%m%d";

/// Identifies one cached logger: a channel name plus a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoggerKey {
    logger_name: &'static str,
    day: NaiveDate,
}

impl LoggerKey {
    /// Key for `severity` on `day`
    pub fn for_severity(severity: Severity, day: NaiveDate) -> Self {
        Self {
            logger_name: severity.logger_name(),
            day,
        }
    }

    /// Key of the entry that a fresh construction for `severity` on `today` prunes
    pub fn stale(severity: Severity, today: NaiveDate) -> Option<Self> {
        today
            .checked_sub_days(Days::new(EVICTION_AGE_DAYS))
            .map(|day| Self::for_severity(severity, day))
    }

    pub fn logger_name(&self) -> &'static str {
        self.logger_name
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Day rendered as `YYYYMMDD`
    pub fn stamp(&self) -> String {
        self.day.format(DAY_STAMP_FORMAT).to_string()
    }
}

impl fmt::Display for LoggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.logger_name, self.stamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_key_display() {
        let key = LoggerKey::for_severity(Severity::Info, day(2026, 3, 7));
        assert_eq!(key.to_string(), "info20260307");
        assert_eq!(key.stamp(), "20260307");
    }

    #[test]
    fn test_stale_key_crosses_month() {
        let stale = LoggerKey::stale(Severity::Error, day(2026, 3, 1)).unwrap();
        assert_eq!(stale.day(), day(2026, 2, 27));
        assert_eq!(stale.logger_name(), "error");
    }

    #[test]
    fn test_warning_spellings_share_key() {
        let today = day(2026, 1, 1);
        let a = LoggerKey::for_severity("warn".parse().unwrap(), today);
        let b = LoggerKey::for_severity("warning".parse().unwrap(), today);
        assert_eq!(a, b);
    }

    #[test]
    fn test_stale_key_underflow() {
        assert!(LoggerKey::stale(Severity::Info, NaiveDate::MIN).is_none());
    }
}

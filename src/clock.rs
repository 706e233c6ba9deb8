//! Wall-clock source for day keys and record timestamps
//!
//! The registry never calls `Local::now()` directly so that day rollover can
//! be driven by hand.

use std::sync::Mutex;

use chrono::{Days, Local, NaiveDate, NaiveDateTime};

/// Source of local wall-clock time
pub trait Clock: Send + Sync {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar day
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system's local time zone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Create a clock frozen at `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Create a clock frozen at midday on `day`
    pub fn at_day(day: NaiveDate) -> Self {
        Self::new(day.and_hms_opt(12, 0, 0).unwrap_or_default())
    }

    /// Jump to an arbitrary instant
    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    /// Move forward by whole calendar days
    pub fn advance_days(&self, days: u64) {
        if let Ok(mut guard) = self.now.lock() {
            if let Some(next) = guard.checked_add_days(Days::new(days)) {
                *guard = next;
            }
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let day = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        let clock = ManualClock::at_day(day);
        assert_eq!(clock.today(), day);

        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::at_day(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let later = NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_system_clock_today_matches_now() {
        let clock = SystemClock;
        let now = clock.now();
        // Tolerate a midnight crossing between the two reads
        let today = clock.today();
        assert!(today == now.date() || today == now.date().succ_opt().unwrap());
    }
}

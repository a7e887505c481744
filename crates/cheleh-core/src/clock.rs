//! Calendar adapter: wall-clock instants to whole-day counts.
//!
//! This is the only place wall-clock time enters the engine. Day counts
//! are taken between calendar dates in the selected [`Calendar`], so a
//! daylight-saving shift never turns a full day into 23 hours.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Which day boundary "midnight" refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Calendar {
    /// The system's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl Calendar {
    /// Calendar whose days start at UTC midnight.
    pub fn utc() -> Self {
        Calendar::Fixed(Utc.fix())
    }

    /// Calendar with a fixed offset in minutes east of UTC.
    ///
    /// Returns `None` when the offset is outside +/- 24 hours.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Calendar::Fixed)
    }

    /// The calendar date an instant falls on.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Calendar::Local => instant.with_timezone(&chrono::Local).date_naive(),
            Calendar::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// Whole calendar days from the midnight of `start` to the midnight of `now`.
    ///
    /// Negative when `start` lies on a later date than `now`.
    pub fn days_since(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (self.date_of(now) - self.date_of(start)).num_days()
    }
}

/// Whole local calendar days between `start` and `now`.
pub fn days_since(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    Calendar::Local.days_since(start, now)
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a chosen instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Move the clock forward by whole days.
    pub fn advance_days(&mut self, days: i64) {
        self.0 += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn same_day_is_zero() {
        let cal = Calendar::utc();
        assert_eq!(cal.days_since(at(2024, 3, 1, 0, 5), at(2024, 3, 1, 23, 55)), 0);
    }

    #[test]
    fn counts_midnights_not_elapsed_hours() {
        let cal = Calendar::utc();
        // Ten minutes apart but across midnight.
        assert_eq!(cal.days_since(at(2024, 3, 1, 23, 55), at(2024, 3, 2, 0, 5)), 1);
        // Almost 48 hours apart is still a single boundary pair.
        assert_eq!(cal.days_since(at(2024, 3, 1, 0, 1), at(2024, 3, 2, 23, 59)), 1);
    }

    #[test]
    fn future_start_is_negative() {
        let cal = Calendar::utc();
        assert_eq!(cal.days_since(at(2024, 3, 5, 12, 0), at(2024, 3, 1, 12, 0)), -4);
    }

    #[test]
    fn fixed_offset_moves_the_day_boundary() {
        // 22:30 UTC is already the next day at UTC+03:30.
        let tehran = Calendar::from_offset_minutes(210).unwrap();
        let start = at(2024, 3, 1, 12, 0);
        let now = at(2024, 3, 1, 22, 30);
        assert_eq!(Calendar::utc().days_since(start, now), 0);
        assert_eq!(tehran.days_since(start, now), 1);
    }

    #[test]
    fn offset_out_of_range_is_rejected() {
        assert!(Calendar::from_offset_minutes(24 * 60).is_none());
        assert!(Calendar::from_offset_minutes(-330).is_some());
    }

    #[test]
    fn fixed_clock_advances_by_days() {
        let mut clock = FixedClock(at(2024, 1, 31, 9, 0));
        clock.advance_days(1);
        assert_eq!(clock.now(), at(2024, 2, 1, 9, 0));
    }
}

//! Calendar Interval Module
//!
//! Structured time-to-live values and their calendar-aware resolution into
//! whole seconds.

use chrono::{DateTime, Days, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

// == Public Constants ==
/// Seconds-per-day multiplier applied to diff-derived day counts
pub const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

// == Ttl ==
/// A time-to-live given either as raw seconds or as a calendar interval.
///
/// Both forms resolve to the same instant for the same effective length when
/// applied from the same starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ttl {
    /// Plain number of seconds from now
    Seconds(i64),
    /// Structured interval resolved against the instant it is applied to
    Interval(CalendarInterval),
}

impl Ttl {
    // == To Seconds ==
    /// Resolves the TTL to a whole number of seconds measured from `now`.
    pub fn to_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self {
            Ttl::Seconds(seconds) => *seconds,
            Ttl::Interval(interval) => interval.to_seconds(now),
        }
    }
}

impl From<i64> for Ttl {
    fn from(seconds: i64) -> Self {
        Ttl::Seconds(seconds)
    }
}

impl From<CalendarInterval> for Ttl {
    fn from(interval: CalendarInterval) -> Self {
        Ttl::Interval(interval)
    }
}

// == Calendar Interval ==
/// A duration expressed in calendar components.
///
/// Months and years have no fixed seconds length, so an interval is only
/// meaningful relative to the instant it is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInterval {
    /// Whole calendar years
    pub years: u32,
    /// Whole calendar months
    pub months: u32,
    /// Whole days
    pub days: u64,
    /// Hours component
    pub hours: i64,
    /// Minutes component
    pub minutes: i64,
    /// Seconds component
    pub seconds: i64,
}

impl CalendarInterval {
    // == Constructors ==
    /// Creates an interval of whole days.
    pub fn days(days: u64) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    /// Creates an interval of whole calendar months.
    pub fn months(months: u32) -> Self {
        Self {
            months,
            ..Self::default()
        }
    }

    /// Creates an interval of whole calendar years.
    pub fn years(years: u32) -> Self {
        Self {
            years,
            ..Self::default()
        }
    }

    // == Component Chaining ==
    /// Adds an hours component to the interval.
    pub fn and_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    /// Adds a minutes component to the interval.
    pub fn and_minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    /// Adds a seconds component to the interval.
    pub fn and_seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    // == Add To ==
    /// Applies the interval to `instant`.
    ///
    /// Month and year arithmetic is calendar-aware and clamps at month ends
    /// (Jan 31 + 1 month = Feb 28/29); the remaining components are fixed
    /// offsets.
    pub fn add_to(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let total_months = self.years * 12 + self.months;

        let mut later = instant;
        if total_months > 0 {
            later = later
                .checked_add_months(Months::new(total_months))
                .unwrap_or(later);
        }
        if self.days > 0 {
            later = later.checked_add_days(Days::new(self.days)).unwrap_or(later);
        }

        later
            + Duration::hours(self.hours)
            + Duration::minutes(self.minutes)
            + Duration::seconds(self.seconds)
    }

    // == To Seconds ==
    /// Resolves the interval to whole seconds measured from `now`.
    ///
    /// The day count is always derived by diffing `now` against
    /// `now + interval`; the fixed constant is only the seconds-per-day
    /// multiplier, never an independent day-length assumption.
    pub fn to_seconds(&self, now: DateTime<Utc>) -> i64 {
        let diff = self.add_to(now) - now;
        let days = diff.num_days();

        days * SECONDS_PER_DAY + (diff - Duration::days(days)).num_seconds()
    }
}

//! Duration value object.
//!
//! A [`Duration`] is a non-negative span of whole hours plus minutes, with the
//! minutes always kept in `[0, 60)`.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError, ValidationResult};

const MINUTES_PER_HOUR: i64 = 60;

/// A non-negative span of time expressed as hours and minutes.
///
/// # Example
///
/// ```
/// use pay_tracker::models::Duration;
///
/// let duration = Duration::new(0, 125).unwrap();
/// assert_eq!(duration.hours(), 2);
/// assert_eq!(duration.minutes(), 5);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "DurationRecord")]
pub struct Duration {
    hours: u32,
    minutes: u32,
}

/// Plain-data shape of a duration as it is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRecord {
    /// Whole hours; absent means zero.
    #[serde(default)]
    pub hours: i64,
    /// Minutes, possibly 60 or more; absent means zero.
    #[serde(default)]
    pub minutes: i64,
}

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Duration = Duration {
        hours: 0,
        minutes: 0,
    };

    /// Creates a duration from hours and minutes, rolling minutes of 60 or
    /// more into hours.
    ///
    /// Fails with a [`ValidationError`] naming `hours` or `minutes` when either
    /// is negative.
    pub fn new(hours: i64, minutes: i64) -> ValidationResult<Self> {
        if hours < 0 {
            return Err(ValidationError::new(Field::Hours, "hours cannot be negative"));
        }
        if minutes < 0 {
            return Err(ValidationError::new(
                Field::Minutes,
                "minutes cannot be negative",
            ));
        }
        let total = hours
            .checked_mul(MINUTES_PER_HOUR)
            .and_then(|h| h.checked_add(minutes))
            .ok_or_else(|| ValidationError::new(Field::Hours, "duration is too large"))?;
        Self::from_minutes(total)
    }

    /// Creates a duration from a total number of minutes.
    pub fn from_minutes(total_minutes: i64) -> ValidationResult<Self> {
        if total_minutes < 0 {
            return Err(ValidationError::new(
                Field::Minutes,
                "minutes cannot be negative",
            ));
        }
        let hours = u32::try_from(total_minutes / MINUTES_PER_HOUR)
            .map_err(|_| ValidationError::new(Field::Hours, "duration is too large"))?;
        Ok(Self {
            hours,
            minutes: (total_minutes % MINUTES_PER_HOUR) as u32,
        })
    }

    /// Creates the duration between two instants, truncated to whole minutes.
    ///
    /// # Example
    ///
    /// ```
    /// use pay_tracker::models::Duration;
    /// use chrono::NaiveDateTime;
    ///
    /// let from = NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let to = NaiveDateTime::parse_from_str("2024-01-01 11:45:59", "%Y-%m-%d %H:%M:%S").unwrap();
    /// assert_eq!(Duration::between(from, to).unwrap(), Duration::new(2, 45).unwrap());
    /// assert!(Duration::between(to, from).is_err());
    /// ```
    pub fn between(from: NaiveDateTime, to: NaiveDateTime) -> ValidationResult<Self> {
        if to < from {
            return Err(ValidationError::new(
                Field::To,
                "end date cannot be before the start date",
            ));
        }
        Self::from_minutes((to - from).num_minutes())
    }

    /// Builds a duration from a minute count, treating negatives as zero and
    /// saturating at the largest representable duration.
    pub(crate) fn clamped(total_minutes: i64) -> Self {
        let total = total_minutes.max(0);
        let hours = (total / MINUTES_PER_HOUR).min(i64::from(u32::MAX)) as u32;
        Self {
            hours,
            minutes: (total % MINUTES_PER_HOUR) as u32,
        }
    }

    /// Returns the whole hours.
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Returns the minutes, always below 60.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the whole duration in minutes.
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.hours) * MINUTES_PER_HOUR + i64::from(self.minutes)
    }

    /// Returns the duration as fractional hours (`hours + minutes / 60`).
    pub fn as_hours_f64(&self) -> f64 {
        f64::from(self.hours) + f64::from(self.minutes) / 60.0
    }

    /// Returns true for the zero-length duration.
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }

    /// Returns the plain-data form of this duration.
    pub fn to_record(&self) -> DurationRecord {
        DurationRecord {
            hours: i64::from(self.hours),
            minutes: i64::from(self.minutes),
        }
    }
}

impl TryFrom<DurationRecord> for Duration {
    type Error = ValidationError;

    fn try_from(record: DurationRecord) -> ValidationResult<Self> {
        Duration::new(record.hours, record.minutes)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration::clamped(self.total_minutes() + other.total_minutes())
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Duration>>(iter: I) -> Duration {
        iter.copied().sum()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

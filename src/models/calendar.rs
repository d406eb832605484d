//! Calendar view-models: days, weeks and their summaries.
//!
//! A month is laid out as full weeks starting on a configurable weekday, so
//! the first and last week may contain days from the neighbouring months.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError, ValidationResult};

use super::Duration;

/// One calendar day as a half-open instant range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Midnight at the start of the day.
    pub day_start_time: NaiveDateTime,
    /// Midnight at the start of the following day.
    pub day_end_time: NaiveDateTime,
    /// The day belongs to the month before the one being displayed.
    pub prev_month: bool,
    /// The day belongs to the month after the one being displayed.
    pub next_month: bool,
}

impl Day {
    /// Returns the day covering `date`, with both month flags cleared.
    ///
    /// # Example
    ///
    /// ```
    /// use pay_tracker::models::Day;
    /// use chrono::NaiveDate;
    ///
    /// let day = Day::for_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    /// assert_eq!(day.day_end_time.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    /// ```
    pub fn for_date(date: NaiveDate) -> Self {
        let next = date.succ_opt().unwrap_or(NaiveDate::MAX);
        Self {
            day_start_time: date.and_time(NaiveTime::MIN),
            day_end_time: next.and_time(NaiveTime::MIN),
            prev_month: false,
            next_month: false,
        }
    }

    /// Returns the calendar date of this day.
    pub fn date(&self) -> NaiveDate {
        self.day_start_time.date()
    }
}

/// Aggregate income and billable time over some set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Income in the pay currency.
    pub income: f64,
    /// Billable time.
    pub total_hours: Duration,
}

/// An ordered run of days together with their combined summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    /// The days of the week in order.
    pub days: Vec<Day>,
    /// Income and billable time across all days.
    pub summaries: Summary,
}

/// Lays out `month` of `year` as full weeks starting on `week_start`.
///
/// Days before the first of the month carry `prev_month`, days after the last
/// carry `next_month`.
///
/// # Example
///
/// ```
/// use pay_tracker::models::month_grid;
/// use chrono::Weekday;
///
/// // February 2024 starts on a Thursday and ends on a Thursday.
/// let weeks = month_grid(2024, 2, Weekday::Mon).unwrap();
/// assert_eq!(weeks.len(), 5);
/// assert!(weeks[0][0].prev_month);
/// assert!(weeks[4][6].next_month);
/// ```
pub fn month_grid(year: i32, month: u32, week_start: Weekday) -> ValidationResult<Vec<Vec<Day>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::new(Field::Month, format!("{}-{} is not a valid month", year, month))
    })?;
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| ValidationError::new(Field::Month, "month is out of range"))?;

    let mut weeks = Vec::new();
    let mut cursor = start_of_week(first, week_start)?;
    while cursor <= last {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            let mut day = Day::for_date(cursor);
            day.prev_month = cursor < first;
            day.next_month = cursor > last;
            week.push(day);
            cursor = cursor
                .succ_opt()
                .ok_or_else(|| ValidationError::new(Field::Month, "month is out of range"))?;
        }
        weeks.push(week);
    }
    Ok(weeks)
}

/// Returns the seven days of the week containing `date`.
pub fn week_containing(date: NaiveDate, week_start: Weekday) -> ValidationResult<Vec<Day>> {
    let start = start_of_week(date, week_start)?;
    Ok(start.iter_days().take(7).map(Day::for_date).collect())
}

fn start_of_week(date: NaiveDate, week_start: Weekday) -> ValidationResult<NaiveDate> {
    let offset = (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| ValidationError::new(Field::Window, "date is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_day_spans_midnight_to_midnight() {
        let day = Day::for_date(make_date("2024-03-10"));
        assert_eq!(day.day_start_time, make_date("2024-03-10").and_time(NaiveTime::MIN));
        assert_eq!(day.day_end_time, make_date("2024-03-11").and_time(NaiveTime::MIN));
        assert!(!day.prev_month && !day.next_month);
        assert_eq!(day.date(), make_date("2024-03-10"));
    }

    /// CA-001: January 2024 starting Monday
    #[test]
    fn test_month_grid_january_2024_monday() {
        // 2024-01-01 is a Monday, 2024-01-31 a Wednesday
        let weeks = month_grid(2024, 1, Weekday::Mon).unwrap();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0].date(), make_date("2024-01-01"));
        assert!(!weeks[0][0].prev_month);
        assert_eq!(weeks[4][2].date(), make_date("2024-01-31"));
        assert!(weeks[4][3].next_month);
        assert_eq!(weeks[4][6].date(), make_date("2024-02-04"));
    }

    /// CA-002: January 2024 starting Sunday
    #[test]
    fn test_month_grid_january_2024_sunday() {
        let weeks = month_grid(2024, 1, Weekday::Sun).unwrap();
        assert_eq!(weeks[0][0].date(), make_date("2023-12-31"));
        assert!(weeks[0][0].prev_month);
        assert!(!weeks[0][1].prev_month);
        assert_eq!(weeks.len(), 5);
    }

    #[test]
    fn test_month_grid_every_week_has_seven_days() {
        for month in 1..=12 {
            let weeks = month_grid(2025, month, Weekday::Mon).unwrap();
            assert!(weeks.iter().all(|w| w.len() == 7));
            assert!(weeks.len() >= 4 && weeks.len() <= 6);
        }
    }

    #[test]
    fn test_month_grid_december_rolls_into_next_year() {
        let weeks = month_grid(2024, 12, Weekday::Mon).unwrap();
        let last = weeks.last().unwrap().last().unwrap();
        assert_eq!(last.date(), make_date("2025-01-05"));
        assert!(last.next_month);
    }

    #[test]
    fn test_month_grid_invalid_month() {
        let error = month_grid(2024, 13, Weekday::Mon).unwrap_err();
        assert_eq!(error.field, Field::Month);
    }

    #[test]
    fn test_week_containing() {
        // 2024-01-04 is a Thursday
        let days = week_containing(make_date("2024-01-04"), Weekday::Mon).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date(), make_date("2024-01-01"));
        assert_eq!(days[6].date(), make_date("2024-01-07"));
    }

    #[test]
    fn test_week_serialization_shape() {
        let week = Week {
            days: vec![Day::for_date(make_date("2024-01-01"))],
            summaries: Summary {
                income: 12.5,
                total_hours: Duration::new(1, 0).unwrap(),
            },
        };
        let json = serde_json::to_string(&week).unwrap();
        assert!(json.contains("\"dayStartTime\":\"2024-01-01T00:00:00\""));
        assert!(json.contains("\"prevMonth\":false"));
        assert!(json.contains("\"totalHours\":{\"hours\":1,\"minutes\":0}"));
    }
}

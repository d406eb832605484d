//! Summing durations and summarizing entries over days and weeks.

use chrono::{NaiveDateTime, Weekday};
use tracing::debug;

use crate::error::{Field, ValidationError, ValidationResult};
use crate::models::{Day, Duration, Entry, NegativeBillable, Summary, Week, month_grid};

use super::billable::{BillableLine, entry_billable_time};
use super::filter::get_entries;

/// Sums durations by total minutes. An empty input gives zero.
///
/// # Example
///
/// ```
/// use pay_tracker::calculation::sum_durations;
/// use pay_tracker::models::Duration;
///
/// let total = sum_durations(&[Duration::new(1, 45).unwrap(), Duration::new(0, 30).unwrap()]);
/// assert_eq!(total, Duration::new(2, 15).unwrap());
/// ```
pub fn sum_durations(durations: &[Duration]) -> Duration {
    durations.iter().sum()
}

/// Returns one billable line per entry overlapping `[from, to)`.
pub fn window_lines(
    entries: &[Entry],
    from: NaiveDateTime,
    to: NaiveDateTime,
    policy: NegativeBillable,
) -> ValidationResult<Vec<BillableLine>> {
    validate_window(from, to)?;
    Ok(get_entries(entries, from, to)
        .into_iter()
        .map(|entry| entry_billable_time(entry, from, to, policy))
        .collect())
}

/// Sums income and billable time of every entry inside `[from, to)`.
///
/// Each entry is clipped to the window first. `total_hours` is a
/// [`Duration`] and so never drops below zero, even when negative billable
/// time is allowed.
pub fn summarize_window(
    entries: &[Entry],
    from: NaiveDateTime,
    to: NaiveDateTime,
    policy: NegativeBillable,
) -> ValidationResult<Summary> {
    let lines = window_lines(entries, from, to, policy)?;
    let summary = summarize_lines(&lines);
    debug!(
        %from,
        %to,
        entries = lines.len(),
        income = summary.income,
        total_hours = %summary.total_hours,
        "Summarized window"
    );
    Ok(summary)
}

/// Summarizes the entries that fall on `day`.
pub fn summarize_day(entries: &[Entry], day: &Day, policy: NegativeBillable) -> Summary {
    summarize_lines(&day_lines(entries, day, policy))
}

/// Sums the per-day summaries of `days`.
///
/// Every entry is clipped to each day separately, so a shift across midnight
/// is split between the two days it touches.
pub fn summarize_week(entries: &[Entry], days: &[Day], policy: NegativeBillable) -> Summary {
    let lines: Vec<BillableLine> = days
        .iter()
        .flat_map(|day| day_lines(entries, day, policy))
        .collect();
    summarize_lines(&lines)
}

/// Pairs `days` with their combined summary.
pub fn build_week(entries: &[Entry], days: Vec<Day>, policy: NegativeBillable) -> Week {
    let summaries = summarize_week(entries, &days, policy);
    Week { days, summaries }
}

/// Lays out a month as weeks and summarizes each one.
pub fn build_month(
    entries: &[Entry],
    year: i32,
    month: u32,
    week_start: Weekday,
    policy: NegativeBillable,
) -> ValidationResult<Vec<Week>> {
    let weeks: Vec<Week> = month_grid(year, month, week_start)?
        .into_iter()
        .map(|days| build_week(entries, days, policy))
        .collect();
    debug!(year, month, weeks = weeks.len(), "Built month");
    Ok(weeks)
}

fn day_lines(entries: &[Entry], day: &Day, policy: NegativeBillable) -> Vec<BillableLine> {
    get_entries(entries, day.day_start_time, day.day_end_time)
        .into_iter()
        .map(|entry| entry_billable_time(entry, day.day_start_time, day.day_end_time, policy))
        .collect()
}

/// Totals a set of billable lines.
///
/// Negative lines reduce the total, which is then floored at zero.
pub fn summarize_lines(lines: &[BillableLine]) -> Summary {
    Summary {
        income: lines.iter().map(|l| l.income).sum(),
        total_hours: Duration::clamped(lines.iter().map(|l| l.billable_minutes).sum()),
    }
}

fn validate_window(from: NaiveDateTime, to: NaiveDateTime) -> ValidationResult<()> {
    if to < from {
        return Err(ValidationError::new(
            Field::Window,
            "window end cannot be before its start",
        ));
    }
    Ok(())
}

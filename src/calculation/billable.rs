//! Billable time of an entry inside a reporting window.
//!
//! A shift that spans several days contributes to each day it touches. Unpaid
//! breaks carry no time of day, so they are spread evenly over the whole
//! shift: a window receives the share of the entry's billable minutes that
//! matches the share of the shift it covers, rounded down to whole minutes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Duration, Entry, NegativeBillable};

/// The billable time and income one entry contributes to a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillableLine {
    /// The entry this line was computed from.
    pub entry_id: u64,
    /// The entry's workplace.
    pub workplace: String,
    /// Billable minutes after the policy was applied; negative only under
    /// [`NegativeBillable::Allow`].
    pub billable_minutes: i64,
    /// Billable time, floored at zero.
    pub billable: Duration,
    /// `pay_rate × billable hours`.
    pub income: f64,
}

/// Computes the billable part of `entry` inside `[from, to)`.
///
/// Without clipping (the window covers the whole shift) the result equals the
/// entry's own billable time and income.
///
/// # Example
///
/// ```
/// use pay_tracker::calculation::entry_billable_time;
/// use pay_tracker::models::{Duration, Entry, NegativeBillable};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// // 4 hours with a 1 hour break: 3 billable hours spread over the shift.
/// let entry = Entry::new(
///     1, "Bar", 20.0, at("2024-01-01 22:00"), at("2024-01-02 02:00"),
///     vec![Duration::new(1, 0).unwrap()],
/// ).unwrap();
///
/// let line = entry_billable_time(&entry, at("2024-01-01 00:00"), at("2024-01-02 00:00"), NegativeBillable::Clamp);
/// assert_eq!(line.billable, Duration::new(1, 30).unwrap());
/// assert_eq!(line.income, 30.0);
/// ```
pub fn entry_billable_time(
    entry: &Entry,
    from: NaiveDateTime,
    to: NaiveDateTime,
    policy: NegativeBillable,
) -> BillableLine {
    let minutes = policy.apply(window_billable_minutes(entry, from, to));
    BillableLine {
        entry_id: entry.id(),
        workplace: entry.workplace().to_string(),
        billable_minutes: minutes,
        billable: Duration::clamped(minutes),
        income: entry.pay_rate() * policy.hours(minutes),
    }
}

/// Signed billable minutes of `entry` that fall into `[from, to)`.
fn window_billable_minutes(entry: &Entry, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let full = entry.span_minutes();
    if full == 0 {
        return 0;
    }
    let clipped = entry.limited_minutes(Some(from), Some(to));
    if clipped == full {
        return entry.billable_minutes();
    }
    (i128::from(clipped) * i128::from(entry.billable_minutes())).div_euclid(i128::from(full)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn dur(hours: i64, minutes: i64) -> Duration {
        Duration::new(hours, minutes).unwrap()
    }

    fn overnight_entry(breaks: Vec<Duration>) -> Entry {
        Entry::new(
            4,
            "Bar",
            20.0,
            make_datetime("2024-01-01", "22:00:00"),
            make_datetime("2024-01-02", "02:00:00"),
            breaks,
        )
        .unwrap()
    }

    /// WB-001: unclipped window matches the entry
    #[test]
    fn test_unclipped_window_matches_entry() {
        let entry = Entry::new(
            1,
            "Cafe",
            20.0,
            make_datetime("2024-01-01", "09:00:00"),
            make_datetime("2024-01-01", "17:00:00"),
            vec![dur(0, 45)],
        )
        .unwrap();
        let line = entry_billable_time(
            &entry,
            make_datetime("2024-01-01", "00:00:00"),
            make_datetime("2024-01-02", "00:00:00"),
            NegativeBillable::Clamp,
        );
        assert_eq!(line.billable, entry.billable_duration());
        assert_eq!(line.income, entry.income());
        assert_eq!(line.entry_id, 1);
        assert_eq!(line.workplace, "Cafe");
    }

    /// WB-002: overnight shift split at midnight without breaks
    #[test]
    fn test_overnight_split_without_breaks() {
        let entry = overnight_entry(vec![]);
        let before = entry_billable_time(
            &entry,
            make_datetime("2024-01-01", "00:00:00"),
            make_datetime("2024-01-02", "00:00:00"),
            NegativeBillable::Clamp,
        );
        let after = entry_billable_time(
            &entry,
            make_datetime("2024-01-02", "00:00:00"),
            make_datetime("2024-01-03", "00:00:00"),
            NegativeBillable::Clamp,
        );
        assert_eq!(before.billable, dur(2, 0));
        assert_eq!(after.billable, dur(2, 0));
        assert_eq!(before.income + after.income, entry.income());
    }

    /// WB-003: breaks are spread proportionally across windows
    #[test]
    fn test_breaks_spread_proportionally() {
        // 3 of the 4 hours fall on the second day; 40 minutes of break.
        let entry = Entry::new(
            5,
            "Bar",
            30.0,
            make_datetime("2024-01-01", "23:00:00"),
            make_datetime("2024-01-02", "03:00:00"),
            vec![dur(0, 40)],
        )
        .unwrap();
        let before = entry_billable_time(
            &entry,
            make_datetime("2024-01-01", "00:00:00"),
            make_datetime("2024-01-02", "00:00:00"),
            NegativeBillable::Clamp,
        );
        let after = entry_billable_time(
            &entry,
            make_datetime("2024-01-02", "00:00:00"),
            make_datetime("2024-01-03", "00:00:00"),
            NegativeBillable::Clamp,
        );
        // billable 200 minutes: 60/240 -> 50, 180/240 -> 150
        assert_eq!(before.billable_minutes, 50);
        assert_eq!(after.billable_minutes, 150);
        assert_eq!(before.billable_minutes + after.billable_minutes, entry.billable_minutes());
    }

    #[test]
    fn test_window_share_rounds_down() {
        // 3 hours, 10 minute break: 170 billable; 1 of 3 hours -> 56.67 -> 56
        let entry = Entry::new(
            6,
            "Bar",
            20.0,
            make_datetime("2024-01-01", "23:00:00"),
            make_datetime("2024-01-02", "02:00:00"),
            vec![dur(0, 10)],
        )
        .unwrap();
        let line = entry_billable_time(
            &entry,
            make_datetime("2024-01-01", "00:00:00"),
            make_datetime("2024-01-02", "00:00:00"),
            NegativeBillable::Clamp,
        );
        assert_eq!(line.billable_minutes, 56);
    }

    #[test]
    fn test_window_outside_entry_is_zero() {
        let entry = overnight_entry(vec![dur(0, 30)]);
        let line = entry_billable_time(
            &entry,
            make_datetime("2024-01-05", "00:00:00"),
            make_datetime("2024-01-06", "00:00:00"),
            NegativeBillable::Clamp,
        );
        assert_eq!(line.billable, Duration::ZERO);
        assert_eq!(line.income, 0.0);
    }

    #[test]
    fn test_zero_length_entry_is_zero() {
        let entry = Entry::new(
            7,
            "Bar",
            20.0,
            make_datetime("2024-01-01", "12:00:00"),
            make_datetime("2024-01-01", "12:00:00"),
            vec![dur(0, 30)],
        )
        .unwrap();
        let line = entry_billable_time(
            &entry,
            make_datetime("2024-01-01", "00:00:00"),
            make_datetime("2024-01-02", "00:00:00"),
            NegativeBillable::Allow,
        );
        assert_eq!(line.billable_minutes, 0);
    }

    #[test]
    fn test_negative_billable_clamped() {
        let entry = overnight_entry(vec![dur(5, 0)]);
        let line = entry_billable_time(
            &entry,
            make_datetime("2024-01-01", "00:00:00"),
            make_datetime("2024-01-02", "00:00:00"),
            NegativeBillable::Clamp,
        );
        assert_eq!(line.billable_minutes, 0);
        assert_eq!(line.income, 0.0);
    }

    #[test]
    fn test_negative_billable_signed() {
        // -60 billable minutes over 240: half the shift -> -30
        let entry = overnight_entry(vec![dur(5, 0)]);
        let line = entry_billable_time(
            &entry,
            make_datetime("2024-01-01", "00:00:00"),
            make_datetime("2024-01-02", "00:00:00"),
            NegativeBillable::Allow,
        );
        assert_eq!(line.billable_minutes, -30);
        assert_eq!(line.billable, Duration::ZERO);
        assert_eq!(line.income, -10.0);
    }
}

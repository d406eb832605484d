//! Selecting the entries that intersect a reporting window.

use chrono::NaiveDateTime;

use crate::models::Entry;

/// Returns the entries that overlap the half-open window `[from, to)`.
///
/// An entry overlaps when `entry.from < to` and `entry.to > from`, so a shift
/// that only touches a window boundary is left out. Input order is kept.
///
/// # Example
///
/// ```
/// use pay_tracker::calculation::get_entries;
/// use pay_tracker::models::Entry;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let entries = vec![
///     Entry::new(1, "Bar", 25.0, at("2024-01-01 23:00"), at("2024-01-02 01:00"), vec![]).unwrap(),
///     Entry::new(2, "Bar", 25.0, at("2024-01-02 09:00"), at("2024-01-02 17:00"), vec![]).unwrap(),
/// ];
///
/// let first_day = get_entries(&entries, at("2024-01-01 00:00"), at("2024-01-02 00:00"));
/// assert_eq!(first_day.len(), 1);
/// assert_eq!(first_day[0].id(), 1);
/// ```
pub fn get_entries(entries: &[Entry], from: NaiveDateTime, to: NaiveDateTime) -> Vec<&Entry> {
    entries
        .iter()
        .filter(|entry| entry.overlaps(from, to))
        .collect()
}

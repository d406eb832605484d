//! Calculation logic for the pay tracker.
//!
//! This module contains the pure aggregation functions: selecting the entries
//! that overlap a window, clipping each entry to that window with its breaks
//! spread over the shift, and summing income and billable time per day, week
//! and month.

mod billable;
mod filter;
mod summary;

pub use billable::{BillableLine, entry_billable_time};
pub use filter::get_entries;
pub use summary::{
    build_month, build_week, sum_durations, summarize_day, summarize_lines, summarize_week,
    summarize_window, window_lines,
};

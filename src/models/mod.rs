//! Core data models for the pay tracker.
//!
//! This module contains the value objects every calculation works with.

mod calendar;
mod duration;
mod entry;
mod policy;
mod work_info;

pub use calendar::{Day, Summary, Week, month_grid, week_containing};
pub use duration::{Duration, DurationRecord};
pub use entry::{Entry, EntryRecord};
pub use policy::NegativeBillable;
pub use work_info::{WorkInfo, WorkInfos};

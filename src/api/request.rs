//! Request types for the pay tracker API.
//!
//! Entries arrive in their persisted record shape and are validated into
//! [`Entry`] values before any calculation runs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::models::{Entry, EntryRecord, NegativeBillable};

/// Request body for the `/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// The entries to summarize.
    pub entries: Vec<EntryRecord>,
    /// Window start (inclusive).
    pub from: NaiveDateTime,
    /// Window end (exclusive).
    pub to: NaiveDateTime,
    /// Overrides the configured negative billable policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_billable: Option<NegativeBillable>,
}

/// Request body for the `/calendar` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRequest {
    /// The entries to lay out.
    pub entries: Vec<EntryRecord>,
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 1 through 12.
    pub month: u32,
    /// Overrides the configured negative billable policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_billable: Option<NegativeBillable>,
}

/// Validates every record, failing on the first invalid one.
///
/// The error reason is prefixed with the record's position in the request.
pub(crate) fn into_entries(records: Vec<EntryRecord>) -> ValidationResult<Vec<Entry>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Entry::try_from(record).map_err(|err| {
                ValidationError::new(err.field, format!("entry {}: {}", index, err.reason))
            })
        })
        .collect()
}

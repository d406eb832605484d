//! Personal pay tracking calculator.
//!
//! Record work shifts as [`models::Entry`] values, then total billable time
//! and income over any window, day, week or month. Entries can be persisted
//! locally through [`storage::UserData`] or sent to the stateless HTTP
//! [`api`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

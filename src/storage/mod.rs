//! Local persistence of the user's entries.
//!
//! Values are JSON documents kept under three keys in a [`JsonStore`].
//! Everything read back is repaired by the [`sanitize`] functions before it
//! reaches the domain types, so a damaged record costs that record only.

pub mod sanitize;
mod store;
mod user_data;

pub use store::JsonStore;
pub use user_data::{CHECK_IN_KEY, ENTRIES_KEY, UserData, WORK_INFOS_KEY};

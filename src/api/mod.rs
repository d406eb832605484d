//! HTTP API for the pay tracker.
//!
//! Stateless JSON endpoints: callers send their entries with each request and
//! receive window summaries or a month calendar back.
//!
//! | Method | Path        | Body                              |
//! |--------|-------------|-----------------------------------|
//! | POST   | `/summary`  | `{entries, from, to}`             |
//! | POST   | `/calendar` | `{entries, year, month}`          |

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalendarRequest, SummaryRequest};
pub use response::{ApiError, ApiErrorResponse, CalendarResponse, SummaryResponse};
pub use state::AppState;

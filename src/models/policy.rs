//! Policy for billable time that comes out negative.

use serde::{Deserialize, Serialize};

use super::Duration;

/// How billable time below zero (breaks longer than the shift) is treated.
///
/// # Example
///
/// ```
/// use pay_tracker::models::NegativeBillable;
///
/// assert_eq!(NegativeBillable::Clamp.apply(-30), 0);
/// assert_eq!(NegativeBillable::Allow.apply(-30), -30);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeBillable {
    /// Negative billable time counts as zero.
    #[default]
    Clamp,
    /// Negative billable time is kept, producing negative income.
    Allow,
}

impl NegativeBillable {
    /// Applies the policy to a signed billable minute count.
    pub fn apply(&self, minutes: i64) -> i64 {
        match self {
            NegativeBillable::Clamp => minutes.max(0),
            NegativeBillable::Allow => minutes,
        }
    }

    /// Converts a signed billable minute count to fractional hours under
    /// this policy.
    pub fn hours(&self, minutes: i64) -> f64 {
        let minutes = self.apply(minutes);
        let magnitude = Duration::clamped(minutes.abs()).as_hours_f64();
        if minutes < 0 { -magnitude } else { magnitude }
    }
}

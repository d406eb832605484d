//! Previously used pay rates per workplace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError, ValidationResult};

/// The pay rates remembered for one workplace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkInfo {
    /// Distinct pay rates, kept sorted ascending.
    pub pay_rate: Vec<f64>,
}

/// Workplace name to previously used pay rates, used as input suggestions.
///
/// # Example
///
/// ```
/// use pay_tracker::models::WorkInfos;
///
/// let mut infos = WorkInfos::default();
/// infos.record("Cafe", 27.5).unwrap();
/// infos.record("Cafe", 25.0).unwrap();
/// infos.record("Cafe", 27.5).unwrap();
///
/// assert_eq!(infos.pay_rates("Cafe"), &[25.0, 27.5]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkInfos {
    workplaces: BTreeMap<String, WorkInfo>,
}

impl WorkInfos {
    /// Remembers `pay_rate` for `workplace`. Recording a known rate is a no-op.
    pub fn record(&mut self, workplace: &str, pay_rate: f64) -> ValidationResult<()> {
        if !pay_rate.is_finite() || pay_rate < 0.0 {
            return Err(ValidationError::new(
                Field::PayRate,
                "pay rate must be a non-negative number",
            ));
        }
        let rates = &mut self
            .workplaces
            .entry(workplace.to_string())
            .or_default()
            .pay_rate;
        if !rates.contains(&pay_rate) {
            rates.push(pay_rate);
            rates.sort_by(f64::total_cmp);
        }
        Ok(())
    }

    /// Replaces the rates of `workplace` wholesale.
    pub(crate) fn insert(&mut self, workplace: String, info: WorkInfo) {
        self.workplaces.insert(workplace, info);
    }

    /// Returns the remembered rates for `workplace`, empty if unknown.
    pub fn pay_rates(&self, workplace: &str) -> &[f64] {
        self.workplaces
            .get(workplace)
            .map(|info| info.pay_rate.as_slice())
            .unwrap_or(&[])
    }

    /// Returns all known workplaces in name order.
    pub fn workplaces(&self) -> impl Iterator<Item = &str> {
        self.workplaces.keys().map(String::as_str)
    }

    /// Returns true when no workplace is known.
    pub fn is_empty(&self) -> bool {
        self.workplaces.is_empty()
    }
}

//! Entry model.
//!
//! An [`Entry`] is one recorded work shift. All fields are validated when the
//! entry is built; changing a field produces a new, re-validated entry.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError, ValidationResult};

use super::duration::{Duration, DurationRecord};
use super::policy::NegativeBillable;

/// One work shift with its workplace, pay rate, time range and unpaid breaks.
///
/// # Example
///
/// ```
/// use pay_tracker::models::{Duration, Entry};
/// use chrono::NaiveDateTime;
///
/// let entry = Entry::new(
///     1,
///     "Cafe",
///     20.0,
///     NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2024-01-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     vec![Duration::new(0, 30).unwrap()],
/// )
/// .unwrap();
///
/// assert_eq!(entry.billable_duration(), Duration::new(2, 30).unwrap());
/// assert_eq!(entry.income(), 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct Entry {
    id: u64,
    workplace: String,
    pay_rate: f64,
    from: NaiveDateTime,
    to: NaiveDateTime,
    unpaid_breaks: Vec<Duration>,
}

/// Plain-data shape of an entry as it is persisted and exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    /// Entry identifier.
    pub id: u64,
    /// Workplace label.
    pub workplace: String,
    /// Pay per hour.
    pub pay_rate: f64,
    /// Shift start.
    pub from: NaiveDateTime,
    /// Shift end.
    pub to: NaiveDateTime,
    /// Unpaid breaks taken during the shift.
    #[serde(default)]
    pub unpaid_breaks: Vec<DurationRecord>,
}

impl Entry {
    /// Creates a validated entry.
    ///
    /// The id is non-negative by type and any workplace text is accepted.
    /// The pay rate is checked first, then the time range, and the first
    /// failure is returned.
    pub fn new(
        id: u64,
        workplace: impl Into<String>,
        pay_rate: f64,
        from: NaiveDateTime,
        to: NaiveDateTime,
        unpaid_breaks: Vec<Duration>,
    ) -> ValidationResult<Self> {
        validate_pay_rate(pay_rate)?;
        validate_range(from, to)?;
        Ok(Self {
            id,
            workplace: workplace.into(),
            pay_rate,
            from,
            to,
            unpaid_breaks,
        })
    }

    /// Returns the entry identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the workplace label.
    pub fn workplace(&self) -> &str {
        &self.workplace
    }

    /// Returns the pay per hour.
    pub fn pay_rate(&self) -> f64 {
        self.pay_rate
    }

    /// Returns the shift start.
    pub fn from(&self) -> NaiveDateTime {
        self.from
    }

    /// Returns the shift end.
    pub fn to(&self) -> NaiveDateTime {
        self.to
    }

    /// Returns the unpaid breaks in the order they were recorded.
    pub fn unpaid_breaks(&self) -> &[Duration] {
        &self.unpaid_breaks
    }

    /// Returns the wall-clock span of the shift, truncated to whole minutes.
    pub fn duration(&self) -> Duration {
        Duration::clamped(self.span_minutes())
    }

    /// Returns the sum of all unpaid breaks.
    pub fn total_break_duration(&self) -> Duration {
        self.unpaid_breaks.iter().sum()
    }

    /// Returns worked minutes minus break minutes. Negative when the breaks
    /// are longer than the shift.
    pub fn billable_minutes(&self) -> i64 {
        self.span_minutes() - self.total_break_duration().total_minutes()
    }

    /// Returns the billable time, clamped at zero.
    pub fn billable_duration(&self) -> Duration {
        Duration::clamped(self.billable_minutes())
    }

    /// Returns `pay_rate × billable hours`, with billable time clamped at zero.
    pub fn income(&self) -> f64 {
        self.income_with(NegativeBillable::Clamp)
    }

    /// Returns the income under the given negative-billable policy.
    pub fn income_with(&self, policy: NegativeBillable) -> f64 {
        self.pay_rate * policy.hours(self.billable_minutes())
    }

    /// Returns the part of the shift that falls between the optional limits.
    ///
    /// A start before `from_limit` is moved to `from_limit`, an end after
    /// `to_limit` is moved to `to_limit`. Limits that leave nothing of the
    /// shift give a zero duration.
    ///
    /// # Example
    ///
    /// ```
    /// use pay_tracker::models::{Duration, Entry};
    /// use chrono::NaiveDateTime;
    ///
    /// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
    /// let entry = Entry::new(1, "Bar", 25.0, at("2024-01-01 22:00"), at("2024-01-02 02:00"), vec![]).unwrap();
    ///
    /// let before_midnight = entry.limited_duration(None, Some(at("2024-01-02 00:00")));
    /// assert_eq!(before_midnight, Duration::new(2, 0).unwrap());
    /// ```
    pub fn limited_duration(
        &self,
        from_limit: Option<NaiveDateTime>,
        to_limit: Option<NaiveDateTime>,
    ) -> Duration {
        Duration::clamped(self.limited_minutes(from_limit, to_limit))
    }

    /// Returns true when the shift intersects the half-open window
    /// `[from, to)`. Touching a boundary does not count.
    pub fn overlaps(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.from < to && self.to > from
    }

    /// Returns a copy with a different identifier.
    pub fn with_id(&self, id: u64) -> Self {
        Self { id, ..self.clone() }
    }

    /// Returns a copy with a different workplace.
    pub fn with_workplace(&self, workplace: impl Into<String>) -> Self {
        Self {
            workplace: workplace.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with a different pay rate.
    pub fn with_pay_rate(&self, pay_rate: f64) -> ValidationResult<Self> {
        validate_pay_rate(pay_rate)?;
        Ok(Self {
            pay_rate,
            ..self.clone()
        })
    }

    /// Returns a copy with a different time range.
    pub fn with_times(&self, from: NaiveDateTime, to: NaiveDateTime) -> ValidationResult<Self> {
        validate_range(from, to)?;
        Ok(Self {
            from,
            to,
            ..self.clone()
        })
    }

    /// Returns a copy with a different list of unpaid breaks.
    pub fn with_unpaid_breaks(&self, unpaid_breaks: Vec<Duration>) -> Self {
        Self {
            unpaid_breaks,
            ..self.clone()
        }
    }

    /// Returns the plain-data form of this entry.
    pub fn to_record(&self) -> EntryRecord {
        EntryRecord {
            id: self.id,
            workplace: self.workplace.clone(),
            pay_rate: self.pay_rate,
            from: self.from,
            to: self.to,
            unpaid_breaks: self.unpaid_breaks.iter().map(Duration::to_record).collect(),
        }
    }

    pub(crate) fn span_minutes(&self) -> i64 {
        (self.to - self.from).num_minutes()
    }

    pub(crate) fn limited_minutes(
        &self,
        from_limit: Option<NaiveDateTime>,
        to_limit: Option<NaiveDateTime>,
    ) -> i64 {
        let start = match from_limit {
            Some(limit) if self.from < limit => limit,
            _ => self.from,
        };
        let end = match to_limit {
            Some(limit) if self.to > limit => limit,
            _ => self.to,
        };
        (end - start).num_minutes().max(0)
    }
}

fn validate_pay_rate(pay_rate: f64) -> ValidationResult<()> {
    if !pay_rate.is_finite() {
        return Err(ValidationError::new(
            Field::PayRate,
            "pay rate should be a number",
        ));
    }
    if pay_rate < 0.0 {
        return Err(ValidationError::new(
            Field::PayRate,
            "pay rate cannot be negative",
        ));
    }
    Ok(())
}

fn validate_range(from: NaiveDateTime, to: NaiveDateTime) -> ValidationResult<()> {
    if to < from {
        return Err(ValidationError::new(
            Field::To,
            "end date cannot be before the start date",
        ));
    }
    Duration::between(from, to)
        .map(|_| ())
        .map_err(|_| ValidationError::new(Field::To, "shift is too long"))
}

impl TryFrom<EntryRecord> for Entry {
    type Error = ValidationError;

    fn try_from(record: EntryRecord) -> ValidationResult<Self> {
        validate_pay_rate(record.pay_rate)?;
        validate_range(record.from, record.to)?;
        let unpaid_breaks = record
            .unpaid_breaks
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Duration::try_from(raw).map_err(|err| {
                    ValidationError::new(
                        Field::UnpaidBreaks,
                        format!("break {}: {}", index, err.reason),
                    )
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        Entry::new(
            record.id,
            record.workplace,
            record.pay_rate,
            record.from,
            record.to,
            unpaid_breaks,
        )
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        entry.to_record()
    }
}

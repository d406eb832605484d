//! Repair of persisted values before they become domain objects.
//!
//! Stored documents may have been written by older versions or edited by hand:
//! numbers saved as strings, `null` where a field was never set, instants with
//! an offset. Each function here coerces what it can, drops what it cannot and
//! never fails as a whole.

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Field, ValidationError, ValidationResult};
use crate::models::{DurationRecord, Entry, EntryRecord, WorkInfo, WorkInfos};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Rebuilds entries from a stored array, skipping records that cannot be
/// repaired or fail validation.
pub fn repair_entries(value: &Value) -> Vec<Entry> {
    let Some(records) = value.as_array() else {
        warn!("Stored entries are not an array, discarding");
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match repair_entry(raw) {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(index, %error, "Skipping stored entry");
                None
            }
        })
        .collect()
}

/// Rebuilds the remembered pay rates per workplace.
///
/// A legacy array document yields no workplaces. A workplace whose rate list
/// is missing or malformed is kept with no rates.
pub fn repair_work_infos(value: &Value) -> WorkInfos {
    let mut infos = WorkInfos::default();
    let Some(workplaces) = value.as_object() else {
        warn!("Stored work infos are not an object, resetting");
        return infos;
    };

    for (workplace, info) in workplaces {
        infos.insert(workplace.clone(), WorkInfo::default());
        let Some(rates) = info.get("payRate").and_then(Value::as_array) else {
            warn!(workplace = %workplace, "Pay rates are not a list, resetting");
            continue;
        };
        for raw in rates {
            let recorded = coerce_number(Some(raw))
                .ok_or_else(|| ValidationError::new(Field::PayRate, "not a number"))
                .and_then(|rate| infos.record(workplace, rate));
            if let Err(error) = recorded {
                warn!(workplace = %workplace, %error, "Dropping stored pay rate");
            }
        }
    }
    infos
}

/// Parses a stored check-in instant; anything unparseable means "not checked in".
pub fn repair_check_in(value: &Value) -> Option<NaiveDateTime> {
    if value.is_null() {
        return None;
    }
    let parsed = parse_instant(value);
    if parsed.is_none() {
        warn!(%value, "Discarding unparseable check-in time");
    }
    parsed
}

fn repair_entry(raw: &Value) -> ValidationResult<Entry> {
    let fields = raw
        .as_object()
        .ok_or_else(|| ValidationError::new(Field::Id, "record is not an object"))?;

    let record = EntryRecord {
        id: required_id(fields.get("id"))?,
        workplace: coerce_text(fields.get("workplace")),
        pay_rate: coerce_number(fields.get("payRate"))
            .ok_or_else(|| ValidationError::new(Field::PayRate, "missing or not a number"))?,
        from: required_instant(fields, "from", Field::From)?,
        to: required_instant(fields, "to", Field::To)?,
        unpaid_breaks: repair_breaks(fields.get("unpaidBreaks"))?,
    };
    Entry::try_from(record)
}

fn repair_breaks(value: Option<&Value>) -> ValidationResult<Vec<DurationRecord>> {
    let breaks = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(breaks)) => breaks,
        Some(_) => {
            return Err(ValidationError::new(Field::UnpaidBreaks, "not a list"));
        }
    };

    breaks
        .iter()
        .map(|raw| {
            let fields = raw
                .as_object()
                .ok_or_else(|| ValidationError::new(Field::UnpaidBreaks, "break is not an object"))?;
            Ok(DurationRecord {
                hours: optional_integer(fields.get("hours"), Field::Hours)?,
                minutes: optional_integer(fields.get("minutes"), Field::Minutes)?,
            })
        })
        .collect()
}

/// Ids are read as exact unsigned integers; floats would lose the upper range.
fn required_id(value: Option<&Value>) -> ValidationResult<u64> {
    let exact = match value {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    if let Some(id) = exact {
        return Ok(id);
    }
    let number = coerce_number(value)
        .ok_or_else(|| ValidationError::new(Field::Id, "missing or not a number"))?;
    let id = to_integer(number, Field::Id)?;
    u64::try_from(id).map_err(|_| ValidationError::new(Field::Id, "id cannot be negative"))
}

fn optional_integer(value: Option<&Value>, field: Field) -> ValidationResult<i64> {
    match coerce_number(value) {
        Some(number) => to_integer(number, field),
        None => Ok(0),
    }
}

fn to_integer(number: f64, field: Field) -> ValidationResult<i64> {
    if number.fract() != 0.0 || number.abs() > i64::MAX as f64 {
        return Err(ValidationError::new(field, "must be a whole number"));
    }
    Ok(number as i64)
}

fn required_instant(
    fields: &Map<String, Value>,
    key: &str,
    field: Field,
) -> ValidationResult<NaiveDateTime> {
    fields
        .get(key)
        .and_then(parse_instant)
        .ok_or_else(|| ValidationError::new(field, "missing or not a valid instant"))
}

/// Numbers pass through, numeric strings are parsed; `null`, NaN and
/// everything else count as absent.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn parse_instant(value: &Value) -> Option<NaiveDateTime> {
    let text = value.as_str()?.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

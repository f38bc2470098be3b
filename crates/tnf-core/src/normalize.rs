//! Backend row normalization.
//!
//! Turns the `/rows` payload into [`Record`]s. Rows whose coordinates do not
//! parse to finite numbers are dropped whole; every other field degrades to
//! a default instead of failing. Normalization never errors.

use chrono::{Local, TimeZone};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::enums::Status;
use crate::fields::FieldNames;
use crate::record::{Record, RecordId};
use crate::time::parse_timestamp_in;

/// Outcome of normalizing one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizeReport {
    /// Valid records, in payload order.
    pub records: Vec<Record>,
    /// Rows that were excluded.
    pub dropped: usize,
}

impl NormalizeReport {
    #[must_use]
    pub fn kept(&self) -> usize {
        self.records.len()
    }
}

/// Normalize a payload, reading naive timestamps in local time.
#[must_use]
pub fn normalize_payload(payload: &Value, fields: &FieldNames) -> NormalizeReport {
    normalize_payload_in(payload, fields, &Local)
}

/// Normalize a payload, reading naive timestamps in `tz`.
///
/// A payload that is not a JSON array yields an empty report.
#[must_use]
pub fn normalize_payload_in<Tz: TimeZone>(
    payload: &Value,
    fields: &FieldNames,
    tz: &Tz,
) -> NormalizeReport {
    let Some(rows) = payload.as_array() else {
        tracing::warn!(kind = value_kind(payload), "rows payload is not an array");
        return NormalizeReport::default();
    };

    let mut report = NormalizeReport {
        records: Vec::with_capacity(rows.len()),
        dropped: 0,
    };

    for (index, row) in rows.iter().enumerate() {
        match row.as_object().and_then(|row| normalize_row(index, row, fields, tz)) {
            Some(record) => report.records.push(record),
            None => {
                tracing::debug!(index, "dropping malformed row");
                report.dropped += 1;
            }
        }
    }

    report
}

fn normalize_row<Tz: TimeZone>(
    index: usize,
    row: &Map<String, Value>,
    fields: &FieldNames,
    tz: &Tz,
) -> Option<Record> {
    let lat = row.get(&fields.latitude).and_then(parse_f64)?;
    let lng = row.get(&fields.longitude).and_then(parse_f64)?;
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }

    let id = row
        .get(&fields.id)
        .and_then(parse_id)
        .unwrap_or_else(|| RecordId::positional(index));

    let status = row
        .get(&fields.status)
        .and_then(clean_text)
        .map_or(Status::Pending, |raw| {
            raw.parse().unwrap_or_else(|_| {
                tracing::debug!(%id, status = %raw, "unknown status, treating as pending");
                Status::Pending
            })
        });

    let confidence = row
        .get(&fields.confidence)
        .and_then(parse_f64)
        .filter(|c| c.is_finite())
        .map_or(0.0, |c| c.clamp(0.0, 1.0));

    let timestamp = row
        .get(&fields.time)
        .and_then(clean_text)
        .and_then(|raw| parse_timestamp_in(&raw, tz));

    Some(Record {
        id,
        lat,
        lng,
        image: row.get(&fields.image).and_then(clean_text),
        status,
        confidence,
        timestamp,
        vehicle_id: row.get(&fields.vehicle_id).and_then(parse_i64),
        label: row.get(&fields.label).and_then(clean_text),
    })
}

/// Scalar text with newlines removed and whitespace trimmed; `None` if empty.
fn clean_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.replace('\n', ""),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(_) => clean_text(value)?.parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(_) => clean_text(value)?.parse().ok(),
        _ => None,
    }
}

fn parse_id(value: &Value) -> Option<RecordId> {
    if let Some(n) = parse_i64(value) {
        return Some(RecordId::Number(n));
    }
    clean_text(value).map(RecordId::Text)
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

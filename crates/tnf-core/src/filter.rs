//! The filter pipeline.
//!
//! A filtered view is always derived from scratch out of the live set and
//! the current [`FilterSettings`]; nothing is patched incrementally. The
//! predicates run in a fixed order (status, confidence, dates) but are
//! independent, so the result does not depend on that order.

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::enums::Status;
use crate::errors::CoreError;
use crate::record::Record;
use crate::time::{day_end_in, day_start_in};

/// User-controlled filter state. Survives every fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Only records with this status; `None` means all.
    pub status: Option<Status>,
    /// Records below this confidence are hidden.
    pub min_confidence: f64,
    /// Inclusive lower bound, from the start of the day.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound, through the end of the day.
    pub date_to: Option<NaiveDate>,
}

impl FilterSettings {
    /// Set the confidence threshold.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfidence`] unless `value` is within `[0, 1]`.
    pub fn set_min_confidence(&mut self, value: f64) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::InvalidConfidence(value));
        }
        self.min_confidence = value;
        Ok(())
    }

    /// Reset every filter to "show everything".
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn has_date_bounds(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Parse a `YYYY-MM-DD` filter date. An empty input clears the bound.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDate`] for anything else that does not parse.
    pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| CoreError::InvalidDate {
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// Whether `record` passes every predicate, with day bounds in `tz`.
    #[must_use]
    pub fn matches_in<Tz: TimeZone>(&self, record: &Record, tz: &Tz) -> bool {
        self.status_passes(record) && self.confidence_passes(record) && self.dates_pass(record, tz)
    }

    fn status_passes(&self, record: &Record) -> bool {
        self.status.is_none_or(|status| status == record.status)
    }

    fn confidence_passes(&self, record: &Record) -> bool {
        record.confidence >= self.min_confidence
    }

    fn dates_pass<Tz: TimeZone>(&self, record: &Record, tz: &Tz) -> bool {
        if !self.has_date_bounds() {
            return true;
        }
        let Some(timestamp) = record.timestamp else {
            return false;
        };
        if let Some(from) = self.date_from {
            if timestamp < day_start_in(from, tz) {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if timestamp > day_end_in(to, tz) {
                return false;
            }
        }
        true
    }
}

/// Status counts over a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    pub total: usize,
    pub pending: usize,
    pub reviewed: usize,
    pub ignored: usize,
    pub fixed: usize,
}

impl Aggregates {
    fn count(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Pending => self.pending += 1,
            Status::Reviewed => self.reviewed += 1,
            Status::Ignored => self.ignored += 1,
            Status::Fixed => self.fixed += 1,
        }
    }
}

/// Records passing the current filters, in live-set order, with counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView<'a> {
    pub records: Vec<&'a Record>,
    pub counts: Aggregates,
}

impl FilteredView<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Apply `settings` to `records` with day bounds in local time.
#[must_use]
pub fn apply<'a>(records: &'a [Record], settings: &FilterSettings) -> FilteredView<'a> {
    apply_in(records, settings, &Local)
}

/// Apply `settings` to `records` with day bounds in `tz`.
#[must_use]
pub fn apply_in<'a, Tz: TimeZone>(
    records: &'a [Record],
    settings: &FilterSettings,
    tz: &Tz,
) -> FilteredView<'a> {
    let mut counts = Aggregates::default();
    let records: Vec<&Record> = records
        .iter()
        .filter(|record| settings.matches_in(record, tz))
        .inspect(|record| counts.count(record.status))
        .collect();
    FilteredView { records, counts }
}

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::enums::{ConfidenceBand, Status};
use crate::time::format_detail_in;

/// Identity of a record within one fetch batch.
///
/// Integer-looking identifiers are always stored as `Number`, whether the
/// backend sent `7` or `"7"`, so lookups from command-line input match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Positional fallback used when a row carries no identifier.
    #[must_use]
    pub fn positional(index: usize) -> Self {
        i64::try_from(index).map_or_else(|_| Self::Text(index.to_string()), Self::Number)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Number))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

/// One geotagged detection.
///
/// `lat` and `lng` are always finite: rows failing that check never become
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub lat: f64,
    pub lng: f64,
    /// Opaque image reference, usually a `data:image/jpeg;base64,...` URI.
    pub image: Option<String>,
    pub status: Status,
    /// Detection confidence in `[0, 1]`.
    pub confidence: f64,
    pub timestamp: Option<DateTime<Utc>>,
    pub vehicle_id: Option<i64>,
    pub label: Option<String>,
}

impl Record {
    /// Minimal record at the given position, everything else defaulted.
    #[must_use]
    pub fn new(id: impl Into<RecordId>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            image: None,
            status: Status::Pending,
            confidence: 0.0,
            timestamp: None,
            vehicle_id: None,
            label: None,
        }
    }

    #[must_use]
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }

    /// Confidence as a rounded whole percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Timestamp in detail-panel form, or `N/A`.
    #[must_use]
    pub fn display_time_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.timestamp
            .as_ref()
            .map_or_else(|| String::from("N/A"), |ts| format_detail_in(ts, tz))
    }

    #[must_use]
    pub fn display_time(&self) -> String {
        self.display_time_in(&Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_id_parses_integers_as_numbers() {
        assert_eq!(RecordId::from("42"), RecordId::Number(42));
        assert_eq!(RecordId::from(" 42 "), RecordId::Number(42));
        assert_eq!(RecordId::from("A-17"), RecordId::Text("A-17".into()));
    }

    #[test]
    fn record_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&RecordId::Number(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&RecordId::Text("x".into())).unwrap(),
            "\"x\""
        );
    }

    #[test]
    fn confidence_percent_rounds() {
        let mut record = Record::new(1_i64, 30.0, 31.0);
        record.confidence = 0.876;
        assert_eq!(record.confidence_percent(), 88);
        assert_eq!(record.confidence_band(), ConfidenceBand::High);
    }

    #[test]
    fn missing_time_displays_na() {
        let record = Record::new(1_i64, 30.0, 31.0);
        assert_eq!(record.display_time_in(&Utc), "N/A");
    }
}

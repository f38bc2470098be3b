use anyhow::{Context, bail};
use chrono::{Local, Utc};
use serde::Serialize;
use tnf_backend::HttpBackend;
use tnf_config::{TimezoneSetting, TnfConfig};
use tnf_core::enums::{ConfidenceBand, Status};
use tnf_core::filter::FilterSettings;
use tnf_core::record::{Record, RecordId};
use tnf_sync::{FetchOutcome, SyncController, SyncOptions};

use crate::cli::root_commands::FilterArgs;

pub type Controller = SyncController<HttpBackend>;

pub fn controller(config: &TnfConfig) -> anyhow::Result<Controller> {
    let backend = HttpBackend::try_new(&config.backend, config.fields.clone())
        .context("failed to build HTTP client")?;
    Ok(SyncController::new(backend, SyncOptions::from(config)))
}

/// Initial load. With no previous live set to fall back on, a failed read
/// is fatal for a one-shot command.
pub async fn load(ctl: &mut Controller) -> anyhow::Result<FetchOutcome> {
    let outcome = ctl.start().await;
    if let FetchOutcome::Failed { reason } = &outcome {
        bail!("failed to load records from {}: {reason}", ctl.backend().rows_url());
    }
    Ok(outcome)
}

/// Rows the last successful fetch discarded during normalization.
pub const fn dropped(outcome: &FetchOutcome) -> usize {
    match outcome {
        FetchOutcome::Replaced { dropped, .. } => *dropped,
        FetchOutcome::Failed { .. } => 0,
    }
}

/// Build filter settings from command-line inputs. Empty strings leave a
/// filter unset.
pub fn filter_settings(args: &FilterArgs) -> anyhow::Result<FilterSettings> {
    let mut settings = FilterSettings::default();

    if let Some(raw) = args.status.as_deref().map(str::trim)
        && !raw.is_empty()
    {
        settings.status = Some(raw.parse::<Status>()?);
    }
    if let Some(value) = args.min_confidence {
        settings.set_min_confidence(value)?;
    }
    if let Some(raw) = &args.from {
        settings.date_from = FilterSettings::parse_date(raw).context("invalid --from")?;
    }
    if let Some(raw) = &args.to {
        settings.date_to = FilterSettings::parse_date(raw).context("invalid --to")?;
    }

    Ok(settings)
}

/// One line of the list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: RecordId,
    pub status: Status,
    pub confidence: u8,
    pub band: ConfidenceBand,
    pub lat: f64,
    pub lng: f64,
    pub time: String,
    pub label: Option<String>,
}

impl RowView {
    pub fn new(record: &Record, tz: TimezoneSetting) -> Self {
        Self {
            id: record.id.clone(),
            status: record.status,
            confidence: record.confidence_percent(),
            band: record.confidence_band(),
            lat: record.lat,
            lng: record.lng,
            time: display_time(record, tz),
            label: record.label.clone(),
        }
    }
}

/// The detail panel for one selected record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: RecordId,
    pub status: Status,
    pub confidence: u8,
    pub band: ConfidenceBand,
    pub lat: f64,
    pub lng: f64,
    pub time: String,
    pub label: Option<String>,
    pub vehicle_id: Option<i64>,
    pub has_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl DetailView {
    pub fn new(record: &Record, tz: TimezoneSetting, with_image: bool) -> Self {
        Self {
            id: record.id.clone(),
            status: record.status,
            confidence: record.confidence_percent(),
            band: record.confidence_band(),
            lat: record.lat,
            lng: record.lng,
            time: display_time(record, tz),
            label: record.label.clone(),
            vehicle_id: record.vehicle_id,
            has_image: record.image.is_some(),
            image: if with_image {
                record.image.clone()
            } else {
                None
            },
        }
    }
}

pub fn display_time(record: &Record, tz: TimezoneSetting) -> String {
    match tz {
        TimezoneSetting::Local => record.display_time_in(&Local),
        TimezoneSetting::Utc => record.display_time_in(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(status: &str, from: &str, to: &str) -> FilterArgs {
        FilterArgs {
            status: Some(status.into()),
            min_confidence: None,
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    #[test]
    fn no_flags_means_no_filters() {
        assert_eq!(
            filter_settings(&FilterArgs::default()).unwrap(),
            FilterSettings::default()
        );
    }

    #[test]
    fn empty_strings_leave_filters_unset() {
        let settings = filter_settings(&args("", "", " ")).unwrap();
        assert_eq!(settings, FilterSettings::default());
    }

    #[test]
    fn flags_populate_every_filter() {
        let mut input = args("Fixed", "2025-03-01", "2025-03-31");
        input.min_confidence = Some(0.5);

        let settings = filter_settings(&input).unwrap();
        assert_eq!(settings.status, Some(Status::Fixed));
        assert_eq!(settings.min_confidence, 0.5);
        assert_eq!(settings.date_from, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(settings.date_to, NaiveDate::from_ymd_opt(2025, 3, 31));
    }

    #[test]
    fn bad_inputs_are_reported() {
        assert!(filter_settings(&args("archived", "", "")).is_err());
        assert!(filter_settings(&args("", "03/01/2025", "")).is_err());

        let mut input = FilterArgs::default();
        input.min_confidence = Some(1.5);
        assert!(filter_settings(&input).is_err());
    }

    fn record() -> Record {
        let mut record = Record::new(4_i64, 30.05, 31.25);
        record.status = Status::Reviewed;
        record.confidence = 0.836;
        record.timestamp = Some(Utc.with_ymd_and_hms(2025, 3, 5, 14, 7, 0).unwrap());
        record.image = Some("data:image/jpeg;base64,AAAA".into());
        record.vehicle_id = Some(12);
        record
    }

    #[test]
    fn row_view_formats_confidence_and_time() {
        let view = RowView::new(&record(), TimezoneSetting::Utc);
        assert_eq!(view.confidence, 84);
        assert_eq!(view.band, ConfidenceBand::High);
        assert_eq!(view.time, "05 Mar 2025, 02:07 pm");
    }

    #[test]
    fn detail_view_hides_image_unless_asked() {
        let without = DetailView::new(&record(), TimezoneSetting::Utc, false);
        assert!(without.has_image);
        assert_eq!(without.image, None);
        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("image").is_none());

        let with = DetailView::new(&record(), TimezoneSetting::Utc, true);
        assert_eq!(with.image.as_deref(), Some("data:image/jpeg;base64,AAAA"));
        assert_eq!(with.vehicle_id, Some(12));
    }

    #[test]
    fn missing_timestamp_displays_na() {
        let record = Record::new(1_i64, 0.0, 0.0);
        assert_eq!(display_time(&record, TimezoneSetting::Local), "N/A");
    }
}

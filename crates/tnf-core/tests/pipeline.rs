//! End-to-end checks of normalize → filter → select over backend-shaped rows.

use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use tnf_core::enums::{SelectionPolicy, Status};
use tnf_core::fields::FieldNames;
use tnf_core::filter::{FilterSettings, apply_in};
use tnf_core::normalize::normalize_payload_in;
use tnf_core::record::RecordId;
use tnf_core::selection::{Reconciliation, SelectionTracker};

fn sheet_rows() -> serde_json::Value {
    json!([
        {"vehicle_id": 1, "pothole_id": 1, "latitude": 30.1, "longitude": 31.2,
         "time": "2025-01-10 09:00:00", "label": "pothole", "confidence": 0.92,
         "status": "pending", "image": null},
        {"vehicle_id": 1, "pothole_id": 2, "latitude": 30.2, "longitude": 31.3,
         "time": "2025-01-12 17:45:00", "label": "pothole", "confidence": 0.55,
         "status": "fixed", "image": null},
        {"vehicle_id": 2, "pothole_id": 3, "latitude": null, "longitude": 31.3,
         "time": "2025-01-12 17:45:00", "label": "pothole", "confidence": 0.99,
         "status": "fixed", "image": null},
        {"vehicle_id": 2, "pothole_id": 4, "latitude": 29.9, "longitude": 31.0,
         "time": "", "label": "crack", "confidence": 0.31,
         "status": "", "image": null},
        {"vehicle_id": 3, "pothole_id": 5, "latitude": 30.0, "longitude": 31.1,
         "time": "2025-01-20 08:00:00", "label": "pothole", "confidence": 0.75,
         "status": "reviewed", "image": null}
    ])
}

#[test]
fn string_coordinates_and_a_bad_row() {
    let payload = json!([
        {"pothole_id": 1, "latitude": "30.1", "longitude": "31.2", "confidence": "0.9"},
        {"pothole_id": 2, "latitude": "bad", "longitude": "31.2"}
    ]);

    let report = normalize_payload_in(&payload, &FieldNames::default(), &Utc);
    assert_eq!(report.kept(), 1);
    assert_eq!(report.records[0].id, RecordId::Number(1));

    let view = apply_in(&report.records, &FilterSettings::default(), &Utc);
    assert_eq!(view.len(), 1);
}

#[test]
fn sheet_rows_through_every_filter() {
    let report = normalize_payload_in(&sheet_rows(), &FieldNames::default(), &Utc);
    assert_eq!(report.kept(), 4);
    assert_eq!(report.dropped, 1);

    let mut settings = FilterSettings::default();
    let all = apply_in(&report.records, &settings, &Utc);
    assert_eq!(all.counts.total, 4);
    assert_eq!(all.counts.pending, 2);

    settings.status = Some(Status::Fixed);
    let fixed = apply_in(&report.records, &settings, &Utc);
    assert_eq!(fixed.records.len(), 1);
    assert_eq!(fixed.records[0].id, RecordId::Number(2));

    settings.clear();
    settings.set_min_confidence(0.6).unwrap();
    let confident: Vec<_> = apply_in(&report.records, &settings, &Utc)
        .records
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(confident, vec![RecordId::Number(1), RecordId::Number(5)]);

    settings.clear();
    settings.date_from = FilterSettings::parse_date("2025-01-10").unwrap();
    settings.date_to = FilterSettings::parse_date("2025-01-12").unwrap();
    let ranged = apply_in(&report.records, &settings, &Utc);
    // Record 4 has no time and is excluded once a bound is set.
    assert_eq!(ranged.counts.total, 2);
    assert_eq!(ranged.counts.pending + ranged.counts.fixed, 2);
}

#[test]
fn selection_survives_a_refetch_by_identity() {
    let fields = FieldNames::default();
    let first = normalize_payload_in(&sheet_rows(), &fields, &Utc);

    let mut tracker = SelectionTracker::new(SelectionPolicy::Reresolve);
    tracker.select(&first.records[1]);
    tracker.patch_status(&RecordId::Number(2), Status::Reviewed);

    let mut rows = sheet_rows();
    rows[1]["status"] = json!("ignored");
    let second = normalize_payload_in(&rows, &fields, &Utc);

    assert_eq!(
        tracker.reconcile_after_fetch(&second.records),
        Reconciliation::Refreshed
    );
    assert_eq!(tracker.selected().map(|r| r.status), Some(Status::Ignored));
}

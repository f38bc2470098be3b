//! Backend field names for row objects.

use serde::{Deserialize, Serialize};

fn default_id() -> String {
    String::from("pothole_id")
}

fn default_latitude() -> String {
    String::from("latitude")
}

fn default_longitude() -> String {
    String::from("longitude")
}

fn default_image() -> String {
    String::from("image")
}

fn default_status() -> String {
    String::from("status")
}

fn default_confidence() -> String {
    String::from("confidence")
}

fn default_time() -> String {
    String::from("time")
}

fn default_vehicle_id() -> String {
    String::from("vehicle_id")
}

fn default_label() -> String {
    String::from("label")
}

/// Names of the keys the backend uses in `/rows` objects.
///
/// The identifier and status names are also used as the keys of the
/// status-update request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldNames {
    #[serde(default = "default_id")]
    pub id: String,

    #[serde(default = "default_latitude")]
    pub latitude: String,

    #[serde(default = "default_longitude")]
    pub longitude: String,

    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_confidence")]
    pub confidence: String,

    #[serde(default = "default_time")]
    pub time: String,

    #[serde(default = "default_vehicle_id")]
    pub vehicle_id: String,

    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: default_id(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            image: default_image(),
            status: default_status(),
            confidence: default_confidence(),
            time: default_time(),
            vehicle_id: default_vehicle_id(),
            label: default_label(),
        }
    }
}

impl FieldNames {
    /// Every configured name paired with its setting key, for validation.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("id", &self.id),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
            ("image", &self.image),
            ("status", &self.status),
            ("confidence", &self.confidence),
            ("time", &self.time),
            ("vehicle_id", &self.vehicle_id),
            ("label", &self.label),
        ]
    }
}

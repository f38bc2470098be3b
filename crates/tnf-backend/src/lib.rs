//! # tnf-backend
//!
//! Transport for the two backend endpoints the dashboard consumes:
//! - `GET /rows`: every detection row as a JSON array
//! - `POST /update_status`: set one record's status
//!
//! [`RecordsBackend`] is the seam the sync controller is written against;
//! [`HttpBackend`] is the reqwest implementation.

mod error;
mod http;

pub use error::BackendError;

use std::future::Future;
use std::time::Duration;

use serde_json::{Map, Value};
use tnf_config::BackendConfig;
use tnf_core::enums::Status;
use tnf_core::fields::FieldNames;
use tnf_core::record::RecordId;

use crate::http::check_response;

/// Read and write access to the record store.
///
/// Payloads are returned un-normalized; shaping rows into records is the
/// caller's job.
pub trait RecordsBackend {
    /// Fetch the raw `/rows` payload.
    fn fetch_rows(&self) -> impl Future<Output = Result<Value, BackendError>> + Send;

    /// Ask the backend to set the status of record `id`.
    fn update_status(
        &self,
        id: &RecordId,
        status: Status,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

/// HTTP client for a single backend origin.
pub struct HttpBackend {
    http: reqwest::Client,
    rows_url: String,
    update_url: String,
    fields: FieldNames,
}

impl HttpBackend {
    /// Create a backend client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(config: &BackendConfig, fields: FieldNames) -> Self {
        Self::try_new(config, fields).expect("reqwest client should build")
    }

    /// Fallible variant of [`Self::new`].
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the reqwest client cannot be built.
    pub fn try_new(config: &BackendConfig, fields: FieldNames) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            rows_url: config.rows_url(),
            update_url: config.update_url(),
            fields,
        })
    }

    #[must_use]
    pub fn rows_url(&self) -> &str {
        &self.rows_url
    }

    /// JSON body for a status update, keyed by the configured field names.
    fn update_body(&self, id: &RecordId, status: Status) -> Value {
        let id = match id {
            RecordId::Number(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.as_str()),
        };
        let mut body = Map::new();
        body.insert(self.fields.id.clone(), id);
        body.insert(self.fields.status.clone(), Value::from(status.as_str()));
        Value::Object(body)
    }
}

impl RecordsBackend for HttpBackend {
    async fn fetch_rows(&self) -> Result<Value, BackendError> {
        tracing::debug!(url = %self.rows_url, "fetching rows");
        let resp = check_response(self.http.get(&self.rows_url).send().await?).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn update_status(&self, id: &RecordId, status: Status) -> Result<(), BackendError> {
        tracing::debug!(url = %self.update_url, %id, %status, "updating status");
        let body = self.update_body(id, status);
        check_response(self.http.post(&self.update_url).json(&body).send().await?).await?;
        Ok(())
    }
}

//! The sync controller state machine.
//!
//! ```text
//! Idle ──fetch──▶ Fetching ──ok/err──▶ Idle
//! Idle ──begin_status_update──▶ Mutating ──write ok/err──▶ Fetching ──▶ Idle
//! ```
//!
//! A failed fetch keeps the previous live set. A failed write is logged and
//! still followed by a refetch; the optimistic patch is never rolled back
//! explicitly, only overwritten by whatever the refetch returns.

use chrono::{Local, Utc};
use serde::Serialize;
use tnf_backend::RecordsBackend;
use tnf_config::{TimezoneSetting, TnfConfig};
use tnf_core::enums::{SelectionPolicy, Status};
use tnf_core::fields::FieldNames;
use tnf_core::normalize::{NormalizeReport, normalize_payload_in};
use tnf_core::record::RecordId;
use tnf_core::selection::Reconciliation;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    Fetching,
    Mutating,
}

/// Result of one `fetch()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The live set was replaced.
    Replaced {
        kept: usize,
        dropped: usize,
        selection: Reconciliation,
    },
    /// The read failed; the previous live set is still in place.
    Failed { reason: String },
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

/// Result of the write half of a status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "write", rename_all = "snake_case")]
pub enum WriteResult {
    Accepted,
    Rejected { reason: String },
}

/// A status update whose optimistic half has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use = "a pending update does nothing until finish_status_update is awaited"]
pub struct PendingUpdate {
    pub id: RecordId,
    pub status: Status,
    /// Whether the selected record was patched locally.
    pub optimistic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub id: RecordId,
    pub status: Status,
    pub optimistic: bool,
    pub write: WriteResult,
    pub refetch: FetchOutcome,
}

/// Settings the controller needs beyond the backend itself.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub fields: FieldNames,
    pub selection_policy: SelectionPolicy,
    pub timezone: TimezoneSetting,
}

impl From<&TnfConfig> for SyncOptions {
    fn from(config: &TnfConfig) -> Self {
        Self {
            fields: config.fields.clone(),
            selection_policy: config.general.selection_policy,
            timezone: config.general.timezone,
        }
    }
}

pub struct SyncController<B> {
    backend: B,
    fields: FieldNames,
    state: AppState,
    phase: SyncPhase,
}

impl<B: RecordsBackend> SyncController<B> {
    #[must_use]
    pub fn new(backend: B, options: SyncOptions) -> Self {
        Self {
            backend,
            fields: options.fields,
            state: AppState::new(options.selection_policy, options.timezone),
            phase: SyncPhase::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Mutable access for user-driven changes (filters, selection).
    pub const fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    #[must_use]
    pub const fn phase(&self) -> SyncPhase {
        self.phase
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Initial load.
    pub async fn start(&mut self) -> FetchOutcome {
        self.fetch().await
    }

    /// Read every row, normalize, and replace the live set.
    ///
    /// Never fails outright: on error the previous live set is kept and the
    /// reason is reported in [`FetchOutcome::Failed`].
    pub async fn fetch(&mut self) -> FetchOutcome {
        self.phase = SyncPhase::Fetching;
        let result = self.backend.fetch_rows().await;
        self.phase = SyncPhase::Idle;

        match result {
            Ok(payload) => {
                let report = self.normalize(&payload);
                let (kept, dropped) = (report.kept(), report.dropped);
                let selection = self.state.replace_live(report.records, Utc::now());
                tracing::info!(kept, dropped, ?selection, "live set replaced");
                FetchOutcome::Replaced {
                    kept,
                    dropped,
                    selection,
                }
            }
            Err(error) => {
                tracing::warn!(%error, retained = self.state.live().len(), "fetch failed, keeping previous records");
                FetchOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }

    /// Apply the optimistic half of a status update and enter `Mutating`.
    ///
    /// Synchronous, so callers can render the patched selection before the
    /// write resolves.
    pub fn begin_status_update(&mut self, id: RecordId, status: Status) -> PendingUpdate {
        let optimistic = self.state.selection_mut().patch_status(&id, status);
        tracing::debug!(%id, %status, optimistic, "status update started");
        self.phase = SyncPhase::Mutating;
        PendingUpdate {
            id,
            status,
            optimistic,
        }
    }

    /// Issue the write for `pending`, then refetch whatever the write did.
    pub async fn finish_status_update(&mut self, pending: PendingUpdate) -> MutationOutcome {
        let PendingUpdate {
            id,
            status,
            optimistic,
        } = pending;

        self.phase = SyncPhase::Mutating;
        let write = match self.backend.update_status(&id, status).await {
            Ok(()) => {
                tracing::info!(%id, %status, "status update accepted");
                WriteResult::Accepted
            }
            Err(error) => {
                tracing::warn!(%id, %status, %error, "status update failed");
                WriteResult::Rejected {
                    reason: error.to_string(),
                }
            }
        };

        let refetch = self.fetch().await;

        MutationOutcome {
            id,
            status,
            optimistic,
            write,
            refetch,
        }
    }

    /// Optimistic patch, write, then unconditional refetch.
    pub async fn update_status(&mut self, id: RecordId, status: Status) -> MutationOutcome {
        let pending = self.begin_status_update(id, status);
        self.finish_status_update(pending).await
    }

    fn normalize(&self, payload: &serde_json::Value) -> NormalizeReport {
        match self.state.timezone() {
            TimezoneSetting::Local => normalize_payload_in(payload, &self.fields, &Local),
            TimezoneSetting::Utc => normalize_payload_in(payload, &self.fields, &Utc),
        }
    }
}

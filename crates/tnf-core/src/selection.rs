//! Detail-panel selection.
//!
//! The tracker holds its own copy of the selected record so an optimistic
//! status patch can show up before the live set is refreshed. After every
//! live-set replacement the copy is reconciled according to the
//! [`SelectionPolicy`].

use serde::Serialize;

use crate::enums::{SelectionPolicy, Status};
use crate::record::{Record, RecordId};

/// What [`SelectionTracker::reconcile_after_fetch`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconciliation {
    /// Nothing was selected.
    Empty,
    /// The identity was found and the held copy replaced with the fresh row.
    Refreshed,
    /// The identity is gone and the selection was cleared.
    Cleared,
    /// The held copy was kept as-is (`RetainDetached`).
    Retained,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: Option<Record>,
    policy: SelectionPolicy,
}

impl SelectionTracker {
    #[must_use]
    pub const fn new(policy: SelectionPolicy) -> Self {
        Self {
            selected: None,
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&RecordId> {
        self.selected.as_ref().map(|record| &record.id)
    }

    pub fn select(&mut self, record: &Record) {
        tracing::debug!(id = %record.id, "selected record");
        self.selected = Some(record.clone());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Revalidate the selection against a freshly replaced live set.
    pub fn reconcile_after_fetch(&mut self, live: &[Record]) -> Reconciliation {
        let Some(held) = self.selected.as_ref() else {
            return Reconciliation::Empty;
        };

        match self.policy {
            SelectionPolicy::RetainDetached => Reconciliation::Retained,
            SelectionPolicy::Reresolve => {
                if let Some(fresh) = live.iter().find(|record| record.id == held.id) {
                    self.selected = Some(fresh.clone());
                    Reconciliation::Refreshed
                } else {
                    tracing::debug!(id = %held.id, "selected record no longer present");
                    self.selected = None;
                    Reconciliation::Cleared
                }
            }
        }
    }

    /// Optimistically set the status of the selected record if it is `id`.
    ///
    /// Returns whether the held copy changed.
    pub fn patch_status(&mut self, id: &RecordId, status: Status) -> bool {
        match self.selected.as_mut() {
            Some(record) if &record.id == id => {
                record.status = status;
                true
            }
            _ => false,
        }
    }
}

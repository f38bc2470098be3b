use chrono::{DateTime, Local, Utc};
use tnf_config::TimezoneSetting;
use tnf_core::enums::SelectionPolicy;
use tnf_core::filter::{FilterSettings, FilteredView, apply_in};
use tnf_core::record::{Record, RecordId};
use tnf_core::selection::{Reconciliation, SelectionTracker};

/// Process-wide dashboard state.
///
/// The live set is only replaced by the sync controller; filters and the
/// selection change on user interaction.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    live: Vec<Record>,
    filters: FilterSettings,
    selection: SelectionTracker,
    timezone: TimezoneSetting,
    last_fetched_at: Option<DateTime<Utc>>,
}

impl AppState {
    #[must_use]
    pub fn new(policy: SelectionPolicy, timezone: TimezoneSetting) -> Self {
        Self {
            selection: SelectionTracker::new(policy),
            timezone,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn live(&self) -> &[Record] {
        &self.live
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSettings {
        &self.filters
    }

    pub const fn filters_mut(&mut self) -> &mut FilterSettings {
        &mut self.filters
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub(crate) const fn selection_mut(&mut self) -> &mut SelectionTracker {
        &mut self.selection
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Record> {
        self.selection.selected()
    }

    #[must_use]
    pub const fn timezone(&self) -> TimezoneSetting {
        self.timezone
    }

    /// When the live set was last replaced; `None` before the first fetch.
    #[must_use]
    pub const fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.last_fetched_at
    }

    /// Select the live record with identity `id`.
    ///
    /// Leaves the current selection alone and returns `None` if no such
    /// record exists.
    pub fn select(&mut self, id: &RecordId) -> Option<&Record> {
        let record = self.live.iter().find(|record| &record.id == id)?;
        self.selection.select(record);
        self.selection.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The filtered view for the current live set and filters.
    #[must_use]
    pub fn view(&self) -> FilteredView<'_> {
        match self.timezone {
            TimezoneSetting::Local => apply_in(&self.live, &self.filters, &Local),
            TimezoneSetting::Utc => apply_in(&self.live, &self.filters, &Utc),
        }
    }

    /// Swap in a new live set and revalidate the selection against it.
    pub(crate) fn replace_live(
        &mut self,
        records: Vec<Record>,
        fetched_at: DateTime<Utc>,
    ) -> Reconciliation {
        self.live = records;
        self.last_fetched_at = Some(fetched_at);
        self.selection.reconcile_after_fetch(&self.live)
    }
}

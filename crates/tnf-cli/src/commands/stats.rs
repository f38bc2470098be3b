use chrono::{DateTime, Utc};
use serde::Serialize;
use tnf_config::TnfConfig;
use tnf_core::filter::{Aggregates, FilterSettings};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FilterArgs;
use crate::commands::shared;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatsResponse {
    #[serde(flatten)]
    counts: Aggregates,
    /// Size of the unfiltered live set.
    live: usize,
    dropped: usize,
    filters: FilterSettings,
    fetched_at: Option<DateTime<Utc>>,
}

/// Handle `tnf stats`.
pub async fn handle(
    args: &FilterArgs,
    config: &TnfConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filters = shared::filter_settings(args)?;
    let mut ctl = shared::controller(config)?;
    let outcome = shared::load(&mut ctl).await?;
    *ctl.state_mut().filters_mut() = filters;

    let state = ctl.state();
    let response = StatsResponse {
        counts: state.view().counts,
        live: state.live().len(),
        dropped: shared::dropped(&outcome),
        filters: state.filters().clone(),
        fetched_at: state.last_fetched_at(),
    };

    output(&response, flags.format)
}

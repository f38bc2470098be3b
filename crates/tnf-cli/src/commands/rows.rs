use chrono::{DateTime, Utc};
use serde::Serialize;
use tnf_config::TnfConfig;
use tnf_core::filter::{Aggregates, FilterSettings};

use crate::cli::root_commands::FilterArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::{self, RowView};
use crate::output::output;

#[derive(Debug, Serialize)]
struct RowsResponse {
    counts: Aggregates,
    filters: FilterSettings,
    dropped: usize,
    fetched_at: Option<DateTime<Utc>>,
    rows: Vec<RowView>,
}

/// Handle `tnf rows`.
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
    let view = state.view();
    let tz = state.timezone();
    let response = RowsResponse {
        counts: view.counts,
        filters: state.filters().clone(),
        dropped: shared::dropped(&outcome),
        fetched_at: state.last_fetched_at(),
        rows: view.records.iter().map(|r| RowView::new(r, tz)).collect(),
    };

    if flags.format == OutputFormat::Table {
        output(&response.rows, flags.format)?;
        if !flags.quiet {
            println!("\n{}", summary_line(&response.counts, response.dropped));
        }
        return Ok(());
    }

    output(&response, flags.format)
}

fn summary_line(counts: &Aggregates, dropped: usize) -> String {
    let mut line = format!(
        "{} shown: {} pending, {} reviewed, {} ignored, {} fixed",
        counts.total, counts.pending, counts.reviewed, counts.ignored, counts.fixed
    );
    if dropped > 0 {
        line.push_str(&format!(" ({dropped} malformed rows skipped)"));
    }
    line
}

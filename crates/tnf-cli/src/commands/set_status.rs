use anyhow::bail;
use serde::Serialize;
use tnf_config::TnfConfig;
use tnf_core::enums::Status;
use tnf_core::record::RecordId;
use tnf_sync::{FetchOutcome, WriteResult};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SetStatusArgs;
use crate::commands::shared::{self, DetailView};
use crate::output::output;

#[derive(Debug, Serialize)]
struct SetStatusResponse {
    id: RecordId,
    status: Status,
    /// The selection as shown while the write was in flight.
    optimistic: Option<DetailView>,
    #[serde(flatten)]
    write: WriteResult,
    refetch: FetchOutcome,
    /// The selection after the refetch.
    selection: Option<DetailView>,
}

/// Handle `tnf set-status`.
pub async fn handle(
    args: &SetStatusArgs,
    config: &TnfConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut ctl = shared::controller(config)?;
    shared::load(&mut ctl).await?;

    let tz = ctl.state().timezone();
    if ctl.state_mut().select(&args.id).is_none() {
        tracing::warn!(id = %args.id, "record not in the live set, writing without a local patch");
    }

    let pending = ctl.begin_status_update(args.id.clone(), args.status);
    let optimistic = ctl
        .state()
        .selected()
        .filter(|_| pending.optimistic)
        .map(|record| DetailView::new(record, tz, false));

    let outcome = ctl.finish_status_update(pending).await;
    let response = SetStatusResponse {
        id: outcome.id,
        status: outcome.status,
        optimistic,
        write: outcome.write,
        refetch: outcome.refetch,
        selection: ctl
            .state()
            .selected()
            .map(|record| DetailView::new(record, tz, false)),
    };

    output(&response, flags.format)?;

    if let WriteResult::Rejected { reason } = &response.write {
        bail!("status update for {} was rejected: {reason}", response.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tnf_core::selection::Reconciliation;

    use super::*;

    #[test]
    fn write_result_is_flattened() {
        let response = SetStatusResponse {
            id: RecordId::Number(3),
            status: Status::Fixed,
            optimistic: None,
            write: WriteResult::Rejected {
                reason: "API error (HTTP 403): read-only sheet".into(),
            },
            refetch: FetchOutcome::Replaced {
                kept: 2,
                dropped: 0,
                selection: Reconciliation::Empty,
            },
            selection: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["write"], json!("rejected"));
        assert_eq!(value["reason"], json!("API error (HTTP 403): read-only sheet"));
        assert_eq!(value["refetch"]["outcome"], json!("replaced"));
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["status"], json!("fixed"));
    }
}

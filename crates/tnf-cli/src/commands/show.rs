use anyhow::bail;
use tnf_config::TnfConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::commands::shared::{self, DetailView};
use crate::output::output;

/// Handle `tnf show`.
pub async fn handle(args: &ShowArgs, config: &TnfConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut ctl = shared::controller(config)?;
    shared::load(&mut ctl).await?;

    let tz = ctl.state().timezone();
    let Some(record) = ctl.state_mut().select(&args.id) else {
        bail!("no record with id {}", args.id);
    };

    output(&DetailView::new(record, tz, args.with_image), flags.format)
}

use tnf_config::TnfConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &TnfConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Rows(args) => commands::rows::handle(&args, config, flags).await,
        Commands::Stats(args) => commands::stats::handle(&args, config, flags).await,
        Commands::Show(args) => commands::show::handle(&args, config, flags).await,
        Commands::SetStatus(args) => commands::set_status::handle(&args, config, flags).await,
    }
}

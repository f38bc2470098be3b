use anyhow::Context;
use tnf_config::TnfConfig;

use crate::cli::GlobalFlags;

/// Load layered config, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TnfConfig> {
    let config = TnfConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(config, flags)
}

fn apply_overrides(mut config: TnfConfig, flags: &GlobalFlags) -> anyhow::Result<TnfConfig> {
    if let Some(base_url) = &flags.backend {
        tracing::debug!(%base_url, "backend overridden from command line");
        config.backend.base_url.clone_from(base_url);
        config
            .validate()
            .context("invalid --backend override")?;
    }
    Ok(config)
}

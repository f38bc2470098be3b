//! General client behavior.

use serde::{Deserialize, Serialize};
use tnf_core::enums::SelectionPolicy;

/// Zone used for naive row timestamps and for the date-filter day bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneSetting {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// How the selected record is treated when the live set is replaced.
    #[serde(default)]
    pub selection_policy: SelectionPolicy,

    #[serde(default)]
    pub timezone: TimezoneSetting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.selection_policy, SelectionPolicy::Reresolve);
        assert_eq!(config.timezone, TimezoneSetting::Local);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    #[serde(alias = "tick-rate-ms")]
    pub tick_rate_ms: u64,
    #[serde(alias = "list-timeout-ms")]
    pub list_timeout_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250, list_timeout_ms: 500 }
    }
}

impl GeneralConfig {
    /// Replaces zero durations with their defaults. A zero tick would stall the
    /// event loop and a zero listing timeout fails every context.
    pub(crate) fn sanitize(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut warnings = Vec::new();
        if self.tick_rate_ms == 0 {
            warnings.push(format!("general.tick_rate_ms must be positive; using {}", defaults.tick_rate_ms));
            self.tick_rate_ms = defaults.tick_rate_ms;
        }
        if self.list_timeout_ms == 0 {
            warnings.push(format!("general.list_timeout_ms must be positive; using {}", defaults.list_timeout_ms));
            self.list_timeout_ms = defaults.list_timeout_ms;
        }
        warnings
    }
}

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub runtime_checks: RuntimeChecks,
}

/// General store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Name used in log lines (e.g., "APM Demo App").
    #[serde(default = "default_name")]
    pub name: String,
    /// Dispatches slower than this are logged at warn level; 0 disables (default: 16).
    #[serde(default = "default_slow_dispatch_warn_ms")]
    pub slow_dispatch_warn_ms: u64,
}

/// Checks run on every registration and dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeChecks {
    /// Reject action types that reuse a tag owned by another type (default: true).
    #[serde(default = "default_true")]
    pub strict_action_types: bool,
}

fn default_name() -> String {
    "slicestore".to_string()
}

fn default_slow_dispatch_warn_ms() -> u64 {
    16
}

fn default_true() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            slow_dispatch_warn_ms: default_slow_dispatch_warn_ms(),
        }
    }
}

impl Default for RuntimeChecks {
    fn default() -> Self {
        Self {
            strict_action_types: default_true(),
        }
    }
}

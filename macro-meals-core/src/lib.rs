//! Macro Meals Core Library
//!
//! Update gating for the Macro Meals client: version comparison, remote
//! threshold resolution, the force/soft update policy, and the snooze record.

pub mod flags;
pub mod hooks;
pub mod policy;
pub mod remote_config;
pub mod snooze;
pub mod storage;
pub mod telemetry;
pub mod thresholds;
pub mod version;

pub use flags::parse_boolean_flag;
pub use hooks::{
    Alert, AlertButton, AlertPresenter, ButtonStyle, LinkOpener, NoopPresenter, UserAction,
};
pub use policy::{
    EngineHooks, PolicySettings, PolicyState, UpdateDecision, UpdatePolicyEngine, UpdatePrompt,
};
pub use remote_config::{ConfigMap, RemoteConfig, RemoteConfigError, StaticRemoteConfig};
pub use snooze::{SnoozeStore, DEFAULT_SNOOZE_COOLDOWN, SNOOZE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use telemetry::{ErrorReporter, TracingReporter};
pub use thresholds::{resolve_thresholds, Platform, UpdateThresholds};
pub use version::{compare_versions, MalformedVersionPolicy, Version, VersionError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

//! Remote configuration seam.
//!
//! The mobile client reads its update thresholds from a remote-config service.
//! The engine only needs a flat string map, so any source that can produce one
//! (an SDK bridge, a file, a test fixture) implements [`RemoteConfig`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Flat string-keyed configuration values.
pub type ConfigMap = HashMap<String, String>;

/// Keys read by the update gate.
pub mod keys {
    pub const IOS_MIN_SUPPORTED_BUILD: &str = "ios_min_supported_build";
    pub const IOS_LATEST_BUILD: &str = "ios_latest_build";
    pub const ANDROID_MIN_SUPPORTED_VERSION_CODE: &str = "android_min_supported_version_code";
    pub const ANDROID_LATEST_VERSION_CODE: &str = "android_latest_version_code";
    pub const UPDATE_URL_IOS: &str = "update_url_ios";
    pub const UPDATE_URL_ANDROID: &str = "update_url_android";
    pub const UPDATE_TITLE: &str = "update_title";
    pub const UPDATE_DESCRIPTION: &str = "update_description";
    pub const SOFT_UPDATE: &str = "soft_update";
    pub const FORCE_UPDATE: &str = "force_update";
}

/// Errors surfaced by a remote configuration source.
#[derive(Debug, thiserror::Error)]
pub enum RemoteConfigError {
    #[error("Remote config is not initialized")]
    NotInitialized,
    #[error("Failed to fetch remote config: {0}")]
    Fetch(String),
}

/// A source of remote configuration values.
pub trait RemoteConfig {
    /// Whether the source has finished its own initialization.
    fn is_ready(&self) -> bool {
        true
    }

    /// Read every value currently known to the source.
    fn fetch(&self) -> impl Future<Output = Result<ConfigMap, RemoteConfigError>> + Send;
}

impl<T: RemoteConfig + Send + Sync> RemoteConfig for Arc<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn fetch(&self) -> impl Future<Output = Result<ConfigMap, RemoteConfigError>> + Send {
        (**self).fetch()
    }
}

/// In-memory remote configuration, populated by the host.
#[derive(Debug, Default)]
pub struct StaticRemoteConfig {
    values: RwLock<ConfigMap>,
    ready: AtomicBool,
}

impl StaticRemoteConfig {
    /// Creates a ready source holding `values`.
    pub fn new(values: ConfigMap) -> Self {
        Self {
            values: RwLock::new(values),
            ready: AtomicBool::new(true),
        }
    }

    /// Creates a source that reports itself uninitialized until
    /// [`mark_ready`](Self::mark_ready) is called.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }

    /// Set or replace a single value.
    pub fn set_value(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
    }
}

impl FromIterator<(String, String)> for StaticRemoteConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RemoteConfig for StaticRemoteConfig {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn fetch(&self) -> Result<ConfigMap, RemoteConfigError> {
        if !self.is_ready() {
            return Err(RemoteConfigError::NotInitialized);
        }
        self.values
            .read()
            .map(|values| values.clone())
            .map_err(|e| RemoteConfigError::Fetch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_config_fetch() {
        let config = StaticRemoteConfig::new(ConfigMap::new());
        config.set_value(keys::FORCE_UPDATE, "true");

        let values = config.fetch().await.unwrap();
        assert_eq!(values.get(keys::FORCE_UPDATE).map(String::as_str), Some("true"));
    }

    #[tokio::test]
    async fn test_uninitialized_config_fails() {
        let config = StaticRemoteConfig::uninitialized();
        assert!(!config.is_ready());
        assert!(matches!(
            config.fetch().await,
            Err(RemoteConfigError::NotInitialized)
        ));

        config.mark_ready();
        assert!(config.fetch().await.unwrap().is_empty());
    }
}

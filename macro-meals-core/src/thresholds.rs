//! Platform-specific update thresholds.

use serde::{Deserialize, Serialize};

use crate::remote_config::{keys, ConfigMap};

/// Version assumed when remote configuration leaves a threshold unset.
pub const DEFAULT_THRESHOLD_VERSION: &str = "1.0.0";

/// Host platform the app is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            _ => Err(format!("Unknown platform '{}' (expected ios or android)", s)),
        }
    }
}

/// The active `{min, latest, url}` triple for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateThresholds {
    /// Versions below this must update.
    pub min_supported: String,
    /// Versions below this may update.
    pub latest: String,
    /// Store page for the platform.
    pub update_url: Option<String>,
}

/// Pick the thresholds for `platform` out of a flat configuration map.
pub fn resolve_thresholds(config: &ConfigMap, platform: Platform) -> UpdateThresholds {
    let (min_key, latest_key, url_key) = match platform {
        Platform::Ios => (
            keys::IOS_MIN_SUPPORTED_BUILD,
            keys::IOS_LATEST_BUILD,
            keys::UPDATE_URL_IOS,
        ),
        Platform::Android => (
            keys::ANDROID_MIN_SUPPORTED_VERSION_CODE,
            keys::ANDROID_LATEST_VERSION_CODE,
            keys::UPDATE_URL_ANDROID,
        ),
    };

    UpdateThresholds {
        min_supported: version_or_default(config, min_key),
        latest: version_or_default(config, latest_key),
        update_url: non_empty(config, url_key).map(str::to_string),
    }
}

fn version_or_default(config: &ConfigMap, key: &str) -> String {
    non_empty(config, key)
        .unwrap_or(DEFAULT_THRESHOLD_VERSION)
        .to_string()
}

fn non_empty<'a>(config: &'a ConfigMap, key: &str) -> Option<&'a str> {
    config
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> ConfigMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_ios() {
        let config = config(&[
            ("ios_min_supported_build", "1.4.0"),
            ("ios_latest_build", "1.6.2"),
            ("update_url_ios", "https://apps.apple.com/app/id1"),
            ("android_min_supported_version_code", "40"),
            ("android_latest_version_code", "45"),
        ]);

        let thresholds = resolve_thresholds(&config, Platform::Ios);
        assert_eq!(thresholds.min_supported, "1.4.0");
        assert_eq!(thresholds.latest, "1.6.2");
        assert_eq!(
            thresholds.update_url.as_deref(),
            Some("https://apps.apple.com/app/id1")
        );
    }

    #[test]
    fn test_resolve_android() {
        let config = config(&[
            ("ios_min_supported_build", "1.4.0"),
            ("android_min_supported_version_code", "40"),
            ("android_latest_version_code", "45"),
            ("update_url_android", "https://play.google.com/store/apps"),
        ]);

        let thresholds = resolve_thresholds(&config, Platform::Android);
        assert_eq!(thresholds.min_supported, "40");
        assert_eq!(thresholds.latest, "45");
        assert_eq!(
            thresholds.update_url.as_deref(),
            Some("https://play.google.com/store/apps")
        );
    }

    #[test]
    fn test_missing_and_empty_fields_default() {
        let config = config(&[("ios_latest_build", ""), ("update_url_ios", "  ")]);

        let thresholds = resolve_thresholds(&config, Platform::Ios);
        assert_eq!(thresholds.min_supported, DEFAULT_THRESHOLD_VERSION);
        assert_eq!(thresholds.latest, DEFAULT_THRESHOLD_VERSION);
        assert_eq!(thresholds.update_url, None);
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert!("web".parse::<Platform>().is_err());
    }
}

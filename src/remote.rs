//! Remote config read from a local YAML file.
//!
//! Stands in for the remote-config service when running from a terminal.
//! The file is a flat mapping; scalar values are stringified the way the
//! service delivers them, so `force_update: true` reads as `"true"`.
//! Fractional numbers are refused: YAML has already read `1.10` as `1.1`, so
//! versions with a single dot must be quoted.
//!
//! ```yaml
//! force_update: false
//! soft_update: true
//! ios_min_supported_build: 1.0.0
//! ios_latest_build: 1.3.0
//! update_url_ios: https://apps.apple.com/app/macro-meals
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use macro_meals_core::{ConfigMap, RemoteConfig, RemoteConfigError};
use serde_yaml::Value;

#[derive(Debug, Clone)]
pub struct FileRemoteConfig {
    path: PathBuf,
}

impl FileRemoteConfig {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> Result<ConfigMap, RemoteConfigError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            RemoteConfigError::Fetch(format!("{}: {}", self.path.display(), e))
        })?;
        if contents.trim().is_empty() {
            return Ok(ConfigMap::new());
        }

        let raw: BTreeMap<String, Value> = serde_yaml::from_str(&contents).map_err(|e| {
            RemoteConfigError::Fetch(format!("{}: {}", self.path.display(), e))
        })?;

        let mut values = ConfigMap::new();
        for (key, value) in raw {
            match scalar_to_string(&key, &value) {
                Ok(Some(s)) => {
                    values.insert(key, s);
                }
                Ok(None) => {}
                Err(e) => {
                    return Err(RemoteConfigError::Fetch(format!(
                        "{}: {}",
                        self.path.display(),
                        e
                    )));
                }
            }
        }
        Ok(values)
    }
}

/// Stringify a YAML scalar as delivered by the remote config service.
///
/// Strings, booleans and integers pass through, `~` is absent. Fractional
/// numbers and collections are errors.
pub(crate) fn scalar_to_string(key: &str, value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Some(n.to_string())),
        Value::Number(n) => Err(format!(
            "'{}' was read as the number {}; quote version values, e.g. {}: \"1.10\"",
            key, n, key
        )),
        Value::Null => Ok(None),
        other => Err(format!("'{}' is not a scalar value: {:?}", key, other)),
    }
}

impl RemoteConfig for FileRemoteConfig {
    fn is_ready(&self) -> bool {
        self.path.exists()
    }

    async fn fetch(&self) -> Result<ConfigMap, RemoteConfigError> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_scalars_are_stringified() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("remote.yaml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "force_update: true").unwrap();
        writeln!(file, "soft_update: \"false\"").unwrap();
        writeln!(file, "android_latest_version_code: 45").unwrap();
        writeln!(file, "ios_latest_build: 1.3.0").unwrap();
        writeln!(file, "update_url_ios: ~").unwrap();

        let remote = FileRemoteConfig::new(path);
        assert!(remote.is_ready());
        let values = remote.fetch().await.unwrap();

        assert_eq!(values["force_update"], "true");
        assert_eq!(values["soft_update"], "false");
        assert_eq!(values["android_latest_version_code"], "45");
        assert_eq!(values["ios_latest_build"], "1.3.0");
        assert!(!values.contains_key("update_url_ios"));
    }

    #[tokio::test]
    async fn test_unquoted_fractional_version_is_refused() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("remote.yaml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "ios_latest_build: 1.10").unwrap();
        writeln!(file, "ios_min_supported_build: 1.0.0").unwrap();

        let err = FileRemoteConfig::new(path).fetch().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ios_latest_build"), "{}", message);
        assert!(message.contains("quote"), "{}", message);
    }

    #[tokio::test]
    async fn test_quoted_fractional_version_is_kept() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("remote.yaml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "ios_latest_build: \"1.10\"").unwrap();

        let values = FileRemoteConfig::new(path).fetch().await.unwrap();
        assert_eq!(values["ios_latest_build"], "1.10");
    }

    fn yaml(raw: &str) -> Value {
        serde_yaml::from_str(raw).unwrap()
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(
            scalar_to_string("k", &yaml("41")).unwrap().as_deref(),
            Some("41")
        );
        assert_eq!(
            scalar_to_string("k", &yaml("true")).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(scalar_to_string("k", &yaml("~")).unwrap(), None);
        assert!(scalar_to_string("k", &yaml("1.4")).is_err());
        assert!(scalar_to_string("k", &yaml("[1, 2]")).is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_ready() {
        let temp_dir = tempdir().unwrap();
        let remote = FileRemoteConfig::new(temp_dir.path().join("missing.yaml"));

        assert!(!remote.is_ready());
        assert!(remote.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_file_is_empty_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("remote.yaml");
        std::fs::write(&path, "").unwrap();

        let values = FileRemoteConfig::new(path).fetch().await.unwrap();
        assert!(values.is_empty());
    }
}

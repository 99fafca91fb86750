use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const CONFIG_DIR_NAME: &str = "artistry";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/style-transfer/";

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialization error: {0}")]
    Ser(#[from] toml::ser::Error),
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub backend: BackendPreferences,
    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            backend: BackendPreferences::default(),
            ui: UiPreferences::default(),
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Where and how style transfer requests are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendPreferences {
    #[serde(default = "BackendPreferences::default_endpoint")]
    pub endpoint: String,
    /// Whole-request timeout. Absent means the transport decides.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendPreferences {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            request_timeout_secs: None,
        }
    }
}

impl BackendPreferences {
    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: ThemePreference,
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Load the configuration from the default location, falling back to defaults.
pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Load the configuration from `path`. Never fails; problems become warnings.
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(cfg) => {
                    let (cfg, mut sanitize_warnings) = sanitize_config(cfg);
                    warnings.append(&mut sanitize_warnings);
                    return ConfigLoadResult {
                        config: cfg,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {} as TOML: {}. Falling back to defaults.",
                        path.display(),
                        err
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {}. Falling back to defaults.",
                    path.display(),
                    err
                ));
            }
        }
    }

    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

/// Persist the configuration to the default location.
pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &FileConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)?;
    Ok(())
}

/// Whether `endpoint` is an absolute http(s) URL.
pub fn is_valid_endpoint(endpoint: &str) -> bool {
    Url::parse(endpoint.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

fn sanitize_config(mut config: FileConfig) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.schema_version != CURRENT_SCHEMA_VERSION {
        warnings.push(format!(
            "Unknown config schema version {}. Resetting to {}.",
            config.schema_version, CURRENT_SCHEMA_VERSION
        ));
        return (FileConfig::default(), warnings);
    }

    let endpoint = config.backend.endpoint.trim().to_string();
    if is_valid_endpoint(&endpoint) {
        config.backend.endpoint = endpoint;
    } else {
        warnings.push(format!(
            "Invalid backend endpoint '{}'. Using {}.",
            config.backend.endpoint, DEFAULT_ENDPOINT
        ));
        config.backend.endpoint = DEFAULT_ENDPOINT.to_string();
    }

    if config.backend.request_timeout_secs == Some(0) {
        warnings.push("Request timeout of 0 seconds ignored.".to_string());
        config.backend.request_timeout_secs = None;
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let result = load_config_from(&dir.path().join("config.toml"));
        assert_eq!(result.source, ConfigSource::Default);
        assert!(result.warnings.is_empty());
        assert_eq!(result.config, FileConfig::default());
        assert_eq!(result.config.backend.endpoint, DEFAULT_ENDPOINT);
        assert!(result.config.backend.request_timeout().is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let mut config = FileConfig::default();
        config.backend.endpoint = "https://styles.example.com/style-transfer/".to_string();
        config.backend.request_timeout_secs = Some(90);
        config.ui.theme = ThemePreference::Light;

        save_config_to(&config, &path).expect("save");
        let result = load_config_from(&path);

        assert_eq!(result.source, ConfigSource::File);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.config, config);
        assert_eq!(result.config.backend.request_timeout(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_bad_toml_falls_back() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend = [this is not toml").expect("write");

        let result = load_config_from(&path);
        assert_eq!(result.source, ConfigSource::Default);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Failed to parse"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ntheme = \"light\"\n").expect("write");

        let result = load_config_from(&path);
        assert_eq!(result.source, ConfigSource::File);
        assert_eq!(result.config.ui.theme, ThemePreference::Light);
        assert_eq!(result.config.backend.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_sanitize_invalid_endpoint() {
        let mut config = FileConfig::default();
        config.backend.endpoint = "ftp://example.com/upload".to_string();
        let (config, warnings) = sanitize_config(config);
        assert_eq!(config.backend.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_sanitize_zero_timeout() {
        let mut config = FileConfig::default();
        config.backend.request_timeout_secs = Some(0);
        let (config, warnings) = sanitize_config(config);
        assert!(config.backend.request_timeout_secs.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_sanitize_wrong_schema_version() {
        let mut config = FileConfig::default();
        config.schema_version = 999;
        config.ui.theme = ThemePreference::Light;
        let (config, warnings) = sanitize_config(config);
        assert_eq!(config, FileConfig::default());
        assert!(warnings[0].contains("schema version"));
    }

    #[test]
    fn test_endpoint_validation() {
        assert!(is_valid_endpoint(DEFAULT_ENDPOINT));
        assert!(is_valid_endpoint(" https://example.com/run "));
        assert!(!is_valid_endpoint("example.com/run"));
        assert!(!is_valid_endpoint("file:///tmp/x"));
    }
}

//! Configuration for fetch-events.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_PATH_ENV, ENV_PREFIX, UNKNOWN_SOURCE};
use crate::error::{HelperError, HelperResult};

fn default_unknown_source() -> String {
    UNKNOWN_SOURCE.to_string()
}

fn default_ensure_ascii() -> bool {
    true
}

/// Settings read from `calendar-helper/config.toml` under the platform config
/// directory (`~/Library/Application Support` on macOS, `$XDG_CONFIG_HOME` or
/// `~/.config` on Linux) and CALENDAR_HELPER_* environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct HelperConfig {
    /// Label reported as `calendar.source` when the store has none.
    #[serde(default = "default_unknown_source")]
    pub unknown_source: String,

    /// Escape non-ASCII characters in the JSON output.
    #[serde(default = "default_ensure_ascii")]
    pub ensure_ascii: bool,

    /// Read calendars from this JSON fixture instead of the host store.
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        HelperConfig {
            unknown_source: default_unknown_source(),
            ensure_ascii: default_ensure_ascii(),
            fixture: None,
        }
    }
}

impl HelperConfig {
    /// Config file location, honoring CALENDAR_HELPER_CONFIG.
    pub fn config_path() -> HelperResult<PathBuf> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// `<config dir>/calendar-helper/config.toml`, as given by `dirs::config_dir()`.
    pub fn default_config_path() -> HelperResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HelperError::Config("Could not determine config directory".into()))?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> HelperResult<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from `path` (missing file is fine), then apply environment overrides.
    pub fn load_from(path: &Path) -> HelperResult<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| HelperError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HelperError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HelperConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.unknown_source, "Unknown");
        assert!(config.ensure_ascii);
    }

    #[test]
    fn test_file_values_are_read() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "unknown_source = \"Local\"\nensure_ascii = false\nfixture = \"/tmp/calendars.json\""
        )
        .unwrap();

        let config = HelperConfig::load_from(file.path()).unwrap();

        assert_eq!(config.unknown_source, "Local");
        assert!(!config.ensure_ascii);
        assert_eq!(config.fixture, Some(PathBuf::from("/tmp/calendars.json")));
    }

    #[test]
    fn test_default_path_is_under_platform_config_dir() {
        let Some(config_dir) = dirs::config_dir() else {
            return;
        };
        let path = HelperConfig::default_config_path().unwrap();

        assert_eq!(path, config_dir.join("calendar-helper").join("config.toml"));
        #[cfg(target_os = "macos")]
        assert!(path.to_string_lossy().contains("Library/Application Support"));
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "ensure_ascii = [not valid").unwrap();

        let err = HelperConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, HelperError::Config(_)));
    }
}

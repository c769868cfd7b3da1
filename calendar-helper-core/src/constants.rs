/// Source label used when a calendar reports no source.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "calendar-helper";

/// Prefix for environment overrides (CALENDAR_HELPER_FIXTURE, ...).
pub const ENV_PREFIX: &str = "CALENDAR_HELPER";

/// Environment variable pointing at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "CALENDAR_HELPER_CONFIG";

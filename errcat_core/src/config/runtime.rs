// RUNTIME PREFERENCES (environment driven)

use crate::logging::LogLevel;
use serde::Serialize;
use std::env;

/// Environment variable names for configuration
pub mod env_vars {
    // Query
    pub const QUERY_COLLECT_ERRORS: &str = "ERRCAT_QUERY_COLLECT_ERRORS";
    pub const QUERY_TOLERATE_INVALID: &str = "ERRCAT_QUERY_TOLERATE_INVALID";
    pub const QUERY_EXTENDED: &str = "ERRCAT_QUERY_EXTENDED";
    pub const QUERY_PREFER_FE: &str = "ERRCAT_QUERY_PREFER_FE";
    pub const QUERY_LOCALE: &str = "ERRCAT_QUERY_LOCALE";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "ERRCAT_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "ERRCAT_LOGGING_MIN_LEVEL";
    pub const LOGGING_FILTER_DECISIONS: &str = "ERRCAT_LOGGING_FILTER_DECISIONS";
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryPreferences {
    /// Whether validation errors are collected into the report by default
    pub collect_errors: bool,

    /// Whether invalid entries are skipped silently by default
    pub tolerate_invalid: bool,

    /// Whether reports use the extended record format by default
    pub extended: bool,

    /// Whether compact reports prefer the frontend message by default
    pub prefer_frontend_message: bool,

    /// Locale used for report text when none is requested
    /// `None` falls back to the catalog system locale.
    pub locale: Option<String>,
}

impl Default for QueryPreferences {
    fn default() -> Self {
        Self {
            collect_errors: env_flag(env_vars::QUERY_COLLECT_ERRORS),
            tolerate_invalid: env_flag(env_vars::QUERY_TOLERATE_INVALID),
            extended: env_flag(env_vars::QUERY_EXTENDED),
            prefer_frontend_message: env_flag(env_vars::QUERY_PREFER_FE),
            locale: env::var(env_vars::QUERY_LOCALE)
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Minimum level written by the configured logger
    pub min_log_level: LogLevel,

    /// Whether the query engine logs each skipped component and code
    pub log_filter_decisions: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_filter_decisions: env_flag(env_vars::LOGGING_FILTER_DECISIONS),
        }
    }
}

/// Parse a log level name or number, as found in environment variables
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RuntimeConfig {
    pub query: QueryPreferences,
    pub logging: LoggingPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_unset_flag_is_false() {
        assert!(!env_flag("ERRCAT_TEST_FLAG_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_config_serializes() {
        let config = RuntimeConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["query"].get("collect_errors").is_some());
        assert!(json["logging"].get("min_log_level").is_some());
    }
}

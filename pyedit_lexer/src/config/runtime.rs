// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightPreferences {
    /// Thread the "inside string" state across restyle calls of one document
    /// instead of resetting it at the start of every range
    pub carry_string_state: bool,

    /// Style `def` as KEYWORD in both branches instead of the historical CLASSES
    pub consistent_def_style: bool,

    /// Whether to log token/span counts for every classification call
    pub log_metrics: bool,
}

impl Default for HighlightPreferences {
    fn default() -> Self {
        Self {
            carry_string_state: env::var(env_vars::HIGHLIGHT_CARRY_STRING_STATE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            consistent_def_style: env::var(env_vars::HIGHLIGHT_CONSISTENT_DEF_STYLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_metrics: env::var(env_vars::HIGHLIGHT_LOG_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemePreferences {
    /// Theme file to load when an editor attaches a classifier
    pub theme_path: PathBuf,

    /// Whether skipped theme rules are reported through the logger
    pub log_rule_warnings: bool,
}

impl Default for ThemePreferences {
    fn default() -> Self {
        Self {
            theme_path: env::var(env_vars::THEME_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(super::constants::DEFAULT_THEME_PATH)),
            log_rule_warnings: env::var(env_vars::THEME_LOG_WARNINGS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and the CLI)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub highlight: HighlightPreferences,
    pub theme: ThemePreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Highlight
    pub const HIGHLIGHT_CARRY_STRING_STATE: &str = "PYEDIT_HIGHLIGHT_CARRY_STRING_STATE";
    pub const HIGHLIGHT_CONSISTENT_DEF_STYLE: &str = "PYEDIT_HIGHLIGHT_CONSISTENT_DEF_STYLE";
    pub const HIGHLIGHT_LOG_METRICS: &str = "PYEDIT_HIGHLIGHT_LOG_METRICS";

    // Theme
    pub const THEME_PATH: &str = "PYEDIT_THEME_PATH";
    pub const THEME_LOG_WARNINGS: &str = "PYEDIT_THEME_LOG_WARNINGS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "PYEDIT_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "PYEDIT_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "PYEDIT_LOGGING_MIN_LEVEL";
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
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::HIGHLIGHT_CARRY_STRING_STATE.starts_with("PYEDIT_"));
        assert!(env_vars::THEME_PATH.starts_with("PYEDIT_"));
        assert!(env_vars::LOGGING_MIN_LEVEL.starts_with("PYEDIT_"));
    }

    #[test]
    fn test_runtime_config_round_trips_through_serde() {
        let config = RuntimeConfig {
            highlight: HighlightPreferences {
                carry_string_state: true,
                consistent_def_style: false,
                log_metrics: true,
            },
            theme: ThemePreferences {
                theme_path: PathBuf::from("theme.json"),
                log_rule_warnings: false,
            },
            logging: LoggingPreferences {
                use_structured_logging: true,
                enable_console_logging: false,
                min_log_level: LogLevel::Debug,
            },
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert!(back.highlight.carry_string_state);
        assert_eq!(back.theme.theme_path, PathBuf::from("theme.json"));
        assert_eq!(back.logging.min_log_level, LogLevel::Debug);
    }
}

//! # Configuration Module
//!
//! tbmaker is configured entirely through environment variables, read once at startup
//! (after `.env` in the working directory has been loaded).
//!
//! ## Environment Variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `TB_TEMPLATES_PATH` | Override the templates root; must end with `templates/` and contain `classDefinitions/` |
//! | `TB_GENERATORS_PATH` | Override the generators root; must end with `generators/` |
//! | `TB_VERBOSE` | `true` enables verbose logging |
//! | `TB_GENERATOR_FILTER` | Only discover templates whose path contains this substring |
//! | `TB_MAKER_SINGLE` | Only process templates whose path contains this substring |
//! | `TB_LOG_FORMAT` | `pretty` (default) or `json` |
//!
//! Empty values behave exactly like unset ones.
//!
//! ## Usage
//!
//! ```rust
//! use tbmaker::config::MakerConfig;
//!
//! let config = MakerConfig::from_lookup(|key| match key {
//!     "TB_MAKER_SINGLE" => Some("names.go.tmpl".to_string()),
//!     _ => None,
//! });
//! assert_eq!(config.maker_single.as_deref(), Some("names.go.tmpl"));
//! assert!(!config.verbose);
//! ```

use crate::logging::LogFormat;
use std::env;

/// Run configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MakerConfig {
    /// `TB_TEMPLATES_PATH`
    pub templates_path: Option<String>,
    /// `TB_GENERATORS_PATH`
    pub generators_path: Option<String>,
    /// `TB_VERBOSE=true`
    pub verbose: bool,
    /// `TB_GENERATOR_FILTER`
    pub generator_filter: Option<String>,
    /// `TB_MAKER_SINGLE`
    pub maker_single: Option<String>,
    /// `TB_LOG_FORMAT`
    pub log_format: LogFormat,
}

impl MakerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            templates_path: non_empty("TB_TEMPLATES_PATH"),
            generators_path: non_empty("TB_GENERATORS_PATH"),
            verbose: non_empty("TB_VERBOSE")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            generator_filter: non_empty("TB_GENERATOR_FILTER"),
            maker_single: non_empty("TB_MAKER_SINGLE"),
            log_format: non_empty("TB_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> MakerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MakerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config, MakerConfig::default());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config_from(&[("TB_GENERATOR_FILTER", ""), ("TB_MAKER_SINGLE", "")]);
        assert!(config.generator_filter.is_none());
        assert!(config.maker_single.is_none());
    }

    #[test]
    fn test_verbose_only_for_true() {
        assert!(config_from(&[("TB_VERBOSE", "true")]).verbose);
        assert!(config_from(&[("TB_VERBOSE", "TRUE")]).verbose);
        assert!(!config_from(&[("TB_VERBOSE", "1")]).verbose);
        assert!(!config_from(&[("TB_VERBOSE", "false")]).verbose);
    }

    #[test]
    fn test_paths_and_format() {
        let config = config_from(&[
            ("TB_TEMPLATES_PATH", "/x/templates/"),
            ("TB_GENERATORS_PATH", "/x/templates/generators/"),
            ("TB_LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.templates_path.as_deref(), Some("/x/templates/"));
        assert_eq!(
            config.generators_path.as_deref(),
            Some("/x/templates/generators/")
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }
}

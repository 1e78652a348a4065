//! Configuration validation.
//!
//! # Responsibilities
//! - Decode both map formats and report grammar errors
//! - Validate value ranges (window capacity, hostname limit)
//! - Check the fallback prefix is usable as a path root
//! - Reject log levels `tracing` does not know
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: VhostConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::{MapConfig, VhostConfig};
use crate::mapping::format::{FormatError, MapFormat};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {source}")]
    Format {
        field: &'static str,
        #[source]
        source: FormatError,
    },

    #[error("builder.window_capacity must be greater than zero")]
    ZeroWindow,

    #[error("fallback.prefix '{0}' must be an absolute path ending in '/'")]
    BadPrefix(String),

    #[error("fallback.max_hostname_len must be at least 2, got {0}")]
    HostnameLimit(usize),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Decode a map, `None` when it is disabled.
pub fn compile_map(field: &'static str, map: &MapConfig) -> Result<Option<MapFormat>, ValidationError> {
    if map.is_disabled() {
        return Ok(None);
    }
    MapFormat::parse(&map.map)
        .map(Some)
        .map_err(|source| ValidationError::Format { field, source })
}

/// Check a configuration, collecting every problem.
pub fn validate_config(config: &VhostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = compile_map("document_root.map", &config.document_root) {
        errors.push(e);
    }
    if let Err(e) = compile_map("script_alias.map", &config.script_alias) {
        errors.push(e);
    }

    if config.builder.window_capacity == 0 {
        errors.push(ValidationError::ZeroWindow);
    }

    let prefix = &config.fallback.prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::BadPrefix(prefix.clone()));
    }
    if config.fallback.max_hostname_len < 2 {
        errors.push(ValidationError::HostnameLimit(config.fallback.max_hostname_len));
    }

    let level = &config.observability.log_level;
    if tracing::Level::from_str(level).is_err() {
        errors.push(ValidationError::LogLevel(level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&VhostConfig::default()), Ok(()));
    }

    #[test]
    fn test_none_disables_map() {
        let mut config = VhostConfig::default();
        config.script_alias = MapConfig::new("None");
        assert_eq!(validate_config(&config), Ok(()));
        assert_eq!(compile_map("script_alias.map", &config.script_alias), Ok(None));
    }

    #[test]
    fn test_log_levels() {
        let mut config = VhostConfig::default();
        for level in ["trace", "debug", "INFO", "warn", "error"] {
            config.observability.log_level = level.to_string();
            assert_eq!(validate_config(&config), Ok(()), "level {}", level);
        }

        config.observability.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::LogLevel("verbose".to_string())]);
        assert_eq!(
            errors[0].to_string(),
            "observability.log_level 'verbose' is not one of trace, debug, info, warn, error"
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = VhostConfig::default();
        config.document_root = MapConfig::new("/srv/%q");
        config.script_alias = MapConfig::new("relative/%0");
        config.builder.window_capacity = 0;
        config.fallback.prefix = "/srv".to_string();
        config.fallback.max_hostname_len = 1;
        config.observability.log_level = "verbose".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Format {
                    field: "document_root.map",
                    source: FormatError::Syntax { offset: 6 },
                },
                ValidationError::Format {
                    field: "script_alias.map",
                    source: FormatError::NotAbsolute,
                },
                ValidationError::ZeroWindow,
                ValidationError::BadPrefix("/srv".to_string()),
                ValidationError::HostnameLimit(1),
                ValidationError::LogLevel("verbose".to_string()),
            ]
        );
        assert_eq!(
            errors[0].to_string(),
            "document_root.map: syntax error in format string at byte 6"
        );
    }
}

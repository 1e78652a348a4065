//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mapper.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::fallback::resolver::{DEFAULT_MAX_HOSTNAME_LEN, DEFAULT_PREFIX};
use crate::mapping::builder::DEFAULT_WINDOW_CAPACITY;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VhostConfig {
    /// Map for ordinary requests.
    pub document_root: MapConfig,

    /// Map for requests under `/cgi-bin/`.
    pub script_alias: MapConfig,

    /// Report the `.../htdocs/` portion of the path as the document root.
    pub set_document_root: bool,

    /// Fallback search settings.
    pub fallback: FallbackConfig,

    /// Path builder settings.
    pub builder: BuilderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for VhostConfig {
    fn default() -> Self {
        Self {
            document_root: MapConfig::new("/srv/%0/public/htdocs"),
            script_alias: MapConfig::new("/srv/%0/public/cgi-bin"),
            set_document_root: false,
            fallback: FallbackConfig::default(),
            builder: BuilderConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Which request value a map interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// The requested server name.
    #[default]
    Name,
    /// The local IP address the connection arrived on.
    Ip,
}

/// A single map format and its lookup mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    /// Absolute format string, or `none` to disable.
    pub map: String,

    /// Interpolate the server name or the local IP.
    pub lookup: LookupMode,
}

impl MapConfig {
    pub fn new(map: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            lookup: LookupMode::Name,
        }
    }

    /// A map that never matches.
    pub fn disabled() -> Self {
        Self::new("none")
    }

    /// True when the map is switched off.
    pub fn is_disabled(&self) -> bool {
        self.map.is_empty() || self.map.eq_ignore_ascii_case("none")
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Fallback search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Search for shorter hostnames when the mapped path is missing.
    pub enabled: bool,

    /// Root that every searchable path starts with (e.g. "/srv/").
    pub prefix: String,

    /// Hostnames of this many bytes or more are not searched.
    pub max_hostname_len: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: DEFAULT_PREFIX.to_string(),
            max_hostname_len: DEFAULT_MAX_HOSTNAME_LEN,
        }
    }
}

/// Path builder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Working window size in bytes.
    pub window_capacity: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: VhostConfig = toml::from_str("").unwrap();
        assert_eq!(config.document_root.map, "/srv/%0/public/htdocs");
        assert_eq!(config.document_root.lookup, LookupMode::Name);
        assert!(config.fallback.enabled);
        assert_eq!(config.fallback.prefix, "/srv/");
        assert_eq!(config.builder.window_capacity, 8192);
    }

    #[test]
    fn test_full_config() {
        let config: VhostConfig = toml::from_str(
            r#"
            set_document_root = true

            [document_root]
            map = "/var/www/%-2/%0"
            lookup = "ip"

            [script_alias]
            map = "NONE"

            [fallback]
            enabled = false
            prefix = "/var/www/"
            max_hostname_len = 64

            [observability]
            log_level = "debug"
            log_format = "json"
            "#,
        )
        .unwrap();

        assert!(config.set_document_root);
        assert_eq!(config.document_root.lookup, LookupMode::Ip);
        assert!(config.script_alias.is_disabled());
        assert!(!config.fallback.enabled);
        assert_eq!(config.fallback.max_hostname_len, 64);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}

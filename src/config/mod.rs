//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (format grammar, value ranges)
//!     → VhostConfig (validated, immutable)
//!     → Translator::from_config (formats decoded once)
//!     → shared by reference with every request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no process-wide state
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    BuilderConfig, FallbackConfig, LogFormat, LookupMode, MapConfig, ObservabilityConfig,
    VhostConfig,
};
pub use validation::ValidationError;

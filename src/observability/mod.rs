//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Translator / FallbackResolver produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms via the `metrics` facade)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a metrics recorder; without one every
//!   update is a no-op
//! - Log level comes from `RUST_LOG` first, then configuration

pub mod logging;
pub mod metrics;

//! Fallback search subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedPath from the mapper ("/srv/www.example.com/public/htdocs/x")
//!     → resolver.rs (prefix + hostname + rest split)
//!     → probe.rs (existence checks, one per candidate)
//!     → Return: rewritten path or the original, unchanged
//! ```
//!
//! # Design Decisions
//! - Only existence is probed; no reads, no metadata beyond success
//! - Probe errors count as "missing" and the search moves on
//! - Abandoning the search is never an error: the caller's normal
//!   not-found handling applies to the unchanged path

pub mod probe;
pub mod resolver;

pub use probe::{ExistenceProbe, FsProbe, StaticProbe};
pub use resolver::{AbandonReason, FallbackOutcome, FallbackResolver};

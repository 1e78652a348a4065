//! Request translation subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext (hostname, uri, local port, local ip)
//!     → matcher.rs (script alias or document request)
//!     → translator.rs (choose map + lookup value)
//!     → mapping (candidate path)
//!     → fallback (shorter hostname if missing)
//!     → Return: Translation or Decline
//!
//! Compilation (at startup):
//!     VhostConfig
//!     → validate, decode both map formats
//!     → Freeze as immutable Translator
//! ```
//!
//! # Design Decisions
//! - Formats compiled at startup, immutable at runtime
//! - Deterministic: same request and filesystem give the same path
//! - Script requests win over document requests when both maps exist

pub mod matcher;
pub mod translator;

pub use matcher::ScriptAliasMatcher;
pub use translator::{Decline, Handler, RequestContext, Translation, Translator};

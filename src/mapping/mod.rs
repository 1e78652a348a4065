//! Hostname-to-path mapping subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration load:
//!     map format string ("/srv/%0/public/htdocs")
//!     → format.rs (decode into literal + directive segments)
//!     → MapFormat (immutable, shared by all requests)
//!
//! Per request:
//!     hostname, uri, port
//!     → hostname.rs (label boundaries, directive → byte span)
//!     → builder.rs (bounded-window accumulation)
//!     → mapper.rs (append uri, no double slash)
//!     → ResolvedPath
//! ```
//!
//! # Design Decisions
//! - Formats are decoded once and never re-parsed per request
//! - Resolution is pure and total; malformed formats fail at load time
//! - Hostname bytes are lower-cased on output, literals are copied as-is

pub mod builder;
pub mod format;
pub mod hostname;
pub mod mapper;

pub use builder::{PathBuilder, DEFAULT_WINDOW_CAPACITY};
pub use format::{Directive, FormatError, LabelRange, MapFormat, Segment};
pub use hostname::{HostnameIndex, Span};
pub use mapper::{PathMapper, ResolvedPath};

//! Mass virtual hosting path mapper.
//!
//! Maps a request's hostname and URI onto the filesystem using an
//! interpolated format such as `/srv/%0/public/htdocs`, then strips bytes
//! from the front of the hostname until an existing directory is found.

pub mod config;
pub mod fallback;
pub mod mapping;
pub mod observability;
pub mod routing;

pub use config::schema::VhostConfig;
pub use fallback::{ExistenceProbe, FallbackResolver, FsProbe};
pub use mapping::{MapFormat, PathMapper, ResolvedPath};
pub use routing::{RequestContext, Translation, Translator};

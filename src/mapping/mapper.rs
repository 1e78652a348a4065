//! Format interpolation into a candidate filesystem path.

use std::fmt;
use std::path::PathBuf;

use crate::mapping::builder::{PathBuilder, DEFAULT_WINDOW_CAPACITY};
use crate::mapping::format::{Directive, MapFormat, Segment};
use crate::mapping::hostname::HostnameIndex;

/// Marker that ends the document-root portion of a resolved path.
pub const DOCUMENT_ROOT_MARKER: &[u8] = b"/htdocs/";

/// A filesystem path under construction for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(Vec<u8>);

impl ResolvedPath {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn to_path_buf(&self) -> PathBuf {
        bytes_to_path(&self.0)
    }
}

impl From<Vec<u8>> for ResolvedPath {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for ResolvedPath {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Convert raw path bytes into a `PathBuf`.
#[cfg(unix)]
pub fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

/// Convert raw path bytes into a `PathBuf`.
#[cfg(not(unix))]
pub fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Expands a map format for one request.
#[derive(Debug, Clone, Copy)]
pub struct PathMapper {
    window_capacity: usize,
}

impl PathMapper {
    pub fn new(window_capacity: usize) -> Self {
        Self { window_capacity }
    }

    /// Interpolate `format` for `hostname` and append `uri`.
    ///
    /// Never fails: the format was validated when it was parsed.
    pub fn resolve(&self, hostname: &str, uri: &str, port: u16, format: &MapFormat) -> ResolvedPath {
        let index = HostnameIndex::new(hostname);
        let mut builder = PathBuilder::with_capacity(self.window_capacity);

        for segment in format.segments() {
            match segment {
                Segment::Literal(bytes) => builder.append(bytes),
                Segment::Directive(Directive::PercentLiteral) => builder.append(b"%"),
                Segment::Directive(Directive::Port) => builder.append(port.to_string().as_bytes()),
                Segment::Directive(Directive::LabelRange(range)) => {
                    builder.append_lowercase(index.bytes(index.span(range)));
                }
            }
        }

        // No double slash at the join.
        let uri = match builder.last_byte() {
            Some(b'/') => uri.strip_prefix('/').unwrap_or(uri),
            _ => uri,
        };
        builder.append(uri.as_bytes());

        ResolvedPath(builder.finish())
    }

    /// Everything up to and including the first `/htdocs/`, or the whole
    /// path when there is no such marker.
    pub fn document_root(path: &ResolvedPath) -> Vec<u8> {
        let bytes = path.as_bytes();
        match find(bytes, DOCUMENT_ROOT_MARKER) {
            Some(pos) => bytes[..pos + DOCUMENT_ROOT_MARKER.len()].to_vec(),
            None => bytes.to_vec(),
        }
    }
}

impl Default for PathMapper {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

/// Offset of the first occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

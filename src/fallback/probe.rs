//! Filesystem existence probes.

use std::collections::HashSet;
use std::io::ErrorKind;

use crate::mapping::mapper::bytes_to_path;

/// Answers "does an entry exist at this path".
pub trait ExistenceProbe: Send + Sync + std::fmt::Debug {
    fn exists(&self, path: &[u8]) -> bool;
}

/// Probes the real filesystem.
///
/// Follows symlinks. Any error, including permission denied, counts as
/// "does not exist".
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ExistenceProbe for FsProbe {
    fn exists(&self, path: &[u8]) -> bool {
        match std::fs::metadata(bytes_to_path(path)) {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                tracing::debug!(
                    path = %String::from_utf8_lossy(path),
                    error = %e,
                    "Probe inconclusive, treating as missing"
                );
                false
            }
        }
    }
}

/// A fixed set of existing paths.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    entries: HashSet<Vec<u8>>,
}

impl StaticProbe {
    pub fn new<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        Self {
            entries: entries.into_iter().map(|p| p.as_ref().to_vec()).collect(),
        }
    }
}

impl ExistenceProbe for StaticProbe {
    fn exists(&self, path: &[u8]) -> bool {
        self.entries.contains(path)
    }
}

//! Shared fixtures for integration tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A throwaway hosting root with one directory per hosted domain.
pub struct SrvTree {
    dir: TempDir,
}

impl SrvTree {
    /// Create a root containing the given domain directories.
    pub fn with_domains(domains: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for domain in domains {
            fs::create_dir_all(dir.path().join(domain).join("public/htdocs")).unwrap();
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Root as a fallback prefix, with a trailing slash.
    pub fn prefix(&self) -> String {
        format!("{}/", self.dir.path().display())
    }

    /// Absolute path under the root.
    pub fn path(&self, rest: &str) -> String {
        format!("{}{}", self.prefix(), rest)
    }

    /// Create a file under the root.
    #[allow(dead_code)]
    pub fn touch(&self, rest: &str) {
        let path = self.root().join(rest);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }
}

//! Hostname-stripping fallback search.
//!
//! # Responsibilities
//! - Leave paths that already exist untouched
//! - Find the longest hostname suffix with a directory under the prefix
//! - Rebuild the path around that suffix
//!
//! # Design Decisions
//! - Bytes are stripped one at a time from the front of the hostname, not
//!   whole labels: `www.example.com` probes `ww.example.com`,
//!   `w.example.com`, `.example.com`, `example.com`, ...
//! - First hit wins, so the fewest stripped bytes are preferred
//! - Bounded: hostnames of `max_hostname_len` bytes or more are not searched
//! - The rewritten path is a fresh allocation; the input is never edited

use std::fmt;

use crate::fallback::probe::ExistenceProbe;
use crate::mapping::mapper::ResolvedPath;
use crate::observability::metrics;

/// Default prefix marker.
pub const DEFAULT_PREFIX: &str = "/srv/";

/// Hostnames this long or longer are not searched.
pub const DEFAULT_MAX_HOSTNAME_LEN: usize = 128;

/// Why a search returned the path unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// The path does not start with the prefix.
    NoPrefix,
    /// There is no `/` after the hostname.
    NoSeparator,
    /// The hostname is too long to search.
    HostnameTooLong,
    /// No candidate exists.
    Exhausted,
}

impl AbandonReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbandonReason::NoPrefix => "no_prefix",
            AbandonReason::NoSeparator => "no_separator",
            AbandonReason::HostnameTooLong => "hostname_too_long",
            AbandonReason::Exhausted => "exhausted",
        }
    }
}

/// Result of a fallback search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOutcome {
    /// The original path exists; no search was performed.
    Exists,
    /// The path was rebuilt after dropping `stripped` hostname bytes.
    Rewritten { stripped: usize },
    /// The path is unchanged.
    Abandoned(AbandonReason),
    /// The search is turned off in the configuration.
    Disabled,
}

impl FallbackOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackOutcome::Exists => "exists",
            FallbackOutcome::Rewritten { .. } => "rewritten",
            FallbackOutcome::Abandoned(reason) => reason.as_str(),
            FallbackOutcome::Disabled => "disabled",
        }
    }
}

impl fmt::Display for FallbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackOutcome::Rewritten { stripped } => write!(f, "rewritten (stripped {})", stripped),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Searches shortened hostnames under a fixed prefix.
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    prefix: Vec<u8>,
    max_hostname_len: usize,
}

impl FallbackResolver {
    pub fn new(prefix: impl Into<String>, max_hostname_len: usize) -> Self {
        Self {
            prefix: prefix.into().into_bytes(),
            max_hostname_len,
        }
    }

    /// Resolve `path`, returning it unchanged unless a shorter hostname
    /// exists under the prefix.
    pub fn resolve(
        &self,
        path: ResolvedPath,
        probe: &dyn ExistenceProbe,
    ) -> (ResolvedPath, FallbackOutcome) {
        let (path, outcome, probes) = self.search(path, probe);
        metrics::record_fallback(outcome.as_str(), probes);
        (path, outcome)
    }

    fn search(
        &self,
        path: ResolvedPath,
        probe: &dyn ExistenceProbe,
    ) -> (ResolvedPath, FallbackOutcome, usize) {
        let bytes = path.as_bytes();

        if !bytes.starts_with(&self.prefix) {
            return (path, FallbackOutcome::Abandoned(AbandonReason::NoPrefix), 0);
        }

        if probe.exists(bytes) {
            return (path, FallbackOutcome::Exists, 1);
        }

        let after_prefix = &bytes[self.prefix.len()..];
        let host_len = match after_prefix.iter().position(|b| *b == b'/') {
            Some(pos) => pos,
            None => {
                return (path, FallbackOutcome::Abandoned(AbandonReason::NoSeparator), 1);
            }
        };

        if host_len >= self.max_hostname_len {
            tracing::warn!(
                host_len,
                max = self.max_hostname_len,
                "Hostname too long for fallback search"
            );
            return (path, FallbackOutcome::Abandoned(AbandonReason::HostnameTooLong), 1);
        }

        let host = &after_prefix[..host_len];
        let rest = &after_prefix[host_len..];
        let mut probes = 1;

        for stripped in 0..host_len.saturating_sub(1) {
            let mut candidate = Vec::with_capacity(self.prefix.len() + host_len - stripped + rest.len());
            candidate.extend_from_slice(&self.prefix);
            candidate.extend_from_slice(&host[stripped..]);

            probes += 1;
            if probe.exists(&candidate) {
                candidate.extend_from_slice(rest);
                let rewritten = ResolvedPath::from(candidate);
                tracing::debug!(
                    from = %path,
                    to = %rewritten,
                    stripped,
                    "Fallback matched shorter hostname"
                );
                return (rewritten, FallbackOutcome::Rewritten { stripped }, probes);
            }

            tracing::trace!(
                candidate = %String::from_utf8_lossy(&candidate),
                "Fallback candidate missing"
            );
        }

        tracing::debug!(path = %path, "Fallback search exhausted");
        (path, FallbackOutcome::Abandoned(AbandonReason::Exhausted), probes)
    }
}

impl Default for FallbackResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_MAX_HOSTNAME_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::probe::StaticProbe;
    use std::sync::Mutex;

    /// Records every probed path.
    #[derive(Debug, Default)]
    struct RecordingProbe {
        seen: Mutex<Vec<String>>,
    }

    impl ExistenceProbe for RecordingProbe {
        fn exists(&self, path: &[u8]) -> bool {
            self.seen
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(path).into_owned());
            false
        }
    }

    fn run(entries: &[&str], input: &str) -> (String, FallbackOutcome) {
        let probe = StaticProbe::new(entries.iter().copied());
        let (path, outcome) = FallbackResolver::default().resolve(ResolvedPath::from(input), &probe);
        (path.to_string(), outcome)
    }

    #[test]
    fn test_existing_path_is_unchanged() {
        let input = "/srv/www.example.com/public/htdocs/index.html";
        let (path, outcome) = run(&[input, "/srv/example.com"], input);
        assert_eq!(path, input);
        assert_eq!(outcome, FallbackOutcome::Exists);
    }

    #[test]
    fn test_strips_to_existing_domain() {
        let (path, outcome) = run(
            &["/srv/example.com"],
            "/srv/www.example.com/public/htdocs/index.html",
        );
        assert_eq!(path, "/srv/example.com/public/htdocs/index.html");
        assert_eq!(outcome, FallbackOutcome::Rewritten { stripped: 4 });
    }

    #[test]
    fn test_prefers_fewest_stripped_bytes() {
        let (path, _) = run(
            &["/srv/example.com", "/srv/b.example.com"],
            "/srv/a.b.example.com/public/htdocs",
        );
        assert_eq!(path, "/srv/b.example.com/public/htdocs");
    }

    #[test]
    fn test_existing_host_dir_keeps_path() {
        let (path, outcome) = run(
            &["/srv/blog.foo.com", "/srv/foo.com"],
            "/srv/blog.foo.com/public/htdocs",
        );
        assert_eq!(path, "/srv/blog.foo.com/public/htdocs");
        assert_eq!(outcome, FallbackOutcome::Rewritten { stripped: 0 });
    }

    #[test]
    fn test_strips_bytes_not_labels() {
        // "ww.example.com" is not a label boundary but is still a candidate.
        let (path, outcome) = run(
            &["/srv/ww.example.com", "/srv/example.com"],
            "/srv/www.example.com/index.html",
        );
        assert_eq!(path, "/srv/ww.example.com/index.html");
        assert_eq!(outcome, FallbackOutcome::Rewritten { stripped: 1 });
    }

    #[test]
    fn test_probe_order() {
        let probe = RecordingProbe::default();
        let (path, outcome) =
            FallbackResolver::default().resolve(ResolvedPath::from("/srv/abcd/x"), &probe);
        assert_eq!(path.to_string(), "/srv/abcd/x");
        assert_eq!(outcome, FallbackOutcome::Abandoned(AbandonReason::Exhausted));
        assert_eq!(
            *probe.seen.lock().unwrap(),
            vec!["/srv/abcd/x", "/srv/abcd", "/srv/bcd", "/srv/cd"]
        );
    }

    #[test]
    fn test_last_byte_is_never_probed_alone() {
        let (path, outcome) = run(&["/srv/m"], "/srv/ab.m/x");
        assert_eq!(path, "/srv/ab.m/x");
        assert_eq!(outcome, FallbackOutcome::Abandoned(AbandonReason::Exhausted));
    }

    #[test]
    fn test_hostname_too_long() {
        let host = "a".repeat(200);
        let input = format!("/srv/{}/public/htdocs", host);
        let (path, outcome) = run(&["/srv/a", "/srv/aa", "/srv/aaa"], &input);
        assert_eq!(path, input);
        assert_eq!(outcome, FallbackOutcome::Abandoned(AbandonReason::HostnameTooLong));

        let host = "a".repeat(128);
        let input = format!("/srv/{}/x", host);
        let (_, outcome) = run(&[], &input);
        assert_eq!(outcome, FallbackOutcome::Abandoned(AbandonReason::HostnameTooLong));
    }

    #[test]
    fn test_longest_searchable_hostname() {
        let host = format!("{}.foo.com", "w".repeat(119));
        assert_eq!(host.len(), 127);
        let (path, _) = run(&["/srv/foo.com"], &format!("/srv/{}/x", host));
        assert_eq!(path, "/srv/foo.com/x");
    }

    #[test]
    fn test_exhausted() {
        let input = "/srv/nomatch.invalid/public/htdocs/index.html";
        let (path, outcome) = run(&["/srv/example.com"], input);
        assert_eq!(path, input);
        assert_eq!(outcome, FallbackOutcome::Abandoned(AbandonReason::Exhausted));
    }

    #[test]
    fn test_preconditions() {
        assert_eq!(
            run(&[], "/bogus.php"),
            ("/bogus.php".to_string(), FallbackOutcome::Abandoned(AbandonReason::NoPrefix))
        );
        assert_eq!(
            run(&[], "/srv/bogus.php"),
            ("/srv/bogus.php".to_string(), FallbackOutcome::Abandoned(AbandonReason::NoSeparator))
        );
        assert_eq!(run(&["/srv/"], "/srv//bogus.php").0, "/srv//bogus.php");
        assert_eq!(run(&["/srv/a"], "/srv/a/bogus.php").0, "/srv/a/bogus.php");
    }
}
